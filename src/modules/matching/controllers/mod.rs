pub mod matching_controller;

pub use matching_controller::configure;
