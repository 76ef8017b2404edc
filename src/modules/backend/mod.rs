pub mod services;

pub use services::{BackendApi, HttpBackendClient, SubmitMatchingRequest};
