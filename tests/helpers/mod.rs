// Shared fixtures for contract and integration tests
//
// Usage (from a test target under tests/<kind>/):
//   #[path = "../helpers/mod.rs"]
//   mod helpers;
//   use helpers::*;

#![allow(dead_code)]

pub mod test_backend;
pub mod test_data;

pub use test_backend::*;
pub use test_data::*;
