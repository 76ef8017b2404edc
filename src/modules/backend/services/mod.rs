pub mod backend_trait;
pub mod http_backend;

pub use backend_trait::{BackendApi, SubmitMatchingRequest};
pub use http_backend::HttpBackendClient;
