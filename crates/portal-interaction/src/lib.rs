//! Backend implementations for the Campus Portal client.
//!
//! - [`HttpBackend`]: the institutional REST API
//! - [`MockBackend`]: the local demo service used as fallback

pub mod http_backend;
pub mod mock_backend;
pub mod wire;

pub use http_backend::HttpBackend;
pub use mock_backend::{DEMO_PASSWORD, DEMO_USERNAME, MockBackend, MockLatency};
