//! Factory backend adapter.
//!
//! - `HttpFactoryBackend` - reqwest client for the backend REST API
//! - `wire` - JSON shapes and their narrowing into domain records

mod client;
mod error;
mod wire;

pub use client::{HttpBackendConfig, HttpFactoryBackend};
pub use error::{backend_message, BackendError, FALLBACK_MESSAGE};
