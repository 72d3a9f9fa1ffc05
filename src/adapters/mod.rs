//! Adapters - Implementations of port interfaces.
//!
//! - `backend` - reqwest client for the factory backend REST API
//! - `memory` - in-memory backend for development and tests
//! - `cache` - TTL query cache wrapping the backend read ports
//! - `import` - CSV decoding of serial uploads
//! - `auth` - static token table for development
//! - `http` - axum router, handlers and auth middleware

pub mod auth;
pub mod backend;
pub mod cache;
pub mod http;
pub mod import;
pub mod memory;

pub use auth::StaticTokenValidator;
pub use backend::{BackendError, HttpBackendConfig, HttpFactoryBackend};
pub use cache::{CachedBackend, QueryCache};
pub use import::CsvSheetReader;
pub use memory::InMemoryFactoryBackend;
