//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `StaticTokenValidator` - fixed token table for development and tests
//! - `HttpFactoryBackend` (in `adapters::backend`) - asks the backend who
//!   owns a token

mod static_tokens;

pub use static_tokens::StaticTokenValidator;
