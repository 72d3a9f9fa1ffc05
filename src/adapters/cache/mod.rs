//! Query cache adapters.
//!
//! - `QueryCache` - TTL store keyed by `QueryKey`, implements `QueryInvalidator`
//! - `CachedBackend` - read-through cache in front of the backend ports

mod cached_backend;
mod query_cache;

pub use cached_backend::CachedBackend;
pub use query_cache::QueryCache;
