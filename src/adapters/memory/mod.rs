//! In-memory adapters.

mod backend;
mod seed;

pub use backend::InMemoryFactoryBackend;
