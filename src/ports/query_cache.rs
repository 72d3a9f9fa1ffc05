//! Query cache port.
//!
//! Reads of backend collections are cached under a stable key. A mutation
//! that succeeded invalidates the keys it affects, so the next read of that
//! key goes to the backend. A failed mutation invalidates nothing.

use async_trait::async_trait;
use std::fmt;

/// Stable identifier of a cached backend query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    FactoryStock,
    Models,
    Dealers,
    DealerHierarchy,
    Parts,
    Dispatches,
}

impl QueryKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKey::FactoryStock => "factory-stock",
            QueryKey::Models => "models",
            QueryKey::Dealers => "dealers",
            QueryKey::DealerHierarchy => "dealer-hierarchy",
            QueryKey::Parts => "parts",
            QueryKey::Dispatches => "dispatches",
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait QueryInvalidator: Send + Sync {
    async fn invalidate(&self, key: QueryKey);

    async fn invalidate_all(&self, keys: &[QueryKey]) {
        for key in keys {
            self.invalidate(*key).await;
        }
    }
}
