//! TTL cache of backend query results keyed by [`QueryKey`].

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::ports::{QueryInvalidator, QueryKey};

struct CacheEntry {
    value: Arc<dyn Any + Send + Sync>,
    stored_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() >= ttl
    }
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<QueryKey, CacheEntry>,
    /// Bumped on every invalidation of a key.
    generations: HashMap<QueryKey, u64>,
}

impl CacheState {
    fn generation(&self, key: QueryKey) -> u64 {
        self.generations.get(&key).copied().unwrap_or(0)
    }
}

/// Query results held for a fixed time-to-live.
///
/// A zero TTL disables caching: every read goes to the loader. A load that
/// was in flight when its key was invalidated is returned to its caller but
/// never stored.
pub struct QueryCache {
    ttl: Duration,
    state: RwLock<CacheState>,
}

impl QueryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: RwLock::new(CacheState::default()),
        }
    }

    /// Fresh cached value for `key`, if any.
    pub async fn get<T>(&self, key: QueryKey) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let state = self.state.read().await;
        let entry = state.entries.get(&key)?;
        if entry.is_expired(self.ttl) {
            return None;
        }
        entry.value.downcast_ref::<T>().cloned()
    }

    pub async fn put<T>(&self, key: QueryKey, value: T)
    where
        T: Send + Sync + 'static,
    {
        let entry = CacheEntry {
            value: Arc::new(value),
            stored_at: Instant::now(),
        };
        self.state.write().await.entries.insert(key, entry);
    }

    /// Returns the cached value or runs `load` and caches what it returns.
    /// Failed loads are not cached.
    pub async fn get_or_load<T, F, Fut>(&self, key: QueryKey, load: F) -> Result<T, DomainError>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, DomainError>>,
    {
        if let Some(hit) = self.get::<T>(key).await {
            tracing::debug!(key = %key, "Query cache hit");
            return Ok(hit);
        }

        tracing::debug!(key = %key, "Query cache miss");
        let generation = self.state.read().await.generation(key);
        let value = load().await?;

        let mut state = self.state.write().await;
        if state.generation(key) == generation {
            state.entries.insert(
                key,
                CacheEntry {
                    value: Arc::new(value.clone()),
                    stored_at: Instant::now(),
                },
            );
        } else {
            tracing::debug!(key = %key, "Discarding load that raced an invalidation");
        }
        Ok(value)
    }

    pub async fn contains(&self, key: QueryKey) -> bool {
        self.state
            .read()
            .await
            .entries
            .get(&key)
            .is_some_and(|entry| !entry.is_expired(self.ttl))
    }
}

#[async_trait]
impl QueryInvalidator for QueryCache {
    async fn invalidate(&self, key: QueryKey) {
        let mut state = self.state.write().await;
        *state.generations.entry(key).or_insert(0) += 1;
        if state.entries.remove(&key).is_some() {
            tracing::debug!(key = %key, "Query invalidated");
        }
    }
}
