//! Read-through caching in front of the backend ports.
//!
//! Reads go through the [`QueryCache`]; writes pass straight to the wrapped
//! backend. Nothing here invalidates on its own. The application handlers
//! invalidate after a mutation has succeeded.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use super::QueryCache;
use crate::domain::catalog::ModelRecord;
use crate::domain::dealer::{Dealer, DealerNode};
use crate::domain::foundation::{DomainError, PartId};
use crate::domain::parts::{NewPart, Part, PartDispatchRequest, PartUpdate};
use crate::domain::stock::StockItem;
use crate::ports::{
    DealerDirectory, ModelCatalog, PartsCatalog, QueryInvalidator, QueryKey, StockReader,
};

/// Wraps a backend and caches its collection reads.
pub struct CachedBackend<B: ?Sized> {
    inner: Arc<B>,
    cache: QueryCache,
}

impl<B: ?Sized> CachedBackend<B> {
    pub fn new(inner: Arc<B>, ttl: Duration) -> Self {
        Self {
            inner,
            cache: QueryCache::new(ttl),
        }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }
}

#[async_trait]
impl<B: StockReader + ?Sized> StockReader for CachedBackend<B> {
    async fn available_stock(&self) -> Result<Vec<StockItem>, DomainError> {
        self.cache
            .get_or_load(QueryKey::FactoryStock, || self.inner.available_stock())
            .await
    }
}

#[async_trait]
impl<B: ModelCatalog + ?Sized> ModelCatalog for CachedBackend<B> {
    async fn list_models(&self) -> Result<Vec<ModelRecord>, DomainError> {
        self.cache
            .get_or_load(QueryKey::Models, || self.inner.list_models())
            .await
    }
}

#[async_trait]
impl<B: DealerDirectory + ?Sized> DealerDirectory for CachedBackend<B> {
    async fn list_dealers(&self) -> Result<Vec<Dealer>, DomainError> {
        self.cache
            .get_or_load(QueryKey::Dealers, || self.inner.list_dealers())
            .await
    }

    async fn dealer_hierarchy(&self) -> Result<Vec<DealerNode>, DomainError> {
        self.cache
            .get_or_load(QueryKey::DealerHierarchy, || self.inner.dealer_hierarchy())
            .await
    }
}

#[async_trait]
impl<B: PartsCatalog + ?Sized> PartsCatalog for CachedBackend<B> {
    async fn list_parts(&self) -> Result<Vec<Part>, DomainError> {
        self.cache
            .get_or_load(QueryKey::Parts, || self.inner.list_parts())
            .await
    }

    async fn create_part(&self, part: &NewPart) -> Result<Part, DomainError> {
        self.inner.create_part(part).await
    }

    async fn update_part(&self, id: &PartId, update: &PartUpdate) -> Result<Part, DomainError> {
        self.inner.update_part(id, update).await
    }

    async fn delete_part(&self, id: &PartId) -> Result<(), DomainError> {
        self.inner.delete_part(id).await
    }

    async fn create_part_dispatch(&self, request: &PartDispatchRequest) -> Result<(), DomainError> {
        self.inner.create_part_dispatch(request).await
    }
}

#[async_trait]
impl<B: Send + Sync + ?Sized> QueryInvalidator for CachedBackend<B> {
    async fn invalidate(&self, key: QueryKey) {
        self.cache.invalidate(key).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryFactoryBackend;
    use crate::domain::catalog::ProductCategory;
    use crate::domain::foundation::ModelId;
    use crate::domain::stock::SerialNumber;

    fn backend() -> Arc<InMemoryFactoryBackend> {
        Arc::new(InMemoryFactoryBackend::new().with_stock(vec![StockItem::new(
            SerialNumber::new("SN1").unwrap(),
            ModelId::new("m1").unwrap(),
            ProductCategory::Inverter,
        )]))
    }

    #[tokio::test]
    async fn stock_is_read_once_until_invalidated() {
        let inner = backend();
        let cached = CachedBackend::new(inner.clone(), Duration::from_secs(60));

        cached.available_stock().await.unwrap();
        cached.available_stock().await.unwrap();
        assert_eq!(inner.stock_reads(), 1);

        cached.invalidate(QueryKey::FactoryStock).await;
        cached.available_stock().await.unwrap();
        assert_eq!(inner.stock_reads(), 2);
    }

    #[tokio::test]
    async fn invalidating_other_keys_keeps_stock() {
        let inner = backend();
        let cached = CachedBackend::new(inner.clone(), Duration::from_secs(60));

        cached.available_stock().await.unwrap();
        cached.invalidate(QueryKey::Parts).await;
        cached.available_stock().await.unwrap();

        assert_eq!(inner.stock_reads(), 1);
    }
}
