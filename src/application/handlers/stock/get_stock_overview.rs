//! GetStockOverviewHandler - available unit counts for the dashboard.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::stock::StockOverview;
use crate::ports::{ModelCatalog, StockReader};

#[derive(Debug, Clone, Default)]
pub struct GetStockOverviewQuery;

/// Counts per category and per model, from real stock only.
pub struct GetStockOverviewHandler {
    stock: Arc<dyn StockReader>,
    models: Arc<dyn ModelCatalog>,
}

impl GetStockOverviewHandler {
    pub fn new(stock: Arc<dyn StockReader>, models: Arc<dyn ModelCatalog>) -> Self {
        Self { stock, models }
    }

    pub async fn handle(&self, _query: GetStockOverviewQuery) -> Result<StockOverview, DomainError> {
        let (items, models) =
            tokio::try_join!(self.stock.available_stock(), self.models.list_models())?;
        Ok(StockOverview::build(&items, &models))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::backend;
    use crate::domain::catalog::ProductCategory;
    use crate::domain::foundation::{ErrorCode, ModelId};

    #[tokio::test]
    async fn counts_units_per_category_and_model() {
        let backend = backend();
        let handler = GetStockOverviewHandler::new(backend.clone(), backend);

        let overview = handler.handle(GetStockOverviewQuery).await.unwrap();

        assert_eq!(overview.total_available, 5);
        let inverters = overview
            .by_category
            .iter()
            .find(|c| c.category == ProductCategory::Inverter)
            .unwrap();
        assert_eq!(inverters.available, 4);
        let hybrid = overview
            .by_model
            .iter()
            .find(|m| m.model_id == ModelId::new("m-hybrid").unwrap())
            .unwrap();
        assert_eq!(hybrid.available, 3);
    }

    #[tokio::test]
    async fn backend_failure_propagates() {
        let backend = backend();
        backend
            .fail_with(DomainError::new(ErrorCode::BackendError, "down"))
            .await;
        let handler = GetStockOverviewHandler::new(backend.clone(), backend);

        let err = handler.handle(GetStockOverviewQuery).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::BackendError);
    }
}
