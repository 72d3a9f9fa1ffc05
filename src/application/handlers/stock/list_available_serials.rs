//! ListAvailableSerialsHandler - serials offered in the dispatch picker.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::stock::{SerialNumber, StockScope};
use crate::ports::StockReader;

/// Query for the serials dispatchable under a scope.
#[derive(Debug, Clone, Default)]
pub struct ListAvailableSerialsQuery {
    pub scope: StockScope,
}

pub struct ListAvailableSerialsHandler {
    stock: Arc<dyn StockReader>,
}

impl ListAvailableSerialsHandler {
    pub fn new(stock: Arc<dyn StockReader>) -> Self {
        Self { stock }
    }

    /// Scoped serials in numeric-aware order.
    pub async fn handle(
        &self,
        query: ListAvailableSerialsQuery,
    ) -> Result<Vec<SerialNumber>, DomainError> {
        let items = self.stock.available_stock().await?;
        Ok(query.scope.apply(&items).sorted())
    }
}
