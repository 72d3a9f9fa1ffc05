//! SearchDealersHandler - dealer name autocomplete.

use std::sync::Arc;

use crate::domain::dealer::{search_dealers, Dealer};
use crate::domain::foundation::DomainError;
use crate::ports::DealerDirectory;

#[derive(Debug, Clone, Default)]
pub struct SearchDealersQuery {
    pub query: String,
    /// Overrides the configured result cap.
    pub limit: Option<usize>,
}

pub struct SearchDealersHandler {
    dealers: Arc<dyn DealerDirectory>,
    default_limit: usize,
}

impl SearchDealersHandler {
    pub fn new(dealers: Arc<dyn DealerDirectory>, default_limit: usize) -> Self {
        Self {
            dealers,
            default_limit,
        }
    }

    pub async fn handle(&self, query: SearchDealersQuery) -> Result<Vec<Dealer>, DomainError> {
        if query.query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let limit = query.limit.unwrap_or(self.default_limit);
        let dealers = self.dealers.list_dealers().await?;
        Ok(search_dealers(&dealers, &query.query, limit)
            .into_iter()
            .cloned()
            .collect())
    }
}
