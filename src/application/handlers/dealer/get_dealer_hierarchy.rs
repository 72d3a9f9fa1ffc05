//! GetDealerHierarchyHandler - the dealer/sub-dealer tree.
//!
//! Uses the backend's own hierarchy when it offers one. Backends without the
//! hierarchy endpoint answer NotFound; the tree is then built from the flat
//! dealer listing.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::dealer::{DealerNode, FlatDealer};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::DealerDirectory;

#[derive(Debug, Clone, Default)]
pub struct GetDealerHierarchyQuery;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DealerHierarchyView {
    pub roots: Vec<DealerNode>,
    /// Dealers in the whole forest.
    pub total: usize,
}

impl DealerHierarchyView {
    fn new(roots: Vec<DealerNode>) -> Self {
        let total = roots.iter().map(DealerNode::size).sum();
        Self { roots, total }
    }

    /// Depth-first listing with depth, for indented display.
    pub fn flattened(&self) -> Vec<FlatDealer<'_>> {
        DealerNode::flatten(&self.roots)
    }
}

pub struct GetDealerHierarchyHandler {
    dealers: Arc<dyn DealerDirectory>,
}

impl GetDealerHierarchyHandler {
    pub fn new(dealers: Arc<dyn DealerDirectory>) -> Self {
        Self { dealers }
    }

    pub async fn handle(
        &self,
        _query: GetDealerHierarchyQuery,
    ) -> Result<DealerHierarchyView, DomainError> {
        match self.dealers.dealer_hierarchy().await {
            Ok(roots) => Ok(DealerHierarchyView::new(roots)),
            Err(err) if err.code == ErrorCode::NotFound => {
                tracing::debug!("No hierarchy endpoint; building tree from dealer list");
                let dealers = self.dealers.list_dealers().await?;
                Ok(DealerHierarchyView::new(DealerNode::build_forest(dealers)))
            }
            Err(err) => Err(err),
        }
    }
}
