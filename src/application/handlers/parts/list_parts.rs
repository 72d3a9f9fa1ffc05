//! ListPartsHandler - the spare parts catalog.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::parts::Part;
use crate::ports::PartsCatalog;

#[derive(Debug, Clone, Default)]
pub struct ListPartsQuery;

pub struct ListPartsHandler {
    parts: Arc<dyn PartsCatalog>,
}

impl ListPartsHandler {
    pub fn new(parts: Arc<dyn PartsCatalog>) -> Self {
        Self { parts }
    }

    /// Parts ordered by name, then code.
    pub async fn handle(&self, _query: ListPartsQuery) -> Result<Vec<Part>, DomainError> {
        let mut parts = self.parts.list_parts().await?;
        parts.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.part_code.cmp(&b.part_code))
        });
        Ok(parts)
    }
}
