//! UpdatePartHandler - edits a catalog part.

use std::sync::Arc;

use super::part_error;
use crate::domain::foundation::PartId;
use crate::domain::parts::{Part, PartUpdate, PartsError};
use crate::ports::{PartsCatalog, QueryInvalidator, QueryKey};

#[derive(Debug, Clone)]
pub struct UpdatePartCommand {
    pub id: PartId,
    pub update: PartUpdate,
}

pub struct UpdatePartHandler {
    parts: Arc<dyn PartsCatalog>,
    invalidator: Arc<dyn QueryInvalidator>,
}

impl UpdatePartHandler {
    pub fn new(parts: Arc<dyn PartsCatalog>, invalidator: Arc<dyn QueryInvalidator>) -> Self {
        Self { parts, invalidator }
    }

    pub async fn handle(&self, cmd: UpdatePartCommand) -> Result<Part, PartsError> {
        let update = cmd.update.validated()?;
        let updated = self
            .parts
            .update_part(&cmd.id, &update)
            .await
            .map_err(|e| part_error(e, &cmd.id))?;

        self.invalidator.invalidate(QueryKey::Parts).await;
        tracing::info!(part_id = %updated.id, "Part updated");

        Ok(updated)
    }
}
