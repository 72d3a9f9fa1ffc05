//! DeletePartHandler - removes a part from the catalog.

use std::sync::Arc;

use super::part_error;
use crate::domain::foundation::PartId;
use crate::domain::parts::PartsError;
use crate::ports::{PartsCatalog, QueryInvalidator, QueryKey};

#[derive(Debug, Clone)]
pub struct DeletePartCommand {
    pub id: PartId,
}

pub struct DeletePartHandler {
    parts: Arc<dyn PartsCatalog>,
    invalidator: Arc<dyn QueryInvalidator>,
}

impl DeletePartHandler {
    pub fn new(parts: Arc<dyn PartsCatalog>, invalidator: Arc<dyn QueryInvalidator>) -> Self {
        Self { parts, invalidator }
    }

    pub async fn handle(&self, cmd: DeletePartCommand) -> Result<(), PartsError> {
        self.parts
            .delete_part(&cmd.id)
            .await
            .map_err(|e| part_error(e, &cmd.id))?;

        self.invalidator.invalidate(QueryKey::Parts).await;
        tracing::info!(part_id = %cmd.id, "Part deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{backend, RecordingInvalidator};
    use crate::ports::PartsCatalog;

    #[tokio::test]
    async fn deletes_part() {
        let backend = backend();
        let invalidator = Arc::new(RecordingInvalidator::default());
        let handler = DeletePartHandler::new(backend.clone(), invalidator.clone());

        handler
            .handle(DeletePartCommand {
                id: PartId::new("p-1").unwrap(),
            })
            .await
            .unwrap();

        assert!(backend.list_parts().await.unwrap().is_empty());
        assert_eq!(invalidator.keys(), vec![QueryKey::Parts]);
    }

    #[tokio::test]
    async fn deleting_twice_is_not_found() {
        let handler = DeletePartHandler::new(backend(), Arc::new(RecordingInvalidator::default()));
        let id = PartId::new("p-1").unwrap();

        handler.handle(DeletePartCommand { id: id.clone() }).await.unwrap();
        let err = handler.handle(DeletePartCommand { id: id.clone() }).await.unwrap_err();

        assert_eq!(err, PartsError::NotFound(id));
    }
}
