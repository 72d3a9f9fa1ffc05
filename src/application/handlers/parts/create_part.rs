//! CreatePartHandler - adds a part to the catalog.

use std::sync::Arc;

use crate::domain::parts::{NewPart, Part, PartsError};
use crate::ports::{PartsCatalog, QueryInvalidator, QueryKey};

#[derive(Debug, Clone)]
pub struct CreatePartCommand {
    pub part: NewPart,
}

pub struct CreatePartHandler {
    parts: Arc<dyn PartsCatalog>,
    invalidator: Arc<dyn QueryInvalidator>,
}

impl CreatePartHandler {
    pub fn new(parts: Arc<dyn PartsCatalog>, invalidator: Arc<dyn QueryInvalidator>) -> Self {
        Self { parts, invalidator }
    }

    pub async fn handle(&self, cmd: CreatePartCommand) -> Result<Part, PartsError> {
        let part = cmd.part.validated()?;
        let created = self.parts.create_part(&part).await?;

        self.invalidator.invalidate(QueryKey::Parts).await;
        tracing::info!(part_id = %created.id, part_code = %created.part_code, "Part created");

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{backend, RecordingInvalidator};
    use crate::domain::foundation::ErrorCode;

    fn new_part(name: &str) -> NewPart {
        NewPart {
            name: name.to_string(),
            part_code: " DC-FUSE ".to_string(),
            model_ref: None,
            quantity: 12,
        }
    }

    #[tokio::test]
    async fn creates_trimmed_part_and_invalidates_listing() {
        let invalidator = Arc::new(RecordingInvalidator::default());
        let handler = CreatePartHandler::new(backend(), invalidator.clone());

        let created = handler
            .handle(CreatePartCommand {
                part: new_part("DC Fuse"),
            })
            .await
            .unwrap();

        assert_eq!(created.part_code, "DC-FUSE");
        assert_eq!(created.quantity, 12);
        assert_eq!(invalidator.keys(), vec![QueryKey::Parts]);
    }

    #[tokio::test]
    async fn blank_name_is_refused() {
        let invalidator = Arc::new(RecordingInvalidator::default());
        let handler = CreatePartHandler::new(backend(), invalidator.clone());

        let err = handler
            .handle(CreatePartCommand { part: new_part(" ") })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert!(invalidator.keys().is_empty());
    }
}
