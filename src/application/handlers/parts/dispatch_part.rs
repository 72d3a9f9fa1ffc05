//! DispatchPartHandler - sends spare parts to a dealer or service center.

use std::sync::Arc;

use super::part_error;
use crate::domain::parts::{PartDispatchRequest, PartsError};
use crate::ports::{PartsCatalog, QueryInvalidator, QueryKey};

#[derive(Debug, Clone)]
pub struct DispatchPartCommand {
    pub request: PartDispatchRequest,
}

/// Handler for part dispatches.
///
/// The on-hand quantity is checked against the current catalog when the
/// part is listed; the backend has the final say either way.
pub struct DispatchPartHandler {
    parts: Arc<dyn PartsCatalog>,
    invalidator: Arc<dyn QueryInvalidator>,
}

impl DispatchPartHandler {
    pub fn new(parts: Arc<dyn PartsCatalog>, invalidator: Arc<dyn QueryInvalidator>) -> Self {
        Self { parts, invalidator }
    }

    pub async fn handle(&self, cmd: DispatchPartCommand) -> Result<PartDispatchRequest, PartsError> {
        let catalog = self.parts.list_parts().await?;
        let part = catalog.iter().find(|p| p.id == cmd.request.part_id);
        let request = cmd.request.validated(part)?;

        self.parts
            .create_part_dispatch(&request)
            .await
            .map_err(|e| part_error(e, &request.part_id))?;

        self.invalidator.invalidate(QueryKey::Parts).await;
        tracing::info!(
            part_id = %request.part_id,
            quantity = request.quantity,
            recipient = %request.recipient_name,
            "Parts dispatched"
        );

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{backend, RecordingInvalidator};
    use crate::domain::foundation::PartId;

    fn request(quantity: u32) -> PartDispatchRequest {
        PartDispatchRequest {
            part_id: PartId::new("p-1").unwrap(),
            quantity,
            recipient_name: "Service Center North".to_string(),
            dispatch_date: "2024-05-09".to_string(),
            remarks: None,
        }
    }

    #[tokio::test]
    async fn dispatch_draws_down_stock() {
        let backend = backend();
        let invalidator = Arc::new(RecordingInvalidator::default());
        let handler = DispatchPartHandler::new(backend.clone(), invalidator.clone());

        handler
            .handle(DispatchPartCommand { request: request(3) })
            .await
            .unwrap();

        assert_eq!(backend.part_dispatches().await.len(), 1);
        assert_eq!(invalidator.keys(), vec![QueryKey::Parts]);
    }

    #[tokio::test]
    async fn more_than_on_hand_is_refused_locally() {
        let backend = backend();
        let invalidator = Arc::new(RecordingInvalidator::default());
        let handler = DispatchPartHandler::new(backend.clone(), invalidator.clone());

        let err = handler
            .handle(DispatchPartCommand { request: request(6) })
            .await
            .unwrap_err();

        assert_eq!(
            err,
            PartsError::InsufficientQuantity {
                requested: 6,
                available: 5
            }
        );
        assert!(backend.part_dispatches().await.is_empty());
        assert!(invalidator.keys().is_empty());
    }

    #[tokio::test]
    async fn zero_quantity_is_refused() {
        let handler = DispatchPartHandler::new(backend(), Arc::new(RecordingInvalidator::default()));

        let err = handler
            .handle(DispatchPartCommand { request: request(0) })
            .await
            .unwrap_err();

        assert!(matches!(err, PartsError::Validation(_)));
    }
}
