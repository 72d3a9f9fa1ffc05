//! CreateDispatchHandler - reconciles the serials and submits the dispatch.

use std::sync::Arc;

use super::{load_scoped, DispatchSettings};
use crate::domain::dispatch::{reconcile, DispatchDraft, DispatchError, DispatchRecord, SerialSource};
use crate::domain::foundation::AuthenticatedUser;
use crate::domain::stock::StockScope;
use crate::ports::{DispatchGateway, QueryInvalidator, QueryKey, StockReader};

/// Keys whose cached data a successful dispatch makes stale.
const INVALIDATED_BY_DISPATCH: [QueryKey; 2] = [QueryKey::FactoryStock, QueryKey::Dispatches];

#[derive(Debug, Clone)]
pub struct CreateDispatchCommand {
    pub operator: AuthenticatedUser,
    pub draft: DispatchDraft,
    pub scope: StockScope,
    pub serials: SerialSource,
}

#[derive(Debug, Clone)]
pub struct CreateDispatchResult {
    pub record: DispatchRecord,
    /// Candidates left out because they were not in stock.
    pub rejected: Vec<String>,
    pub duplicates: usize,
}

/// Handler for creating dispatches.
///
/// Dealer name and date are checked before stock is read. Serials that are
/// not in the scoped stock are dropped and reported; if none remain the
/// dispatch is refused. Stock and dispatch queries are invalidated only
/// after the backend accepted the dispatch.
pub struct CreateDispatchHandler {
    stock: Arc<dyn StockReader>,
    gateway: Arc<dyn DispatchGateway>,
    invalidator: Arc<dyn QueryInvalidator>,
    settings: DispatchSettings,
}

impl CreateDispatchHandler {
    pub fn new(
        stock: Arc<dyn StockReader>,
        gateway: Arc<dyn DispatchGateway>,
        invalidator: Arc<dyn QueryInvalidator>,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            stock,
            gateway,
            invalidator,
            settings,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateDispatchCommand,
    ) -> Result<CreateDispatchResult, DispatchError> {
        // 1. Required form fields
        cmd.draft.check_required()?;

        // 2. Reconcile against the scoped stock
        let scoped = load_scoped(self.stock.as_ref(), &cmd.scope).await?;
        let reconciliation = reconcile(cmd.serials.candidates(), &scoped);
        let rejected = reconciliation.rejected.clone();
        let duplicates = reconciliation.duplicates;
        let valid = reconciliation.require_valid()?;

        if !rejected.is_empty() {
            tracing::warn!(
                rejected = rejected.len(),
                "Dispatching valid subset; some serials are not in stock"
            );
        }

        // 3. Build and submit
        let prefix = self.settings.prefix_for(&cmd.operator);
        let request = cmd.draft.into_request(&prefix, valid, self.settings.today())?;

        let record = self
            .gateway
            .create_dispatch(&request)
            .await
            .map_err(|e| {
                tracing::warn!(
                    dispatch_number = %request.dispatch_number,
                    error = %e,
                    "Backend refused dispatch"
                );
                DispatchError::from(e)
            })?;

        // 4. Only now is cached stock stale
        self.invalidator.invalidate_all(&INVALIDATED_BY_DISPATCH).await;

        tracing::info!(
            dispatch_id = %record.id,
            dispatch_number = %record.dispatch_number,
            dealer = %record.dealer_name,
            units = record.serial_numbers.len(),
            operator = %cmd.operator.id,
            "Dispatch created"
        );

        Ok(CreateDispatchResult {
            record,
            rejected,
            duplicates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{backend, operator, sn, RecordingInvalidator};
    use crate::domain::catalog::ProductCategory;
    use crate::domain::foundation::{DomainError, ErrorCode};
    use chrono::NaiveDate;

    struct Fixture {
        backend: Arc<crate::adapters::memory::InMemoryFactoryBackend>,
        invalidator: Arc<RecordingInvalidator>,
        handler: CreateDispatchHandler,
    }

    fn fixture() -> Fixture {
        let backend = backend();
        let invalidator = Arc::new(RecordingInvalidator::default());
        let settings = DispatchSettings::new("FD")
            .with_fixed_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        let handler = CreateDispatchHandler::new(
            backend.clone(),
            backend.clone(),
            invalidator.clone(),
            settings,
        );
        Fixture {
            backend,
            invalidator,
            handler,
        }
    }

    fn command(dealer: &str, date: &str, bulk: &str) -> CreateDispatchCommand {
        CreateDispatchCommand {
            operator: operator(),
            draft: DispatchDraft {
                dealer_name: dealer.to_string(),
                dispatch_date: date.to_string(),
                ..Default::default()
            },
            scope: StockScope::category(ProductCategory::Inverter),
            serials: SerialSource::Bulk(bulk.to_string()),
        }
    }

    #[tokio::test]
    async fn dispatches_valid_subset_and_invalidates_stock() {
        let f = fixture();

        let result = f
            .handler
            .handle(command("Bright Energy", "2024-05-09", "SN3\nSN1\nNOPE"))
            .await
            .unwrap();

        assert_eq!(result.record.serial_numbers, vec![sn("SN1"), sn("SN3")]);
        assert_eq!(result.record.dispatch_number, "SL090524SN1SN3");
        assert_eq!(result.rejected, vec!["NOPE".to_string()]);
        assert_eq!(
            f.invalidator.keys(),
            vec![QueryKey::FactoryStock, QueryKey::Dispatches]
        );
        assert!(!f.backend.available_serials().await.contains(&sn("SN1")));
    }

    #[tokio::test]
    async fn missing_dealer_is_refused_before_stock_is_read() {
        let f = fixture();

        let err = f
            .handler
            .handle(command("  ", "2024-05-09", "SN1"))
            .await
            .unwrap_err();

        assert_eq!(err, DispatchError::MissingField("Dealer name"));
        assert_eq!(f.backend.stock_reads(), 0);
    }

    #[tokio::test]
    async fn all_rejected_submits_nothing() {
        let f = fixture();

        let err = f
            .handler
            .handle(command("Bright Energy", "2024-05-09", "B1\nX9"))
            .await
            .unwrap_err();

        assert_eq!(err, DispatchError::NoValidSerials { rejected: 2 });
        assert!(f.backend.dispatches().await.is_empty());
        assert!(f.invalidator.keys().is_empty());
    }

    #[tokio::test]
    async fn backend_failure_keeps_cache_and_surfaces_message() {
        let f = fixture();
        f.backend
            .fail_with(DomainError::new(
                ErrorCode::BackendError,
                "Dispatch number already exists",
            ))
            .await;

        let err = f
            .handler
            .handle(command("Bright Energy", "2024-05-09", "SN1"))
            .await
            .unwrap_err();

        assert_eq!(err, DispatchError::Backend("Dispatch number already exists".to_string()));
        assert!(f.invalidator.keys().is_empty());
    }

    #[tokio::test]
    async fn operator_override_replaces_generated_number() {
        let f = fixture();
        let mut cmd = command("Bright Energy", "2024-05-09", "SN2");
        cmd.draft.dispatch_number_override = Some("  MANUAL-7 ".to_string());

        let result = f.handler.handle(cmd).await.unwrap();

        assert_eq!(result.record.dispatch_number, "MANUAL-7");
    }
}
