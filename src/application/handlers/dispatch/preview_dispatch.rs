//! PreviewDispatchHandler - shows the dispatch number and reconciliation
//! before anything is submitted.

use std::sync::Arc;

use super::{load_scoped, DispatchSettings};
use crate::domain::dispatch::{
    reconcile, DispatchDraft, DispatchError, DispatchNumber, Reconciliation, SerialSource,
};
use crate::domain::foundation::AuthenticatedUser;
use crate::domain::stock::StockScope;
use crate::ports::StockReader;

#[derive(Debug, Clone)]
pub struct PreviewDispatchCommand {
    pub operator: AuthenticatedUser,
    pub draft: DispatchDraft,
    pub scope: StockScope,
    pub serials: SerialSource,
}

#[derive(Debug, Clone)]
pub struct PreviewDispatchResult {
    /// Exactly what submission would send.
    pub dispatch_number: DispatchNumber,
    pub reconciliation: Reconciliation,
    /// Why submission would be refused right now, if it would.
    pub blocker: Option<DispatchError>,
}

impl PreviewDispatchResult {
    pub fn can_submit(&self) -> bool {
        self.blocker.is_none()
    }
}

/// Computes the preview without mutating anything.
pub struct PreviewDispatchHandler {
    stock: Arc<dyn StockReader>,
    settings: DispatchSettings,
}

impl PreviewDispatchHandler {
    pub fn new(stock: Arc<dyn StockReader>, settings: DispatchSettings) -> Self {
        Self { stock, settings }
    }

    pub async fn handle(
        &self,
        cmd: PreviewDispatchCommand,
    ) -> Result<PreviewDispatchResult, DispatchError> {
        let scoped = load_scoped(self.stock.as_ref(), &cmd.scope).await?;
        let reconciliation = reconcile(cmd.serials.candidates(), &scoped);

        let prefix = self.settings.prefix_for(&cmd.operator);
        let dispatch_number =
            cmd.draft
                .dispatch_number(&prefix, &reconciliation.valid, self.settings.today());

        let blocker = match cmd.draft.check_required() {
            Err(missing) => Some(missing),
            Ok(()) if !reconciliation.has_valid() => Some(DispatchError::NoValidSerials {
                rejected: reconciliation.rejected_count(),
            }),
            Ok(()) => None,
        };

        tracing::debug!(
            dispatch_number = %dispatch_number,
            valid = reconciliation.valid.len(),
            rejected = reconciliation.rejected_count(),
            "Dispatch previewed"
        );

        Ok(PreviewDispatchResult {
            dispatch_number,
            reconciliation,
            blocker,
        })
    }
}
