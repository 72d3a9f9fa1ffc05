//! ImportSerialsHandler - merges typed or uploaded serials into the
//! operator's selection.

use std::sync::Arc;

use super::load_scoped;
use crate::application::handlers::upload::SerialUpload;
use crate::domain::dispatch::{AddOutcome, DispatchError, MergeReport, SerialSelection};
use crate::domain::stock::{ScopedStock, SerialNumber, StockScope};
use crate::ports::{SheetReader, StockReader};

#[derive(Debug, Clone)]
pub struct ImportSerialsCommand {
    pub scope: StockScope,
    pub upload: SerialUpload,
    /// Serials already selected on the dashboard.
    pub existing: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ImportSerialsResult {
    /// The merged selection in numeric-aware order.
    pub selection: Vec<SerialNumber>,
    pub added: usize,
    pub duplicates: usize,
    pub rejected: Vec<String>,
    /// Set for single entry only.
    pub outcome: Option<AddOutcome>,
}

/// Handler for building up a serial selection.
///
/// Existing selections are re-checked against the current stock, so a serial
/// dispatched elsewhere since it was picked drops out and is reported as
/// rejected.
pub struct ImportSerialsHandler {
    stock: Arc<dyn StockReader>,
    sheets: Arc<dyn SheetReader>,
}

impl ImportSerialsHandler {
    pub fn new(stock: Arc<dyn StockReader>, sheets: Arc<dyn SheetReader>) -> Self {
        Self { stock, sheets }
    }

    pub async fn handle(
        &self,
        cmd: ImportSerialsCommand,
    ) -> Result<ImportSerialsResult, DispatchError> {
        // Decode before touching the backend; a bad file changes nothing.
        let candidates = cmd.upload.candidates(self.sheets.as_ref())?;
        let scoped = load_scoped(self.stock.as_ref(), &cmd.scope).await?;

        let mut selection = SerialSelection::new();
        let stale = selection.merge(&cmd.existing, &scoped).rejected;

        let (report, outcome) = if cmd.upload.is_single() {
            single_entry(&mut selection, candidates.first(), &scoped)
        } else {
            (selection.merge(&candidates, &scoped), None)
        };

        let mut rejected = stale;
        rejected.extend(report.rejected);

        tracing::debug!(
            added = report.added,
            duplicates = report.duplicates,
            rejected = rejected.len(),
            selected = selection.len(),
            "Serials imported"
        );

        Ok(ImportSerialsResult {
            selection: selection.to_vec(),
            added: report.added,
            duplicates: report.duplicates,
            rejected,
            outcome,
        })
    }
}

fn single_entry(
    selection: &mut SerialSelection,
    candidate: Option<&String>,
    scoped: &ScopedStock,
) -> (MergeReport, Option<AddOutcome>) {
    let outcome = match candidate {
        Some(raw) => selection.add_one(raw, scoped),
        None => AddOutcome::Ignored,
    };

    let mut report = MergeReport::default();
    match &outcome {
        AddOutcome::Added(_) => report.added = 1,
        AddOutcome::AlreadySelected(_) => report.duplicates = 1,
        AddOutcome::NotInStock(raw) => report.rejected.push(raw.clone()),
        AddOutcome::Ignored => {}
    }
    (report, Some(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::import::CsvSheetReader;
    use crate::application::handlers::test_support::{backend, sn};
    use crate::domain::catalog::ProductCategory;
    use crate::domain::dispatch::SerialImportError;

    fn handler() -> ImportSerialsHandler {
        ImportSerialsHandler::new(backend(), Arc::new(CsvSheetReader::new()))
    }

    fn command(upload: SerialUpload, existing: &[&str]) -> ImportSerialsCommand {
        ImportSerialsCommand {
            scope: StockScope::category(ProductCategory::Inverter),
            upload,
            existing: existing.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn csv_upload_merges_with_existing_selection() {
        let upload = SerialUpload::Csv(b"Serial Number\nSN3\nSN1\nGHOST\n".to_vec());

        let result = handler().handle(command(upload, &["SN1"])).await.unwrap();

        assert_eq!(result.selection, vec![sn("SN1"), sn("SN3")]);
        assert_eq!(result.added, 1);
        assert_eq!(result.duplicates, 1);
        assert_eq!(result.rejected, vec!["GHOST".to_string()]);
        assert!(result.outcome.is_none());
    }

    #[tokio::test]
    async fn single_entry_reports_outcome() {
        let result = handler()
            .handle(command(SerialUpload::single(" SN2 "), &[]))
            .await
            .unwrap();

        assert_eq!(result.outcome, Some(AddOutcome::Added(sn("SN2"))));
        assert_eq!(result.selection, vec![sn("SN2")]);
    }

    #[tokio::test]
    async fn single_entry_of_selected_serial_is_a_duplicate() {
        let result = handler()
            .handle(command(SerialUpload::single("SN2"), &["SN2"]))
            .await
            .unwrap();

        assert_eq!(result.outcome, Some(AddOutcome::AlreadySelected(sn("SN2"))));
        assert_eq!(result.duplicates, 1);
    }

    #[tokio::test]
    async fn stale_existing_serials_drop_out() {
        let result = handler()
            .handle(command(SerialUpload::text("SN1"), &["SOLD-1"]))
            .await
            .unwrap();

        assert_eq!(result.selection, vec![sn("SN1")]);
        assert_eq!(result.rejected, vec!["SOLD-1".to_string()]);
    }

    #[tokio::test]
    async fn unreadable_upload_changes_nothing() {
        let err = handler()
            .handle(command(SerialUpload::Csv(Vec::new()), &["SN1"]))
            .await
            .unwrap_err();

        assert_eq!(err, DispatchError::Import(SerialImportError::Empty));
    }
}
