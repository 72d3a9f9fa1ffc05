//! Data transfer objects for the factory desk HTTP endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{
    CreateDispatchResult, DealerHierarchyView, ImportSerialsResult, PreviewDispatchResult,
    RegisterUnitsResult, SerialUpload,
};
use crate::domain::catalog::ProductCategory;
use crate::domain::dealer::{Dealer, DealerNode};
use crate::domain::dispatch::{AddOutcome, DispatchDraft, SerialImportError, SerialSource};
use crate::domain::foundation::{ModelId, ValidationError};
use crate::domain::stock::{SerialNumber, StockScope};
use crate::ports::SheetReader;

// ═══════════════════════════════════════════════════════════════════════════
// Request DTOs
// ═══════════════════════════════════════════════════════════════════════════

/// Serial numbers in any of the shapes the dashboard sends.
///
/// The first field present wins, in this order: `serials`, `csv`, `rows`,
/// `text`, `serial`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SerialInput {
    /// An explicit selection list.
    #[serde(default)]
    pub serials: Option<Vec<String>>,
    /// Raw CSV file contents.
    #[serde(default)]
    pub csv: Option<String>,
    /// Pre-parsed spreadsheet rows.
    #[serde(default)]
    pub rows: Option<Vec<Vec<String>>>,
    /// Newline-delimited text.
    #[serde(default)]
    pub text: Option<String>,
    /// One scanned or typed serial.
    #[serde(default)]
    pub serial: Option<String>,
}

impl SerialInput {
    pub fn into_upload(self) -> SerialUpload {
        if let Some(serials) = self.serials {
            SerialUpload::text(serials.join("\n"))
        } else if let Some(csv) = self.csv {
            SerialUpload::Csv(csv.into_bytes())
        } else if let Some(rows) = self.rows {
            SerialUpload::rows(rows)
        } else if let Some(text) = self.text {
            SerialUpload::text(text)
        } else if let Some(serial) = self.serial {
            SerialUpload::single(serial)
        } else {
            SerialUpload::text(String::new())
        }
    }

    /// The input as a dispatch source. CSV is decoded into rows so the
    /// first-column rule and header skip apply.
    pub fn into_source(self, sheets: &dyn SheetReader) -> Result<SerialSource, SerialImportError> {
        match self.into_upload() {
            SerialUpload::Source(source) => Ok(source),
            SerialUpload::Csv(bytes) => Ok(SerialSource::Rows(sheets.read_rows(&bytes)?)),
        }
    }
}

/// Category and optional model, as query parameters or body fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScopeParams {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

impl ScopeParams {
    /// Blank category means the default (inverters); blank model means all.
    pub fn into_scope(self) -> Result<StockScope, ValidationError> {
        let category = match self.category.as_deref().map(str::trim) {
            None | Some("") => ProductCategory::default(),
            Some(raw) => raw.parse()?,
        };
        let mut scope = StockScope::category(category);
        if let Some(model) = self.model.filter(|m| !m.trim().is_empty()) {
            scope = scope.with_model(ModelId::new(model)?);
        }
        Ok(scope)
    }
}

/// The dispatch form, for both preview and submission.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchFormRequest {
    #[serde(default)]
    pub dealer_name: String,
    /// `YYYY-MM-DD`; blank means today.
    #[serde(default)]
    pub dispatch_date: String,
    #[serde(default)]
    pub remarks: Option<String>,
    /// Operator-entered dispatch number replacing the generated one.
    #[serde(default)]
    pub dispatch_number: Option<String>,
    #[serde(flatten)]
    pub scope: ScopeParams,
    #[serde(flatten)]
    pub input: SerialInput,
}

impl DispatchFormRequest {
    pub fn into_parts(self) -> Result<(DispatchDraft, StockScope, SerialInput), ValidationError> {
        let scope = self.scope.into_scope()?;
        let draft = DispatchDraft {
            dealer_name: self.dealer_name,
            dispatch_date: self.dispatch_date,
            remarks: self.remarks,
            dispatch_number_override: self.dispatch_number,
        };
        Ok((draft, scope, self.input))
    }
}

/// Serials to merge into the current selection.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportSerialsRequest {
    #[serde(flatten)]
    pub scope: ScopeParams,
    /// The selection already on screen.
    #[serde(default)]
    pub existing: Vec<String>,
    #[serde(flatten)]
    pub input: SerialInput,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUnitsRequest {
    #[serde(default)]
    pub model_id: Option<String>,
    #[serde(flatten)]
    pub input: SerialInput,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DealerSearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Response DTOs
// ═══════════════════════════════════════════════════════════════════════════

/// Error body returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable message, passed through from the backend when it sent one.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

fn serial_strings(serials: Vec<SerialNumber>) -> Vec<String> {
    serials.into_iter().map(SerialNumber::into_inner).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct PreviewResponse {
    pub dispatch_number: String,
    pub valid: Vec<String>,
    pub rejected: Vec<String>,
    pub duplicates: usize,
    pub can_submit: bool,
    /// Why the form cannot be submitted yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocker: Option<ErrorResponse>,
}

impl From<PreviewDispatchResult> for PreviewResponse {
    fn from(result: PreviewDispatchResult) -> Self {
        let can_submit = result.can_submit();
        let blocker = result
            .blocker
            .map(|err| ErrorResponse::new(err.code().to_string(), err.to_string()));
        Self {
            dispatch_number: result.dispatch_number.into_inner(),
            valid: serial_strings(result.reconciliation.valid),
            rejected: result.reconciliation.rejected,
            duplicates: result.reconciliation.duplicates,
            can_submit,
            blocker,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DispatchResponse {
    pub id: String,
    pub dispatch_number: String,
    pub dealer_name: String,
    pub dispatch_date: String,
    pub serial_numbers: Vec<String>,
    /// Candidates left out because they were not in stock.
    pub rejected: Vec<String>,
    pub duplicates: usize,
}

impl From<CreateDispatchResult> for DispatchResponse {
    fn from(result: CreateDispatchResult) -> Self {
        let record = result.record;
        Self {
            id: record.id.to_string(),
            dispatch_number: record.dispatch_number,
            dealer_name: record.dealer_name,
            dispatch_date: record.dispatch_date,
            serial_numbers: serial_strings(record.serial_numbers),
            rejected: result.rejected,
            duplicates: result.duplicates,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportSerialsResponse {
    pub selection: Vec<String>,
    pub added: usize,
    pub duplicates: usize,
    pub rejected: Vec<String>,
    /// `added`, `already_selected`, `not_in_stock` or `ignored`, for single entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<&'static str>,
}

impl From<ImportSerialsResult> for ImportSerialsResponse {
    fn from(result: ImportSerialsResult) -> Self {
        let outcome = result.outcome.map(|outcome| match outcome {
            AddOutcome::Added(_) => "added",
            AddOutcome::AlreadySelected(_) => "already_selected",
            AddOutcome::NotInStock(_) => "not_in_stock",
            AddOutcome::Ignored => "ignored",
        });
        Self {
            selection: serial_strings(result.selection),
            added: result.added,
            duplicates: result.duplicates,
            rejected: result.rejected,
            outcome,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SerialListResponse {
    pub count: usize,
    pub serials: Vec<String>,
}

impl From<Vec<SerialNumber>> for SerialListResponse {
    fn from(serials: Vec<SerialNumber>) -> Self {
        Self {
            count: serials.len(),
            serials: serial_strings(serials),
        }
    }
}

/// A dealer at its depth in the tree.
#[derive(Debug, Clone, Serialize)]
pub struct FlatDealerResponse {
    pub id: String,
    pub name: String,
    pub depth: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DealerHierarchyResponse {
    pub total: usize,
    pub roots: Vec<DealerNode>,
    pub flat: Vec<FlatDealerResponse>,
}

impl From<DealerHierarchyView> for DealerHierarchyResponse {
    fn from(view: DealerHierarchyView) -> Self {
        let flat = view
            .flattened()
            .into_iter()
            .map(|entry| FlatDealerResponse {
                id: entry.dealer.id.to_string(),
                name: entry.dealer.name.clone(),
                depth: entry.depth,
            })
            .collect();
        Self {
            total: view.total,
            roots: view.roots,
            flat,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DealerSearchResponse {
    pub dealers: Vec<Dealer>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterUnitsResponse {
    pub model_id: String,
    pub registered: Vec<String>,
    pub already_registered: Vec<String>,
    pub duplicates: usize,
}

impl From<RegisterUnitsResult> for RegisterUnitsResponse {
    fn from(result: RegisterUnitsResult) -> Self {
        Self {
            model_id: result.model_id.to_string(),
            registered: serial_strings(result.registered),
            already_registered: serial_strings(result.already_registered),
            duplicates: result.duplicates,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
