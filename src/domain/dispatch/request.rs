//! Dispatch draft, the request submitted to the backend, and its record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{DispatchError, DispatchNumber, DispatchPrefix};
use crate::domain::foundation::DispatchId;
use crate::domain::stock::SerialNumber;

/// Form fields of a dispatch before serials are reconciled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DispatchDraft {
    pub dealer_name: String,
    /// `YYYY-MM-DD`.
    pub dispatch_date: String,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub dispatch_number_override: Option<String>,
}

impl DispatchDraft {
    /// Dealer name and date must be present before anything else runs.
    pub fn check_required(&self) -> Result<(), DispatchError> {
        if self.dealer_name.trim().is_empty() {
            return Err(DispatchError::MissingField("Dealer name"));
        }
        if self.dispatch_date.trim().is_empty() {
            return Err(DispatchError::MissingField("Dispatch date"));
        }
        Ok(())
    }

    /// The number shown in the preview and sent on submission.
    pub fn dispatch_number(
        &self,
        prefix: &DispatchPrefix,
        serials: &[SerialNumber],
        today: NaiveDate,
    ) -> DispatchNumber {
        let generated = DispatchNumber::generate(prefix, &self.dispatch_date, serials, today);
        DispatchNumber::resolve(self.dispatch_number_override.as_deref(), generated)
    }

    /// Builds the request from reconciled serials.
    ///
    /// `serials` must be the valid subset in display order.
    pub fn into_request(
        self,
        prefix: &DispatchPrefix,
        serials: Vec<SerialNumber>,
        today: NaiveDate,
    ) -> Result<DispatchRequest, DispatchError> {
        self.check_required()?;
        if serials.is_empty() {
            return Err(DispatchError::NoValidSerials { rejected: 0 });
        }

        let dispatch_number = self.dispatch_number(prefix, &serials, today);
        let remarks = self
            .remarks
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());

        Ok(DispatchRequest {
            dispatch_number,
            dealer_name: self.dealer_name.trim().to_string(),
            dispatch_date: self.dispatch_date.trim().to_string(),
            remarks,
            serial_numbers: serials,
        })
    }
}

/// A dispatch ready for submission. Only contains serials that were in the
/// available stock when it was built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchRequest {
    pub dispatch_number: DispatchNumber,
    pub dealer_name: String,
    pub dispatch_date: String,
    pub remarks: Option<String>,
    pub serial_numbers: Vec<SerialNumber>,
}

/// The backend's acknowledgement of a created dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchRecord {
    pub id: DispatchId,
    pub dispatch_number: String,
    pub dealer_name: String,
    pub dispatch_date: String,
    pub serial_numbers: Vec<SerialNumber>,
}
