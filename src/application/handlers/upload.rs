//! Serial numbers as they arrive from the dashboard.

use crate::domain::dispatch::{candidates_from_rows, SerialImportError, SerialSource};
use crate::ports::SheetReader;

/// Raw serial input for import and registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerialUpload {
    /// Typed or pre-parsed input.
    Source(SerialSource),
    /// An uploaded CSV file.
    Csv(Vec<u8>),
}

impl SerialUpload {
    pub fn single(serial: impl Into<String>) -> Self {
        SerialUpload::Source(SerialSource::Single(serial.into()))
    }

    pub fn text(text: impl Into<String>) -> Self {
        SerialUpload::Source(SerialSource::Bulk(text.into()))
    }

    pub fn rows(rows: Vec<Vec<String>>) -> Self {
        SerialUpload::Source(SerialSource::Rows(rows))
    }

    /// True for the one-at-a-time entry path.
    pub fn is_single(&self) -> bool {
        matches!(self, SerialUpload::Source(SerialSource::Single(_)))
    }

    /// Normalized candidates in input order.
    ///
    /// A CSV that cannot be decoded yields an error and no candidates.
    pub fn candidates(&self, sheets: &dyn SheetReader) -> Result<Vec<String>, SerialImportError> {
        match self {
            SerialUpload::Source(source) => Ok(source.candidates()),
            SerialUpload::Csv(bytes) => {
                let rows = sheets.read_rows(bytes)?;
                Ok(candidates_from_rows(&rows))
            }
        }
    }
}

impl From<SerialSource> for SerialUpload {
    fn from(source: SerialSource) -> Self {
        SerialUpload::Source(source)
    }
}
