//! CSV decoding of uploaded serial lists.

use crate::domain::dispatch::SerialImportError;
use crate::ports::SheetReader;

/// Reads CSV uploads into rows of trimmed cells.
///
/// Rows may have differing lengths. A leading UTF-8 BOM is ignored. Any
/// malformed record fails the whole upload.
#[derive(Debug, Clone)]
pub struct CsvSheetReader {
    delimiter: u8,
}

impl CsvSheetReader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Uses another field delimiter, e.g. `b';'` for some spreadsheet exports.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl Default for CsvSheetReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetReader for CsvSheetReader {
    fn read_rows(&self, bytes: &[u8]) -> Result<Vec<Vec<String>>, SerialImportError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| SerialImportError::Unreadable(format!("not UTF-8 text: {}", e)))?;
        let text = text.trim_start_matches('\u{FEFF}');

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| {
                tracing::warn!("Rejecting malformed CSV upload: {}", e);
                SerialImportError::Unreadable(e.to_string())
            })?;
            rows.push(record.iter().map(|cell| cell.trim().to_string()).collect());
        }

        if rows.is_empty() {
            return Err(SerialImportError::Empty);
        }

        tracing::debug!(rows = rows.len(), "Decoded CSV upload");
        Ok(rows)
    }
}
