//! SheetReader port - uploaded spreadsheet decoding.

use crate::domain::dispatch::SerialImportError;

/// Decodes an uploaded file into rows of cell text.
///
/// Implementations return every row, header included; the header heuristic
/// belongs to the domain. A decoding failure yields no rows at all.
pub trait SheetReader: Send + Sync {
    fn read_rows(&self, bytes: &[u8]) -> Result<Vec<Vec<String>>, SerialImportError>;
}
