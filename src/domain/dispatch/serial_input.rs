//! Raw serial input sources.
//!
//! Operators enter serials one at a time (often from a barcode scanner), paste
//! a newline-delimited list, or upload a spreadsheet whose first column holds
//! the serials. All sources normalize the same way: trim, drop blanks.

use serde::Deserialize;

/// Where a batch of candidate serials came from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "source", content = "value", rename_all = "snake_case")]
pub enum SerialSource {
    /// One token from the single-entry field or a scanner.
    Single(String),
    /// Newline-delimited free text.
    Bulk(String),
    /// Spreadsheet rows; the first column is the serial.
    Rows(Vec<Vec<String>>),
}

impl SerialSource {
    /// Normalized candidate serials, in input order. Duplicates are kept;
    /// reconciliation counts them.
    pub fn candidates(&self) -> Vec<String> {
        match self {
            SerialSource::Single(value) => normalize(std::iter::once(value.as_str())),
            SerialSource::Bulk(text) => candidates_from_text(text),
            SerialSource::Rows(rows) => candidates_from_rows(rows),
        }
    }
}

/// One candidate per non-blank line.
pub fn candidates_from_text(text: &str) -> Vec<String> {
    normalize(text.lines())
}

/// First cell of every row, skipping row 0 when it looks like a header.
pub fn candidates_from_rows<R: AsRef<[String]>>(rows: &[R]) -> Vec<String> {
    let skip = match rows.first() {
        Some(first) if is_header_row(first.as_ref()) => 1,
        _ => 0,
    };

    normalize(
        rows.iter()
            .skip(skip)
            .filter_map(|row| row.as_ref().first().map(String::as_str)),
    )
}

/// A header row has "serial" or "number" in its first cell.
pub fn is_header_row(row: &[String]) -> bool {
    row.first().map_or(false, |cell| {
        let cell = cell.to_lowercase();
        cell.contains("serial") || cell.contains("number")
    })
}

fn normalize<'a>(tokens: impl Iterator<Item = &'a str>) -> Vec<String> {
    tokens
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
