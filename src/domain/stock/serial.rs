//! Serial number value object and numeric-aware ordering.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Opaque token identifying one physical unit.
///
/// Equality is exact string equality. Ordering is numeric-aware
/// (`SN2 < SN10`), which is the order serials are displayed and the order
/// the dispatch number generator expects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerialNumber(String);

impl SerialNumber {
    /// Creates a serial number from raw input, trimming whitespace.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("serial_number"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SerialNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SerialNumber::new(value)
    }
}

impl From<SerialNumber> for String {
    fn from(serial: SerialNumber) -> Self {
        serial.0
    }
}

impl Ord for SerialNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        natural_cmp(&self.0, &other.0)
    }
}

impl PartialOrd for SerialNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Chunk<'a> {
    // Digit runs sort before text; compared by magnitude, then by the
    // zero-stripped digits.
    Number { len: usize, digits: &'a str },
    Text(String),
}

fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let bytes = s.as_bytes();

    while start < s.len() {
        let is_digit = bytes[start].is_ascii_digit();
        let mut end = start;
        // Runs only break on ASCII digit bytes, which are always char
        // boundaries.
        while end < s.len() && bytes[end].is_ascii_digit() == is_digit {
            end += 1;
        }

        let run = &s[start..end];
        if is_digit {
            let digits = run.trim_start_matches('0');
            out.push(Chunk::Number {
                len: digits.len(),
                digits,
            });
        } else {
            out.push(Chunk::Text(run.to_lowercase()));
        }
        start = end;
    }

    out
}

/// Numeric-aware, case-insensitive comparison of two serial strings.
///
/// Digit runs compare by value, text runs case-insensitively. Strings that
/// tie under those rules fall back to plain byte order so the result is a
/// total order consistent with string equality.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    chunks(a).cmp(&chunks(b)).then_with(|| a.cmp(b))
}

/// Sorts serials in place using [`natural_cmp`].
pub fn sort_serials(serials: &mut [SerialNumber]) {
    serials.sort();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sn(s: &str) -> SerialNumber {
        SerialNumber::new(s).unwrap()
    }

    #[test]
    fn new_trims_whitespace() {
        assert_eq!(sn("  INV001 \t").as_str(), "INV001");
    }

    #[test]
    fn blank_serial_is_rejected() {
        assert!(SerialNumber::new("   ").is_err());
    }

    #[test]
    fn digits_compare_by_value() {
        assert!(sn("SN2") < sn("SN10"));
        assert!(sn("SN10") > sn("SN9"));
    }

    #[test]
    fn text_compares_case_insensitively() {
        assert_eq!(natural_cmp("abc1", "ABD1"), Ordering::Less);
    }

    #[test]
    fn ties_fall_back_to_byte_order() {
        assert_eq!(natural_cmp("sn01", "sn1"), Ordering::Less);
        assert_eq!(natural_cmp("SN1", "sn1"), Ordering::Less);
        assert_eq!(natural_cmp("SN1", "SN1"), Ordering::Equal);
    }

    #[test]
    fn digits_sort_before_letters() {
        assert!(sn("1A") < sn("A1"));
    }

    #[test]
    fn sort_serials_orders_numerically() {
        let mut serials = vec![sn("X10"), sn("X2"), sn("X1")];
        sort_serials(&mut serials);
        let sorted: Vec<_> = serials.iter().map(SerialNumber::as_str).collect();
        assert_eq!(sorted, vec!["X1", "X2", "X10"]);
    }

    #[test]
    fn handles_multibyte_text() {
        assert_eq!(natural_cmp("Zé1", "Zé2"), Ordering::Less);
    }

    #[test]
    fn deserialization_validates() {
        assert!(serde_json::from_str::<SerialNumber>("\"  \"").is_err());
        assert_eq!(
            serde_json::from_str::<SerialNumber>("\" A1 \"").unwrap().as_str(),
            "A1"
        );
    }
}
