//! Dispatch number generation.
//!
//! A dispatch number is `prefix + DDMMYY + suffix`, where the suffix is taken
//! from the serials being dispatched. It is a naming convention only: two
//! dispatches can produce the same number and nothing here detects that.
//!
//! The same function computes the preview shown to the operator and the
//! number submitted with the dispatch, so the two cannot diverge.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::stock::SerialNumber;

const EMPTY_SUFFIX: &str = "0001";
const HEAD_DEFAULT: &str = "001";
const TAIL_DEFAULT: &str = "999";

/// Short alphabetic namespace derived from the operator's display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DispatchPrefix(String);

impl DispatchPrefix {
    /// Derives a prefix from a display name.
    ///
    /// Multi-word names use the initials of the first three words
    /// ("Sun Light" -> "SL"); a single word uses its first two letters
    /// ("Factory" -> "FA"). Names without letters use `fallback`.
    pub fn from_display_name(name: &str, fallback: &str) -> Self {
        let words: Vec<&str> = name
            .split(|c: char| !c.is_alphabetic())
            .filter(|w| !w.is_empty())
            .collect();

        let prefix: String = match words.as_slice() {
            [] => fallback.trim().to_string(),
            [word] => word.chars().take(2).collect(),
            many => many.iter().take(3).filter_map(|w| w.chars().next()).collect(),
        };

        Self(prefix.to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DispatchPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A generated or operator-supplied dispatch number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DispatchNumber(String);

impl DispatchNumber {
    /// Builds the dispatch number for the given inputs.
    ///
    /// `date_iso` is `YYYY-MM-DD`; when blank, `today` is used instead. A
    /// non-blank date that does not split into three numeric parts yields an
    /// empty date segment. `serials` must already be in display order.
    pub fn generate(
        prefix: &DispatchPrefix,
        date_iso: &str,
        serials: &[SerialNumber],
        today: NaiveDate,
    ) -> Self {
        let date_segment = if date_iso.trim().is_empty() {
            date_segment(&today.format("%Y-%m-%d").to_string())
        } else {
            date_segment(date_iso)
        };

        Self(format!(
            "{}{}{}",
            prefix.as_str(),
            date_segment,
            serial_suffix(serials)
        ))
    }

    /// Same as [`DispatchNumber::generate`] with the local calendar date as
    /// the fallback.
    pub fn generate_today(prefix: &DispatchPrefix, date_iso: &str, serials: &[SerialNumber]) -> Self {
        Self::generate(prefix, date_iso, serials, Local::now().date_naive())
    }

    /// Picks the operator override when it is not blank, otherwise the
    /// generated number.
    pub fn resolve(override_number: Option<&str>, generated: DispatchNumber) -> Self {
        match override_number.map(str::trim) {
            Some(number) if !number.is_empty() => Self(number.to_string()),
            _ => generated,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DispatchNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `YYYY-MM-DD` -> `DDMMYY`, or `""` when the date is malformed or not a
/// calendar date. Month and day may omit their leading zero.
pub fn date_segment(date_iso: &str) -> String {
    let parts: Vec<&str> = date_iso.trim().split('-').collect();
    let &[year, month, day] = parts.as_slice() else {
        return String::new();
    };

    let numeric = |p: &str| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit());
    if !(numeric(year) && numeric(month) && numeric(day)) {
        return String::new();
    }

    let date = match (year.parse(), month.parse(), day.parse()) {
        (Ok(y), Ok(m), Ok(d)) => NaiveDate::from_ymd_opt(y, m, d),
        _ => None,
    };
    match date {
        Some(date) => date.format("%d%m%y").to_string(),
        None => String::new(),
    }
}

fn serial_suffix(serials: &[SerialNumber]) -> String {
    match serials {
        [] => EMPTY_SUFFIX.to_string(),
        [only] => {
            let tail = last_n(&alnum(only.as_str()), 4);
            if !tail.is_empty() {
                return tail;
            }
            let raw_tail = last_n(only.as_str(), 4);
            if raw_tail.is_empty() {
                EMPTY_SUFFIX.to_string()
            } else {
                raw_tail
            }
        }
        [first, .., last] => {
            let head = first_n(&alnum(first.as_str()), 3);
            let tail = last_n(&alnum(last.as_str()), 3);
            format!(
                "{}{}",
                if head.is_empty() { HEAD_DEFAULT } else { head.as_str() },
                if tail.is_empty() { TAIL_DEFAULT } else { tail.as_str() }
            )
        }
    }
}

fn alnum(s: &str) -> String {
    s.chars().filter(char::is_ascii_alphanumeric).collect()
}

fn first_n(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

fn last_n(s: &str, n: usize) -> String {
    let count = s.chars().count();
    s.chars().skip(count.saturating_sub(n)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefix() -> DispatchPrefix {
        DispatchPrefix::from_display_name("Sun Light", "FD")
    }

    fn serials(raw: &[&str]) -> Vec<SerialNumber> {
        raw.iter().map(|s| SerialNumber::new(s).unwrap()).collect()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
    }

    #[test]
    fn single_serial_uses_last_four_alnum_chars() {
        let number = DispatchNumber::generate(&prefix(), "2024-05-09", &serials(&["ABC1234"]), today());
        assert_eq!(number.as_str(), "SL0905241234");
    }

    #[test]
    fn multiple_serials_use_head_of_first_and_tail_of_last() {
        let number =
            DispatchNumber::generate(&prefix(), "2024-05-09", &serials(&["A001", "X999"]), today());
        assert_eq!(number.as_str(), "SL090524A00999");
    }

    #[test]
    fn no_serials_use_default_suffix() {
        let number = DispatchNumber::generate(&prefix(), "2024-05-09", &[], today());
        assert_eq!(number.as_str(), "SL0905240001");
    }

    #[test]
    fn blank_date_substitutes_fallback_date() {
        let number = DispatchNumber::generate(&prefix(), "", &[], today());
        assert_eq!(number.as_str(), "SL3101250001");
    }

    #[test]
    fn malformed_date_degrades_to_empty_segment() {
        let number = DispatchNumber::generate(&prefix(), "09/05/2024", &[], today());
        assert_eq!(number.as_str(), "SL0001");
        assert_eq!(date_segment("2024-05"), "");
        assert_eq!(date_segment("2024-xx-09"), "");
        assert_eq!(date_segment("2024--09"), "");
    }

    #[test]
    fn short_components_are_zero_padded() {
        assert_eq!(date_segment("2024-5-9"), "090524");
    }

    #[test]
    fn impossible_calendar_dates_have_no_segment() {
        assert_eq!(date_segment("2024-13-45"), "");
        assert_eq!(date_segment("2024-05-123"), "");
        assert_eq!(date_segment("2023-02-29"), "");
        assert_eq!(date_segment("2024-02-29"), "290224");
    }

    #[test]
    fn punctuation_is_stripped_before_slicing() {
        let number =
            DispatchNumber::generate(&prefix(), "2024-05-09", &serials(&["AB-12/34"]), today());
        assert_eq!(number.as_str(), "SL0905241234");
    }

    #[test]
    fn short_single_serial_uses_what_it_has() {
        let number = DispatchNumber::generate(&prefix(), "2024-05-09", &serials(&["7"]), today());
        assert_eq!(number.as_str(), "SL0905247");
    }

    #[test]
    fn punctuation_only_single_serial_falls_back_to_raw_tail() {
        let number =
            DispatchNumber::generate(&prefix(), "2024-05-09", &serials(&["--/--"]), today());
        assert_eq!(number.as_str(), "SL090524-/--");
    }

    #[test]
    fn punctuation_only_multi_serials_use_defaults() {
        let number =
            DispatchNumber::generate(&prefix(), "2024-05-09", &serials(&["--", "##"]), today());
        assert_eq!(number.as_str(), "SL090524001999");
    }

    #[test]
    fn generation_is_deterministic() {
        let input = serials(&["INV-0001", "INV-0042", "INV-0100"]);
        let a = DispatchNumber::generate(&prefix(), "2024-12-01", &input, today());
        let b = DispatchNumber::generate(&prefix(), "2024-12-01", &input, today());
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "SL011224INV100");
    }

    #[test]
    fn override_replaces_generated_number() {
        let generated = DispatchNumber::generate(&prefix(), "2024-05-09", &[], today());
        assert_eq!(
            DispatchNumber::resolve(Some("  INV/2024/17 "), generated.clone()).as_str(),
            "INV/2024/17"
        );
        assert_eq!(DispatchNumber::resolve(Some("  "), generated.clone()), generated);
        assert_eq!(DispatchNumber::resolve(None, generated.clone()), generated);
    }

    #[test]
    fn prefix_from_multi_word_name_uses_initials() {
        assert_eq!(DispatchPrefix::from_display_name("sun light", "FD").as_str(), "SL");
        assert_eq!(
            DispatchPrefix::from_display_name("North-East Power Systems Ltd", "FD").as_str(),
            "NEP"
        );
    }

    #[test]
    fn prefix_from_single_word_uses_first_two_letters() {
        assert_eq!(DispatchPrefix::from_display_name("factory", "FD").as_str(), "FA");
    }

    #[test]
    fn prefix_without_letters_uses_fallback() {
        assert_eq!(DispatchPrefix::from_display_name("1234", "fd").as_str(), "FD");
    }
}
