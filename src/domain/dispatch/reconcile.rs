//! Serial reconciliation against the scoped available stock.
//!
//! A candidate is dispatchable only if it exactly matches a serial in the
//! currently loaded stock for the selected category/model. Everything else is
//! rejected and counted. Duplicates are folded into the selection.

use serde::Serialize;
use std::collections::BTreeSet;

use super::DispatchError;
use crate::domain::stock::{ScopedStock, SerialNumber};

/// Result of adding one serial through the interactive path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(SerialNumber),
    AlreadySelected(SerialNumber),
    NotInStock(String),
    /// Blank input; nothing happened.
    Ignored,
}

/// Counts from merging a batch into a selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub added: usize,
    pub duplicates: usize,
    pub rejected: Vec<String>,
}

impl MergeReport {
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }
}

/// The operator's current set of selected serials.
///
/// Set semantics: adding a serial twice keeps one copy. Iteration is in
/// numeric-aware order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerialSelection {
    serials: BTreeSet<SerialNumber>,
}

impl SerialSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single serial, reporting what happened.
    pub fn add_one(&mut self, raw: &str, stock: &ScopedStock) -> AddOutcome {
        let Ok(serial) = SerialNumber::new(raw) else {
            return AddOutcome::Ignored;
        };

        if !stock.contains(&serial) {
            return AddOutcome::NotInStock(serial.into_inner());
        }
        if self.serials.contains(&serial) {
            return AddOutcome::AlreadySelected(serial);
        }

        self.serials.insert(serial.clone());
        AddOutcome::Added(serial)
    }

    /// Merges a batch of candidates (set union over the valid ones).
    pub fn merge<I, S>(&mut self, candidates: I, stock: &ScopedStock) -> MergeReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = MergeReport::default();

        for candidate in candidates {
            match self.add_one(candidate.as_ref(), stock) {
                AddOutcome::Added(_) => report.added += 1,
                AddOutcome::AlreadySelected(_) => report.duplicates += 1,
                AddOutcome::NotInStock(raw) => report.rejected.push(raw),
                AddOutcome::Ignored => {}
            }
        }

        report
    }

    pub fn remove(&mut self, serial: &SerialNumber) -> bool {
        self.serials.remove(serial)
    }

    pub fn clear(&mut self) {
        self.serials.clear();
    }

    pub fn contains(&self, serial: &SerialNumber) -> bool {
        self.serials.contains(serial)
    }

    pub fn len(&self) -> usize {
        self.serials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.serials.is_empty()
    }

    /// Selected serials in numeric-aware order.
    pub fn to_vec(&self) -> Vec<SerialNumber> {
        self.serials.iter().cloned().collect()
    }
}

/// Outcome of reconciling a whole batch from scratch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    /// Accepted serials, deduplicated, in numeric-aware order.
    pub valid: Vec<SerialNumber>,
    /// Candidates not found in the scoped stock, in input order.
    pub rejected: Vec<String>,
    /// Valid candidates that repeated an earlier one.
    pub duplicates: usize,
}

impl Reconciliation {
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    pub fn has_valid(&self) -> bool {
        !self.valid.is_empty()
    }

    /// The valid subset, or `NoValidSerials` when there is none.
    pub fn require_valid(self) -> Result<Vec<SerialNumber>, DispatchError> {
        if self.valid.is_empty() {
            return Err(DispatchError::NoValidSerials {
                rejected: self.rejected.len(),
            });
        }
        Ok(self.valid)
    }
}

/// Reconciles candidates against the scoped stock.
pub fn reconcile<I, S>(candidates: I, stock: &ScopedStock) -> Reconciliation
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut selection = SerialSelection::new();
    let report = selection.merge(candidates, stock);

    Reconciliation {
        valid: selection.to_vec(),
        rejected: report.rejected,
        duplicates: report.duplicates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock(serials: &[&str]) -> ScopedStock {
        serials.iter().map(|s| SerialNumber::new(s).unwrap()).collect()
    }

    fn sn(s: &str) -> SerialNumber {
        SerialNumber::new(s).unwrap()
    }

    #[test]
    fn filters_serials_not_in_stock() {
        let result = reconcile(["S1", "S3"], &stock(&["S1", "S2"]));
        assert_eq!(result.valid, vec![sn("S1")]);
        assert_eq!(result.rejected_count(), 1);
        assert_eq!(result.rejected, vec!["S3".to_string()]);
    }

    #[test]
    fn adding_same_serial_twice_keeps_one() {
        let available = stock(&["S1"]);
        let mut selection = SerialSelection::new();

        assert_eq!(selection.add_one("S1", &available), AddOutcome::Added(sn("S1")));
        assert_eq!(
            selection.add_one(" S1 ", &available),
            AddOutcome::AlreadySelected(sn("S1"))
        );
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn merge_is_set_union() {
        let available = stock(&["S1", "S2", "S3"]);
        let mut selection = SerialSelection::new();
        selection.merge(["S1", "S2"], &available);

        let report = selection.merge(["S2", "S3", "S9"], &available);

        assert_eq!(report.added, 1);
        assert_eq!(report.duplicates, 1);
        assert_eq!(report.rejected, vec!["S9".to_string()]);
        assert_eq!(selection.to_vec(), vec![sn("S1"), sn("S2"), sn("S3")]);
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut selection = SerialSelection::new();
        assert_eq!(selection.add_one("  ", &stock(&["S1"])), AddOutcome::Ignored);
        assert!(selection.is_empty());
    }

    #[test]
    fn all_rejected_signals_no_valid_serials() {
        let result = reconcile(["X1", "X2"], &stock(&["S1"]));
        assert!(!result.has_valid());
        assert_eq!(
            result.require_valid(),
            Err(DispatchError::NoValidSerials { rejected: 2 })
        );
    }

    #[test]
    fn empty_input_signals_no_valid_serials() {
        let result = reconcile(Vec::<String>::new(), &stock(&["S1"]));
        assert_eq!(
            result.require_valid(),
            Err(DispatchError::NoValidSerials { rejected: 0 })
        );
    }

    #[test]
    fn valid_serials_come_back_in_numeric_order() {
        let result = reconcile(["SN10", "SN2", "SN10", "SN1"], &stock(&["SN1", "SN2", "SN10"]));
        assert_eq!(result.valid, vec![sn("SN1"), sn("SN2"), sn("SN10")]);
        assert_eq!(result.duplicates, 1);
    }

    #[test]
    fn remove_and_clear() {
        let available = stock(&["S1", "S2"]);
        let mut selection = SerialSelection::new();
        selection.merge(["S1", "S2"], &available);

        assert!(selection.remove(&sn("S1")));
        assert!(!selection.contains(&sn("S1")));
        selection.clear();
        assert!(selection.is_empty());
    }
}
