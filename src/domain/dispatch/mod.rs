//! Dispatch domain module.
//!
//! The dispatch number generator and the serial reconciliation pass, plus
//! the draft/request types that carry their results to the backend.
//!
//! Everything here is pure. The only clock read is
//! `DispatchNumber::generate_today`.

mod errors;
mod number;
mod reconcile;
mod request;
mod serial_input;

pub use errors::{DispatchError, SerialImportError};
pub use number::{date_segment, DispatchNumber, DispatchPrefix};
pub use reconcile::{reconcile, AddOutcome, MergeReport, Reconciliation, SerialSelection};
pub use request::{DispatchDraft, DispatchRecord, DispatchRequest};
pub use serial_input::{candidates_from_rows, candidates_from_text, is_header_row, SerialSource};
