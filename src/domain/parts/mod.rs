//! Parts domain module.
//!
//! Spare parts catalog and part dispatches.

mod part;

pub use part::{NewPart, Part, PartDispatchRequest, PartUpdate, PartsError};
