//! Factory registration handlers.

mod register_units;

pub use register_units::{RegisterUnitsCommand, RegisterUnitsHandler, RegisterUnitsResult};
