//! Stock domain module.
//!
//! Serial numbers, available stock items, category/model scoping, the
//! stock overview counts and registration of new units.

mod item;
mod overview;
mod registration;
mod serial;

pub use item::{ScopedStock, StockItem, StockScope};
pub use overview::{CategoryStock, ModelStock, StockOverview};
pub use registration::{RegistrationError, RegistrationPlan, RegistrationRequest};
pub use serial::{natural_cmp, sort_serials, SerialNumber};
