//! Stock query handlers.

mod get_stock_overview;
mod list_available_serials;

pub use get_stock_overview::{GetStockOverviewHandler, GetStockOverviewQuery};
pub use list_available_serials::{ListAvailableSerialsHandler, ListAvailableSerialsQuery};
