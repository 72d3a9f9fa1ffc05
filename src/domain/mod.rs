//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, operator, errors)
//! - `catalog` - Product models and category tags
//! - `stock` - Serial numbers, available stock, scoping, registration
//! - `dispatch` - Dispatch numbering and serial reconciliation
//! - `dealer` - Dealer records and the dealer/sub-dealer tree
//! - `parts` - Spare parts catalog and part dispatches

pub mod catalog;
pub mod dealer;
pub mod dispatch;
pub mod foundation;
pub mod parts;
pub mod stock;
