//! Catalog domain module.
//!
//! Product models and the category tag derived from their metadata.

mod category;
mod model;

pub use category::ProductCategory;
pub use model::ModelRecord;
