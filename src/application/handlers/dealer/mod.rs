//! Dealer query handlers.

mod get_dealer_hierarchy;
mod search_dealers;

pub use get_dealer_hierarchy::{
    DealerHierarchyView, GetDealerHierarchyHandler, GetDealerHierarchyQuery,
};
pub use search_dealers::{SearchDealersHandler, SearchDealersQuery};
