//! Dealer domain module.
//!
//! Dealer records, the recursive dealer/sub-dealer tree and name search.

mod hierarchy;

pub use hierarchy::{search_dealers, Dealer, DealerNode, FlatDealer};
