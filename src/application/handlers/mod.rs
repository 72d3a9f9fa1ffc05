//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod dealer;
pub mod dispatch;
pub mod parts;
pub mod registration;
pub mod stock;
pub mod upload;

#[cfg(test)]
pub(crate) mod test_support;

pub use dealer::{
    DealerHierarchyView, GetDealerHierarchyHandler, GetDealerHierarchyQuery, SearchDealersHandler,
    SearchDealersQuery,
};
pub use dispatch::{
    CreateDispatchCommand, CreateDispatchHandler, CreateDispatchResult, DispatchSettings,
    ImportSerialsCommand, ImportSerialsHandler, ImportSerialsResult, PreviewDispatchCommand,
    PreviewDispatchHandler, PreviewDispatchResult,
};
pub use parts::{
    CreatePartCommand, CreatePartHandler, DeletePartCommand, DeletePartHandler,
    DispatchPartCommand, DispatchPartHandler, ListPartsHandler, ListPartsQuery, UpdatePartCommand,
    UpdatePartHandler,
};
pub use registration::{RegisterUnitsCommand, RegisterUnitsHandler, RegisterUnitsResult};
pub use stock::{
    GetStockOverviewHandler, GetStockOverviewQuery, ListAvailableSerialsHandler,
    ListAvailableSerialsQuery,
};
pub use upload::SerialUpload;
