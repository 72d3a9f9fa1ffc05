//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Backend Ports
//!
//! - `DealerDirectory`, `ModelCatalog`, `StockReader` - reads
//! - `DispatchGateway`, `InverterRegistry`, `PartsCatalog` - mutations
//!
//! ## Cross-cutting Ports
//!
//! - `SessionValidator` - bearer token to operator
//! - `QueryInvalidator` - invalidation of cached reads after mutations
//! - `SheetReader` - decoding of uploaded serial sheets

mod factory_backend;
mod query_cache;
mod session_validator;
mod sheet_reader;

pub use factory_backend::{
    DealerDirectory, DispatchGateway, InverterRegistry, ModelCatalog, PartsCatalog, StockReader,
};
pub use query_cache::{QueryInvalidator, QueryKey};
pub use session_validator::SessionValidator;
pub use sheet_reader::SheetReader;
