//! Ports for the factory backend's REST collaborators.
//!
//! The backend owns every record. These traits are the narrow, typed view
//! the dispatch desk needs of it; adapters translate to and from the wire.
//!
//! All methods return `DomainError`. A backend-side failure carries
//! `ErrorCode::BackendError` (or `NotFound`/`Unauthorized`) and the
//! backend's own message when it sent one.

use async_trait::async_trait;

use crate::domain::catalog::ModelRecord;
use crate::domain::dealer::{Dealer, DealerNode};
use crate::domain::dispatch::{DispatchRecord, DispatchRequest};
use crate::domain::foundation::{DomainError, PartId};
use crate::domain::parts::{NewPart, Part, PartDispatchRequest, PartUpdate};
use crate::domain::stock::{RegistrationRequest, SerialNumber, StockItem};

/// Dealer listings and the dealer/sub-dealer hierarchy.
#[async_trait]
pub trait DealerDirectory: Send + Sync {
    async fn list_dealers(&self) -> Result<Vec<Dealer>, DomainError>;

    /// The hierarchy as the backend reports it.
    async fn dealer_hierarchy(&self) -> Result<Vec<DealerNode>, DomainError>;
}

/// Product model catalog.
#[async_trait]
pub trait ModelCatalog: Send + Sync {
    async fn list_models(&self) -> Result<Vec<ModelRecord>, DomainError>;
}

/// Live factory stock.
#[async_trait]
pub trait StockReader: Send + Sync {
    /// Units registered at the factory and not yet dispatched.
    async fn available_stock(&self) -> Result<Vec<StockItem>, DomainError>;
}

/// Dispatch persistence.
#[async_trait]
pub trait DispatchGateway: Send + Sync {
    /// Persists a dispatch. The backend removes the dispatched serials from
    /// available stock atomically with this call.
    async fn create_dispatch(&self, request: &DispatchRequest) -> Result<DispatchRecord, DomainError>;
}

/// Factory registration of new units.
#[async_trait]
pub trait InverterRegistry: Send + Sync {
    /// Registers units; returns the serials the backend accepted.
    async fn register(&self, request: &RegistrationRequest) -> Result<Vec<SerialNumber>, DomainError>;
}

/// Spare parts catalog and part dispatches.
#[async_trait]
pub trait PartsCatalog: Send + Sync {
    async fn list_parts(&self) -> Result<Vec<Part>, DomainError>;

    async fn create_part(&self, part: &NewPart) -> Result<Part, DomainError>;

    async fn update_part(&self, id: &PartId, update: &PartUpdate) -> Result<Part, DomainError>;

    async fn delete_part(&self, id: &PartId) -> Result<(), DomainError>;

    async fn create_part_dispatch(&self, request: &PartDispatchRequest) -> Result<(), DomainError>;
}
