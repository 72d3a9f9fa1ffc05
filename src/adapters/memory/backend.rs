//! In-memory factory backend.
//!
//! Behaves like the real backend where the dispatch desk relies on it:
//! dispatching removes serials from available stock in the same step and
//! refuses serials that are no longer available, registration refuses
//! serials already in stock, and part dispatches draw down on-hand quantity.
//!
//! Used by the integration tests and by the server when no backend URL is
//! configured.
//!
//! # Example
//!
//! ```ignore
//! let backend = InMemoryFactoryBackend::new()
//!     .with_models(vec![model])
//!     .with_stock(vec![item]);
//!
//! let record = backend.create_dispatch(&request).await?;
//! assert_eq!(backend.stock_reads(), 0);
//! ```

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

use crate::domain::catalog::ModelRecord;
use crate::domain::dealer::{Dealer, DealerNode};
use crate::domain::dispatch::{DispatchRecord, DispatchRequest};
use crate::domain::foundation::{DispatchId, DomainError, ErrorCode, PartId};
use crate::domain::parts::{NewPart, Part, PartDispatchRequest, PartUpdate};
use crate::domain::stock::{RegistrationRequest, SerialNumber, StockItem};
use crate::ports::{
    DealerDirectory, DispatchGateway, InverterRegistry, ModelCatalog, PartsCatalog, StockReader,
};

#[derive(Debug, Default)]
struct BackendState {
    dealers: Vec<Dealer>,
    models: Vec<ModelRecord>,
    stock: Vec<StockItem>,
    parts: BTreeMap<PartId, Part>,
    dispatches: Vec<DispatchRecord>,
    part_dispatches: Vec<PartDispatchRequest>,
    next_id: u64,
}

impl BackendState {
    fn next_id(&mut self, kind: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", kind, self.next_id)
    }
}

#[derive(Debug, Default)]
struct ReadCounters {
    stock: AtomicUsize,
    models: AtomicUsize,
    dealers: AtomicUsize,
    parts: AtomicUsize,
}

/// Factory backend held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryFactoryBackend {
    state: RwLock<BackendState>,
    /// Returned from every call while set.
    force_error: RwLock<Option<DomainError>>,
    reads: ReadCounters,
}

impl InMemoryFactoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dealers(mut self, dealers: Vec<Dealer>) -> Self {
        self.state.get_mut().dealers.extend(dealers);
        self
    }

    pub fn with_models(mut self, models: Vec<ModelRecord>) -> Self {
        self.state.get_mut().models.extend(models);
        self
    }

    pub fn with_stock(mut self, items: Vec<StockItem>) -> Self {
        self.state.get_mut().stock.extend(items);
        self
    }

    pub fn with_parts(mut self, parts: Vec<Part>) -> Self {
        let state = self.state.get_mut();
        for part in parts {
            state.parts.insert(part.id.clone(), part);
        }
        self
    }

    /// Makes every call fail with `error` until [`clear_error`] is called.
    ///
    /// [`clear_error`]: InMemoryFactoryBackend::clear_error
    pub async fn fail_with(&self, error: DomainError) {
        *self.force_error.write().await = Some(error);
    }

    pub async fn clear_error(&self) {
        *self.force_error.write().await = None;
    }

    // === Test Helpers ===

    /// Number of times available stock was read.
    pub fn stock_reads(&self) -> usize {
        self.reads.stock.load(Ordering::SeqCst)
    }

    pub fn model_reads(&self) -> usize {
        self.reads.models.load(Ordering::SeqCst)
    }

    pub fn dealer_reads(&self) -> usize {
        self.reads.dealers.load(Ordering::SeqCst)
    }

    pub fn part_reads(&self) -> usize {
        self.reads.parts.load(Ordering::SeqCst)
    }

    /// Serials currently available, in numeric-aware order.
    pub async fn available_serials(&self) -> Vec<SerialNumber> {
        let mut serials: Vec<SerialNumber> = self
            .state
            .read()
            .await
            .stock
            .iter()
            .map(|item| item.serial_number.clone())
            .collect();
        serials.sort();
        serials
    }

    pub async fn dispatches(&self) -> Vec<DispatchRecord> {
        self.state.read().await.dispatches.clone()
    }

    pub async fn part_dispatches(&self) -> Vec<PartDispatchRequest> {
        self.state.read().await.part_dispatches.clone()
    }

    async fn check_forced_error(&self) -> Result<(), DomainError> {
        match self.force_error.read().await.clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn part_not_found(id: &PartId) -> DomainError {
    DomainError::new(ErrorCode::NotFound, "Part not found").with_detail("part_id", id.as_str())
}

#[async_trait]
impl DealerDirectory for InMemoryFactoryBackend {
    async fn list_dealers(&self) -> Result<Vec<Dealer>, DomainError> {
        self.check_forced_error().await?;
        self.reads.dealers.fetch_add(1, Ordering::SeqCst);
        Ok(self.state.read().await.dealers.clone())
    }

    async fn dealer_hierarchy(&self) -> Result<Vec<DealerNode>, DomainError> {
        self.check_forced_error().await?;
        self.reads.dealers.fetch_add(1, Ordering::SeqCst);
        let dealers = self.state.read().await.dealers.clone();
        Ok(DealerNode::build_forest(dealers))
    }
}

#[async_trait]
impl ModelCatalog for InMemoryFactoryBackend {
    async fn list_models(&self) -> Result<Vec<ModelRecord>, DomainError> {
        self.check_forced_error().await?;
        self.reads.models.fetch_add(1, Ordering::SeqCst);
        Ok(self.state.read().await.models.clone())
    }
}

#[async_trait]
impl StockReader for InMemoryFactoryBackend {
    async fn available_stock(&self) -> Result<Vec<StockItem>, DomainError> {
        self.check_forced_error().await?;
        self.reads.stock.fetch_add(1, Ordering::SeqCst);
        Ok(self.state.read().await.stock.clone())
    }
}

#[async_trait]
impl DispatchGateway for InMemoryFactoryBackend {
    async fn create_dispatch(&self, request: &DispatchRequest) -> Result<DispatchRecord, DomainError> {
        self.check_forced_error().await?;
        let mut state = self.state.write().await;

        if state
            .dispatches
            .iter()
            .any(|d| d.dispatch_number == request.dispatch_number.as_str())
        {
            return Err(DomainError::new(
                ErrorCode::BackendError,
                "Dispatch number already exists",
            ));
        }

        let available: HashSet<&SerialNumber> =
            state.stock.iter().map(|item| &item.serial_number).collect();
        let missing: Vec<&str> = request
            .serial_numbers
            .iter()
            .filter(|serial| !available.contains(serial))
            .map(SerialNumber::as_str)
            .collect();
        if !missing.is_empty() {
            return Err(DomainError::new(
                ErrorCode::BackendError,
                format!("Serial numbers not available: {}", missing.join(", ")),
            ));
        }

        let dispatched: HashSet<&SerialNumber> = request.serial_numbers.iter().collect();
        state
            .stock
            .retain(|item| !dispatched.contains(&item.serial_number));

        let id = DispatchId::new(state.next_id("dispatch"))?;
        let record = DispatchRecord {
            id,
            dispatch_number: request.dispatch_number.as_str().to_string(),
            dealer_name: request.dealer_name.clone(),
            dispatch_date: request.dispatch_date.clone(),
            serial_numbers: request.serial_numbers.clone(),
        };
        state.dispatches.push(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl InverterRegistry for InMemoryFactoryBackend {
    async fn register(&self, request: &RegistrationRequest) -> Result<Vec<SerialNumber>, DomainError> {
        self.check_forced_error().await?;
        let mut state = self.state.write().await;

        let category = state
            .models
            .iter()
            .find(|model| model.id == request.model_id)
            .map(ModelRecord::category)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::NotFound, "Model not found")
                    .with_detail("model_id", request.model_id.as_str())
            })?;

        let existing: HashSet<SerialNumber> = state
            .stock
            .iter()
            .map(|item| item.serial_number.clone())
            .collect();
        if let Some(taken) = request.serial_numbers.iter().find(|s| existing.contains(*s)) {
            return Err(DomainError::new(
                ErrorCode::BackendError,
                format!("Serial number {} is already registered", taken),
            ));
        }

        for serial in &request.serial_numbers {
            state.stock.push(StockItem::new(
                serial.clone(),
                request.model_id.clone(),
                category,
            ));
        }
        Ok(request.serial_numbers.clone())
    }
}

#[async_trait]
impl PartsCatalog for InMemoryFactoryBackend {
    async fn list_parts(&self) -> Result<Vec<Part>, DomainError> {
        self.check_forced_error().await?;
        self.reads.parts.fetch_add(1, Ordering::SeqCst);
        Ok(self.state.read().await.parts.values().cloned().collect())
    }

    async fn create_part(&self, part: &NewPart) -> Result<Part, DomainError> {
        self.check_forced_error().await?;
        let mut state = self.state.write().await;

        let id = PartId::new(state.next_id("part"))?;
        let created = Part {
            id: id.clone(),
            name: part.name.clone(),
            part_code: part.part_code.clone(),
            model_ref: part.model_ref.clone(),
            quantity: part.quantity,
        };
        state.parts.insert(id, created.clone());
        Ok(created)
    }

    async fn update_part(&self, id: &PartId, update: &PartUpdate) -> Result<Part, DomainError> {
        self.check_forced_error().await?;
        let mut state = self.state.write().await;

        let part = state.parts.get_mut(id).ok_or_else(|| part_not_found(id))?;
        update.apply_to(part);
        Ok(part.clone())
    }

    async fn delete_part(&self, id: &PartId) -> Result<(), DomainError> {
        self.check_forced_error().await?;
        self.state
            .write()
            .await
            .parts
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| part_not_found(id))
    }

    async fn create_part_dispatch(&self, request: &PartDispatchRequest) -> Result<(), DomainError> {
        self.check_forced_error().await?;
        let mut state = self.state.write().await;

        let part = state
            .parts
            .get_mut(&request.part_id)
            .ok_or_else(|| part_not_found(&request.part_id))?;
        if request.quantity > part.quantity {
            return Err(DomainError::new(
                ErrorCode::BackendError,
                format!("Only {} units of {} on hand", part.quantity, part.part_code),
            ));
        }
        part.quantity -= request.quantity;
        state.part_dispatches.push(request.clone());
        Ok(())
    }
}
