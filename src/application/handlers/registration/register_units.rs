//! RegisterUnitsHandler - registers newly built units against a model.

use std::collections::HashSet;
use std::sync::Arc;

use crate::application::handlers::upload::SerialUpload;
use crate::domain::foundation::ModelId;
use crate::domain::stock::{RegistrationError, RegistrationPlan, RegistrationRequest, SerialNumber};
use crate::ports::{
    InverterRegistry, ModelCatalog, QueryInvalidator, QueryKey, SheetReader, StockReader,
};

#[derive(Debug, Clone)]
pub struct RegisterUnitsCommand {
    /// Model selected on the form; blank means none.
    pub model_id: Option<String>,
    pub upload: SerialUpload,
}

#[derive(Debug, Clone)]
pub struct RegisterUnitsResult {
    pub model_id: ModelId,
    /// Serials the backend accepted.
    pub registered: Vec<SerialNumber>,
    /// Serials skipped because they are already in stock.
    pub already_registered: Vec<SerialNumber>,
    pub duplicates: usize,
}

/// Handler for factory registration.
///
/// Serials already in stock and repeats within the batch are skipped. A
/// batch with nothing new is refused without calling the backend.
pub struct RegisterUnitsHandler {
    models: Arc<dyn ModelCatalog>,
    stock: Arc<dyn StockReader>,
    registry: Arc<dyn InverterRegistry>,
    invalidator: Arc<dyn QueryInvalidator>,
    sheets: Arc<dyn SheetReader>,
}

impl RegisterUnitsHandler {
    pub fn new(
        models: Arc<dyn ModelCatalog>,
        stock: Arc<dyn StockReader>,
        registry: Arc<dyn InverterRegistry>,
        invalidator: Arc<dyn QueryInvalidator>,
        sheets: Arc<dyn SheetReader>,
    ) -> Self {
        Self {
            models,
            stock,
            registry,
            invalidator,
            sheets,
        }
    }

    pub async fn handle(
        &self,
        cmd: RegisterUnitsCommand,
    ) -> Result<RegisterUnitsResult, RegistrationError> {
        // 1. Model and serials from the form
        let model_id = cmd
            .model_id
            .as_deref()
            .and_then(|raw| ModelId::new(raw.trim()).ok())
            .ok_or(RegistrationError::MissingModel)?;
        let candidates = cmd.upload.candidates(self.sheets.as_ref())?;

        let models = self.models.list_models().await?;
        if !models.iter().any(|model| model.id == model_id) {
            return Err(RegistrationError::UnknownModel(model_id));
        }

        // 2. Skip what stock already holds
        let existing: HashSet<SerialNumber> = self
            .stock
            .available_stock()
            .await?
            .into_iter()
            .map(|item| item.serial_number)
            .collect();
        let plan = RegistrationPlan::build(candidates, &existing);
        if plan.new_serials.is_empty() {
            return Err(RegistrationError::NoNewSerials {
                already_registered: plan.already_registered.len(),
            });
        }

        // 3. Register
        let request = RegistrationRequest {
            model_id: model_id.clone(),
            serial_numbers: plan.new_serials,
        };
        let registered = self.registry.register(&request).await.map_err(|e| {
            tracing::warn!(model_id = %model_id, error = %e, "Registration failed");
            RegistrationError::from(e)
        })?;

        self.invalidator.invalidate(QueryKey::FactoryStock).await;

        tracing::info!(
            model_id = %model_id,
            registered = registered.len(),
            skipped = plan.already_registered.len(),
            "Units registered"
        );

        Ok(RegisterUnitsResult {
            model_id,
            registered,
            already_registered: plan.already_registered,
            duplicates: plan.duplicates,
        })
    }
}
