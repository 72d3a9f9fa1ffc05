//! Factory registration of new serial-numbered units.

use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

use super::SerialNumber;
use crate::domain::dispatch::SerialImportError;
use crate::domain::foundation::{DomainError, ErrorCode, ModelId, ValidationError};

/// Serials sorted into what can be registered and what cannot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationPlan {
    /// New serials, deduplicated, in numeric-aware order.
    pub new_serials: Vec<SerialNumber>,
    /// Serials already present in stock.
    pub already_registered: Vec<SerialNumber>,
    /// Repeats within the batch.
    pub duplicates: usize,
}

impl RegistrationPlan {
    /// Splits candidates against the serials already known to stock.
    pub fn build<I, S>(candidates: I, existing: &HashSet<SerialNumber>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fresh = BTreeSet::new();
        let mut known = BTreeSet::new();
        let mut duplicates = 0;

        for candidate in candidates {
            let Ok(serial) = SerialNumber::new(candidate) else {
                continue;
            };
            let target = if existing.contains(&serial) {
                &mut known
            } else {
                &mut fresh
            };
            if !target.insert(serial) {
                duplicates += 1;
            }
        }

        Self {
            new_serials: fresh.into_iter().collect(),
            already_registered: known.into_iter().collect(),
            duplicates,
        }
    }
}

/// Units to register against one model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRequest {
    pub model_id: ModelId,
    pub serial_numbers: Vec<SerialNumber>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("Model is required")]
    MissingModel,

    #[error("No new serial numbers to register ({already_registered} already registered)")]
    NoNewSerials { already_registered: usize },

    #[error("Unknown model: {0}")]
    UnknownModel(ModelId),

    #[error(transparent)]
    Import(#[from] SerialImportError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Backend(String),
}

impl RegistrationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RegistrationError::MissingModel => ErrorCode::EmptyField,
            RegistrationError::NoNewSerials { .. } => ErrorCode::NoNewSerials,
            RegistrationError::UnknownModel(_) => ErrorCode::ModelNotFound,
            RegistrationError::Import(_) => ErrorCode::ImportFailed,
            RegistrationError::Validation(_) => ErrorCode::ValidationFailed,
            RegistrationError::Backend(_) => ErrorCode::BackendError,
        }
    }
}

impl From<DomainError> for RegistrationError {
    fn from(err: DomainError) -> Self {
        RegistrationError::Backend(err.message)
    }
}
