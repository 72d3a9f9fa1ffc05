//! Spare parts catalog records and part dispatches.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ModelId, PartId, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub id: PartId,
    pub name: String,
    pub part_code: String,
    /// Model the part belongs to, if it is model-specific.
    pub model_ref: Option<ModelId>,
    /// Units on hand.
    pub quantity: u32,
}

/// Fields for creating a part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPart {
    pub name: String,
    pub part_code: String,
    #[serde(default)]
    pub model_ref: Option<ModelId>,
    #[serde(default)]
    pub quantity: u32,
}

impl NewPart {
    /// Trims text fields and checks required ones.
    pub fn validated(self) -> Result<Self, PartsError> {
        let name = self.name.trim().to_string();
        let part_code = self.part_code.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name").into());
        }
        if part_code.is_empty() {
            return Err(ValidationError::empty_field("part_code").into());
        }
        Ok(Self {
            name,
            part_code,
            ..self
        })
    }
}

/// Partial update of a part; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_ref: Option<ModelId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl PartUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.part_code.is_none()
            && self.model_ref.is_none()
            && self.quantity.is_none()
    }

    /// Rejects blanked-out required fields and empty updates.
    pub fn validated(self) -> Result<Self, PartsError> {
        if self.is_empty() {
            return Err(ValidationError::empty_field("update").into());
        }
        let trim_required = |value: Option<String>, field: &'static str| match value {
            Some(v) if v.trim().is_empty() => Err(ValidationError::empty_field(field)),
            other => Ok(other.map(|v| v.trim().to_string())),
        };
        Ok(Self {
            name: trim_required(self.name, "name")?,
            part_code: trim_required(self.part_code, "part_code")?,
            ..self
        })
    }

    /// Applies the update to a part.
    pub fn apply_to(&self, part: &mut Part) {
        if let Some(name) = &self.name {
            part.name = name.clone();
        }
        if let Some(code) = &self.part_code {
            part.part_code = code.clone();
        }
        if let Some(model) = &self.model_ref {
            part.model_ref = Some(model.clone());
        }
        if let Some(quantity) = self.quantity {
            part.quantity = quantity;
        }
    }
}

/// A dispatch of spare parts to a dealer or service center.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartDispatchRequest {
    pub part_id: PartId,
    pub quantity: u32,
    /// Dealer or service center receiving the parts.
    pub recipient_name: String,
    /// `YYYY-MM-DD`.
    pub dispatch_date: String,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl PartDispatchRequest {
    /// Checks required fields and, when the part is known, that enough
    /// units are on hand.
    pub fn validated(self, part: Option<&Part>) -> Result<Self, PartsError> {
        if self.recipient_name.trim().is_empty() {
            return Err(ValidationError::empty_field("recipient_name").into());
        }
        if self.dispatch_date.trim().is_empty() {
            return Err(ValidationError::empty_field("dispatch_date").into());
        }
        if self.quantity == 0 {
            return Err(
                ValidationError::out_of_range("quantity", 1, i64::from(u32::MAX), 0).into(),
            );
        }
        if let Some(part) = part {
            if self.quantity > part.quantity {
                return Err(PartsError::InsufficientQuantity {
                    requested: self.quantity,
                    available: part.quantity,
                });
            }
        }
        Ok(Self {
            recipient_name: self.recipient_name.trim().to_string(),
            dispatch_date: self.dispatch_date.trim().to_string(),
            ..self
        })
    }
}

/// Parts catalog errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartsError {
    #[error("Part not found: {0}")]
    NotFound(PartId),

    #[error("Only {available} units on hand, {requested} requested")]
    InsufficientQuantity { requested: u32, available: u32 },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Backend(String),
}

impl PartsError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PartsError::NotFound(_) => ErrorCode::PartNotFound,
            PartsError::InsufficientQuantity { .. } => ErrorCode::OutOfRange,
            PartsError::Validation(_) => ErrorCode::ValidationFailed,
            PartsError::Backend(_) => ErrorCode::BackendError,
        }
    }
}

impl From<DomainError> for PartsError {
    fn from(err: DomainError) -> Self {
        PartsError::Backend(err.message)
    }
}
