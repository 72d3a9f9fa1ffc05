//! Product model record.

use serde::{Deserialize, Serialize};

use super::ProductCategory;
use crate::domain::foundation::ModelId;

/// A model in the factory catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRecord {
    pub id: ModelId,
    pub brand: String,
    pub product_line: String,
    pub variant: String,
    pub model_code: String,
    /// Free-text power hint, e.g. "5kW" or "150Ah".
    pub power_rating: Option<String>,
}

impl ModelRecord {
    /// Category derived from the model metadata.
    pub fn category(&self) -> ProductCategory {
        ProductCategory::classify([
            self.brand.as_str(),
            self.product_line.as_str(),
            self.variant.as_str(),
            self.model_code.as_str(),
        ])
    }

    /// Human readable label: "Brand ProductLine Variant (CODE)".
    pub fn label(&self) -> String {
        let name = [&self.brand, &self.product_line, &self.variant]
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        match self.model_code.trim() {
            "" => name,
            code if name.is_empty() => code.to_string(),
            code => format!("{} ({})", name, code),
        }
    }
}
