//! Available stock counts per category and per model.

use serde::Serialize;
use std::collections::HashMap;

use super::StockItem;
use crate::domain::catalog::{ModelRecord, ProductCategory};
use crate::domain::foundation::ModelId;

/// Count of available units for one model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelStock {
    pub model_id: ModelId,
    /// Catalog label, or the raw model id if the model is not in the catalog.
    pub label: String,
    pub category: ProductCategory,
    pub available: usize,
}

/// Count of available units for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStock {
    pub category: ProductCategory,
    pub available: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockOverview {
    pub total_available: usize,
    pub by_category: Vec<CategoryStock>,
    /// Sorted by available count (descending), then label.
    pub by_model: Vec<ModelStock>,
}

impl StockOverview {
    pub fn build(items: &[StockItem], models: &[ModelRecord]) -> Self {
        let catalog: HashMap<&ModelId, &ModelRecord> =
            models.iter().map(|model| (&model.id, model)).collect();

        let mut per_model: HashMap<&ModelId, (ProductCategory, usize)> = HashMap::new();
        for item in items {
            per_model
                .entry(&item.model_ref)
                .or_insert((item.category, 0))
                .1 += 1;
        }

        let by_category = ProductCategory::ALL
            .iter()
            .map(|category| CategoryStock {
                category: *category,
                available: items.iter().filter(|i| i.category == *category).count(),
            })
            .collect();

        let mut by_model: Vec<ModelStock> = per_model
            .into_iter()
            .map(|(model_id, (category, available))| ModelStock {
                model_id: model_id.clone(),
                label: catalog
                    .get(model_id)
                    .map(|model| model.label())
                    .unwrap_or_else(|| model_id.to_string()),
                category,
                available,
            })
            .collect();
        by_model.sort_by(|a, b| {
            b.available
                .cmp(&a.available)
                .then_with(|| a.label.cmp(&b.label))
        });

        Self {
            total_available: items.len(),
            by_category,
            by_model,
        }
    }
}
