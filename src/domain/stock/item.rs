//! Available stock items and the category/model scope applied to them.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::SerialNumber;
use crate::domain::catalog::ProductCategory;
use crate::domain::foundation::ModelId;

/// A registered unit not yet consigned to any dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItem {
    pub serial_number: SerialNumber,
    pub model_ref: ModelId,
    pub category: ProductCategory,
}

impl StockItem {
    pub fn new(serial_number: SerialNumber, model_ref: ModelId, category: ProductCategory) -> Self {
        Self {
            serial_number,
            model_ref,
            category,
        }
    }
}

/// Operator-selected category, optionally narrowed to one model.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StockScope {
    pub category: ProductCategory,
    pub model: Option<ModelId>,
}

impl StockScope {
    pub fn category(category: ProductCategory) -> Self {
        Self {
            category,
            model: None,
        }
    }

    pub fn with_model(mut self, model: ModelId) -> Self {
        self.model = Some(model);
        self
    }

    /// Returns true if the item is offered under this scope.
    pub fn contains(&self, item: &StockItem) -> bool {
        item.category == self.category
            && self
                .model
                .as_ref()
                .map_or(true, |model| &item.model_ref == model)
    }

    /// Narrows a stock listing to this scope.
    pub fn apply<'a>(&self, items: impl IntoIterator<Item = &'a StockItem>) -> ScopedStock {
        let serials = items
            .into_iter()
            .filter(|item| self.contains(item))
            .map(|item| item.serial_number.clone())
            .collect();
        ScopedStock { serials }
    }
}

/// The set of serials dispatchable under a scope.
///
/// Built fresh from a stock read; never mutated locally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopedStock {
    serials: HashSet<SerialNumber>,
}

impl ScopedStock {
    pub fn contains(&self, serial: &SerialNumber) -> bool {
        self.serials.contains(serial)
    }

    pub fn len(&self) -> usize {
        self.serials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.serials.is_empty()
    }

    /// Serials in display order.
    pub fn sorted(&self) -> Vec<SerialNumber> {
        let mut serials: Vec<_> = self.serials.iter().cloned().collect();
        serials.sort();
        serials
    }
}

impl FromIterator<SerialNumber> for ScopedStock {
    fn from_iter<I: IntoIterator<Item = SerialNumber>>(iter: I) -> Self {
        Self {
            serials: iter.into_iter().collect(),
        }
    }
}
