//! Dispatch handlers: preview, create, and serial import.

mod create_dispatch;
mod import_serials;
mod preview_dispatch;

pub use create_dispatch::{CreateDispatchCommand, CreateDispatchHandler, CreateDispatchResult};
pub use import_serials::{ImportSerialsCommand, ImportSerialsHandler, ImportSerialsResult};
pub use preview_dispatch::{PreviewDispatchCommand, PreviewDispatchHandler, PreviewDispatchResult};

use chrono::{Local, NaiveDate};

use crate::domain::dispatch::{DispatchError, DispatchPrefix};
use crate::domain::foundation::AuthenticatedUser;
use crate::domain::stock::{ScopedStock, StockScope};
use crate::ports::StockReader;

/// Settings shared by the dispatch handlers.
#[derive(Debug, Clone)]
pub struct DispatchSettings {
    /// Prefix used when the operator's name has no letters.
    pub default_prefix: String,
    /// Replaces the local calendar date as the fallback dispatch date.
    pub fixed_date: Option<NaiveDate>,
}

impl DispatchSettings {
    pub fn new(default_prefix: impl Into<String>) -> Self {
        Self {
            default_prefix: default_prefix.into(),
            fixed_date: None,
        }
    }

    pub fn with_fixed_date(mut self, date: NaiveDate) -> Self {
        self.fixed_date = Some(date);
        self
    }

    /// Operators without a display name get the default prefix.
    pub fn prefix_for(&self, operator: &AuthenticatedUser) -> DispatchPrefix {
        let name = operator.display_name.as_deref().unwrap_or_default();
        DispatchPrefix::from_display_name(name, &self.default_prefix)
    }

    pub fn today(&self) -> NaiveDate {
        self.fixed_date
            .unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Reads available stock and narrows it to the operator's scope.
async fn load_scoped(
    stock: &dyn StockReader,
    scope: &StockScope,
) -> Result<ScopedStock, DispatchError> {
    let items = stock.available_stock().await?;
    Ok(scope.apply(&items))
}
