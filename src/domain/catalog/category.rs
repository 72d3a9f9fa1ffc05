//! Product category tag.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

const BATTERY_MARKERS: &[&str] = &["battery", "lithium", "lifepo"];
const VFD_MARKERS: &[&str] = &["vfd", "variable frequency", "drive"];

/// Product family a unit belongs to.
///
/// The backend does not store this explicitly; it is derived from the
/// free-text metadata of the model (see [`ProductCategory::classify`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    #[default]
    Inverter,
    Battery,
    Vfd,
}

impl ProductCategory {
    /// All categories, in display order.
    pub const ALL: [ProductCategory; 3] = [
        ProductCategory::Inverter,
        ProductCategory::Battery,
        ProductCategory::Vfd,
    ];

    /// Classifies model metadata text.
    ///
    /// Battery markers win over VFD markers; anything unrecognised is an
    /// inverter.
    pub fn classify<'a>(texts: impl IntoIterator<Item = &'a str>) -> Self {
        let haystack = texts
            .into_iter()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ");

        if BATTERY_MARKERS.iter().any(|m| haystack.contains(m)) {
            ProductCategory::Battery
        } else if VFD_MARKERS.iter().any(|m| haystack.contains(m)) {
            ProductCategory::Vfd
        } else {
            ProductCategory::Inverter
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Inverter => "inverter",
            ProductCategory::Battery => "battery",
            ProductCategory::Vfd => "vfd",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inverter" | "inverters" => Ok(ProductCategory::Inverter),
            "battery" | "batteries" => Ok(ProductCategory::Battery),
            "vfd" | "vfds" => Ok(ProductCategory::Vfd),
            other => Err(ValidationError::invalid_format(
                "category",
                format!("unknown product category '{}'", other),
            )),
        }
    }
}
