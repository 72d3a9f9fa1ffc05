//! Starter data for a development server without a backend.

use crate::domain::catalog::ModelRecord;
use crate::domain::dealer::Dealer;
use crate::domain::foundation::{DealerId, ModelId, PartId};
use crate::domain::parts::Part;

use super::InMemoryFactoryBackend;

impl InMemoryFactoryBackend {
    /// A backend with a small model catalog, a two-level dealer tree and one
    /// spare part, but no stock. Units are added through registration.
    pub fn seeded() -> Self {
        Self::new()
            .with_models(seed_models())
            .with_dealers(seed_dealers())
            .with_parts(seed_parts())
    }
}

fn seed_models() -> Vec<ModelRecord> {
    [
        ("m-hyb-5k", "Helio", "Hybrid", "5kW", "HY-5K", Some("5 kW")),
        ("m-str-10k", "Helio", "String", "10kW", "ST-10K", Some("10 kW")),
        ("m-lfp-5", "Helio", "Lithium", "LiFePO4", "LF-5", Some("5 kWh")),
        ("m-vfd-7", "Helio", "VFD", "Pump", "VF-7", Some("7.5 kW")),
    ]
    .into_iter()
    .filter_map(|(id, brand, line, variant, code, power)| {
        Some(ModelRecord {
            id: ModelId::new(id).ok()?,
            brand: brand.to_string(),
            product_line: line.to_string(),
            variant: variant.to_string(),
            model_code: code.to_string(),
            power_rating: power.map(str::to_string),
        })
    })
    .collect()
}

fn seed_dealers() -> Vec<Dealer> {
    [
        ("d-north", "Northern Solar Traders", None, Some("Lahore")),
        ("d-north-1", "Ravi Energy", Some("d-north"), Some("Lahore")),
        ("d-south", "Southern Power House", None, Some("Karachi")),
    ]
    .into_iter()
    .filter_map(|(id, name, parent, city)| {
        Some(Dealer {
            id: DealerId::new(id).ok()?,
            name: name.to_string(),
            parent_id: parent.and_then(|p| DealerId::new(p).ok()),
            contact_person: None,
            phone: None,
            city: city.map(str::to_string),
        })
    })
    .collect()
}

fn seed_parts() -> Vec<Part> {
    PartId::new("p-fan-80")
        .map(|id| Part {
            id,
            name: "Cooling Fan".to_string(),
            part_code: "FAN-80".to_string(),
            model_ref: None,
            quantity: 20,
        })
        .into_iter()
        .collect()
}
