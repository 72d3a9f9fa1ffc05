//! Fixtures shared by the handler tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::adapters::memory::InMemoryFactoryBackend;
use crate::domain::catalog::{ModelRecord, ProductCategory};
use crate::domain::dealer::Dealer;
use crate::domain::foundation::{AuthenticatedUser, DealerId, ModelId, PartId, UserId};
use crate::domain::parts::Part;
use crate::domain::stock::{SerialNumber, StockItem};
use crate::ports::{QueryInvalidator, QueryKey};

/// Records every invalidated key.
#[derive(Default)]
pub struct RecordingInvalidator {
    keys: Mutex<Vec<QueryKey>>,
}

impl RecordingInvalidator {
    pub fn keys(&self) -> Vec<QueryKey> {
        self.keys.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryInvalidator for RecordingInvalidator {
    async fn invalidate(&self, key: QueryKey) {
        self.keys.lock().unwrap().push(key);
    }
}

pub fn operator() -> AuthenticatedUser {
    AuthenticatedUser::new(
        UserId::new("op-1").unwrap(),
        "desk@factory.example.com",
        Some("Sun Light".to_string()),
    )
}

pub fn sn(s: &str) -> SerialNumber {
    SerialNumber::new(s).unwrap()
}

pub fn model(id: &str, product_line: &str) -> ModelRecord {
    ModelRecord {
        id: ModelId::new(id).unwrap(),
        brand: "Volt".to_string(),
        product_line: product_line.to_string(),
        variant: "Standard".to_string(),
        model_code: id.to_uppercase(),
        power_rating: None,
    }
}

pub fn stock_item(serial: &str, model_id: &str, category: ProductCategory) -> StockItem {
    StockItem::new(sn(serial), ModelId::new(model_id).unwrap(), category)
}

pub fn dealer(id: &str, name: &str, parent: Option<&str>) -> Dealer {
    Dealer {
        id: DealerId::new(id).unwrap(),
        name: name.to_string(),
        parent_id: parent.map(|p| DealerId::new(p).unwrap()),
        contact_person: None,
        phone: None,
        city: None,
    }
}

pub fn part(id: &str, quantity: u32) -> Part {
    Part {
        id: PartId::new(id).unwrap(),
        name: "Cooling Fan".to_string(),
        part_code: "FAN-80".to_string(),
        model_ref: None,
        quantity,
    }
}

/// Two models; inverter stock SN1..SN3 on m-hybrid, SN10 on m-string and
/// battery stock B1 on m-pack.
pub fn backend() -> Arc<InMemoryFactoryBackend> {
    Arc::new(
        InMemoryFactoryBackend::new()
            .with_models(vec![
                model("m-hybrid", "Hybrid"),
                model("m-string", "String"),
                model("m-pack", "Lithium Pack"),
            ])
            .with_stock(vec![
                stock_item("SN1", "m-hybrid", ProductCategory::Inverter),
                stock_item("SN2", "m-hybrid", ProductCategory::Inverter),
                stock_item("SN3", "m-hybrid", ProductCategory::Inverter),
                stock_item("SN10", "m-string", ProductCategory::Inverter),
                stock_item("B1", "m-pack", ProductCategory::Battery),
            ])
            .with_dealers(vec![
                dealer("d1", "Bright Energy", None),
                dealer("d2", "Bright Solar Sub", Some("d1")),
                dealer("d3", "Apex Power", None),
            ])
            .with_parts(vec![part("p-1", 5)]),
    )
}
