//! JSON wire formats of the factory backend.
//!
//! The backend is loose about shapes: collections may come bare or wrapped in
//! `{"data": ...}`, ids as `id` or `_id`, and references either as an id
//! string or as the populated object. Everything is narrowed to domain
//! records here; records that cannot be narrowed are dropped with a log line.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::catalog::{ModelRecord, ProductCategory};
use crate::domain::dealer::{Dealer, DealerNode};
use crate::domain::dispatch::{DispatchRecord, DispatchRequest};
use crate::domain::foundation::{AuthenticatedUser, DealerId, DispatchId, ModelId, PartId, UserId};
use crate::domain::parts::{NewPart, Part, PartDispatchRequest, PartUpdate};
use crate::domain::stock::{RegistrationRequest, SerialNumber};

/// `{"data": T}` or a bare `T`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub(crate) fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(inner) => inner,
        }
    }
}

/// A reference to another record: an id or the populated record.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum Reference<T> {
    Id(String),
    Populated(T),
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct IdOnly {
    #[serde(alias = "_id")]
    pub id: String,
}

// Dealers

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DealerDto {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, alias = "parentDealer", alias = "parent")]
    pub parent_id: Option<Reference<IdOnly>>,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

impl DealerDto {
    pub(crate) fn into_domain(self) -> Option<Dealer> {
        let id = DealerId::new(self.id).ok()?;
        let parent_id = self.parent_id.and_then(|parent| {
            let raw = match parent {
                Reference::Id(id) => id,
                Reference::Populated(IdOnly { id }) => id,
            };
            DealerId::new(raw).ok()
        });

        Some(Dealer {
            id,
            name: self.name.trim().to_string(),
            parent_id,
            contact_person: non_blank(self.contact_person),
            phone: non_blank(self.phone),
            city: non_blank(self.city),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DealerNodeDto {
    #[serde(flatten)]
    pub dealer: DealerDto,
    #[serde(default, alias = "subDealers")]
    pub children: Vec<DealerNodeDto>,
}

impl DealerNodeDto {
    pub(crate) fn into_domain(self) -> Option<DealerNode> {
        let dealer = self.dealer.into_domain()?;
        let children = self
            .children
            .into_iter()
            .filter_map(DealerNodeDto::into_domain)
            .collect();
        Some(DealerNode { dealer, children })
    }
}

// Models

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ModelDto {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub product_line: String,
    #[serde(default)]
    pub variant: String,
    #[serde(default)]
    pub model_code: String,
    /// Sent as text ("5kW") or as a bare number.
    #[serde(default)]
    pub power_rating: Option<Value>,
}

impl ModelDto {
    pub(crate) fn into_domain(self) -> Option<ModelRecord> {
        let power_rating = match self.power_rating {
            Some(Value::String(s)) => non_blank(Some(s)),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        Some(ModelRecord {
            id: ModelId::new(self.id).ok()?,
            brand: self.brand.trim().to_string(),
            product_line: self.product_line.trim().to_string(),
            variant: self.variant.trim().to_string(),
            model_code: self.model_code.trim().to_string(),
            power_rating,
        })
    }
}

// Stock

/// `GET /factory/stock` body: `{"availableInverters": [...]}` or a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum StockPayload {
    Inventory {
        #[serde(rename = "availableInverters", alias = "items")]
        available: Vec<StockItemDto>,
    },
    List(Vec<StockItemDto>),
}

impl StockPayload {
    pub(crate) fn into_items(self) -> Vec<StockItemDto> {
        match self {
            StockPayload::Inventory { available } => available,
            StockPayload::List(items) => items,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StockItemDto {
    #[serde(default)]
    pub serial_number: String,
    #[serde(default, alias = "model", alias = "modelId")]
    pub model_ref: Option<Reference<ModelDto>>,
    /// Explicit category tag, when the backend sends one.
    #[serde(default)]
    pub category: Option<String>,
}

/// A stock row narrowed as far as it can be without the model catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PartialStockItem {
    pub serial_number: SerialNumber,
    pub model_ref: ModelId,
    /// Known from an explicit tag or a populated model.
    pub category: Option<ProductCategory>,
}

impl StockItemDto {
    pub(crate) fn narrow(self) -> Option<PartialStockItem> {
        let serial_number = SerialNumber::new(&self.serial_number).ok()?;

        let explicit = self
            .category
            .as_deref()
            .and_then(|tag| tag.parse::<ProductCategory>().ok());

        let (model_ref, derived) = match self.model_ref? {
            Reference::Id(id) => (ModelId::new(id).ok()?, None),
            Reference::Populated(model) => {
                let record = model.into_domain()?;
                let category = record.category();
                (record.id, Some(category))
            }
        };

        Some(PartialStockItem {
            serial_number,
            model_ref,
            category: explicit.or(derived),
        })
    }
}

// Dispatches

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DispatchBody<'a> {
    pub dispatch_number: &'a str,
    pub dealer_name: &'a str,
    pub dispatch_date: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<&'a str>,
    pub serial_numbers: Vec<&'a str>,
}

impl<'a> From<&'a DispatchRequest> for DispatchBody<'a> {
    fn from(request: &'a DispatchRequest) -> Self {
        Self {
            dispatch_number: request.dispatch_number.as_str(),
            dealer_name: &request.dealer_name,
            dispatch_date: &request.dispatch_date,
            remarks: request.remarks.as_deref(),
            serial_numbers: request.serial_numbers.iter().map(SerialNumber::as_str).collect(),
        }
    }
}

/// The created dispatch. The backend may echo only some fields; the rest
/// are taken from the request that was sent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DispatchRecordDto {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub dispatch_number: Option<String>,
    #[serde(default, alias = "dealer")]
    pub dealer_name: Option<String>,
    #[serde(default)]
    pub dispatch_date: Option<String>,
    #[serde(default)]
    pub serial_numbers: Option<Vec<String>>,
}

impl DispatchRecordDto {
    pub(crate) fn into_domain(self, sent: &DispatchRequest) -> Option<DispatchRecord> {
        let serial_numbers = match self.serial_numbers {
            Some(serials) => serials
                .iter()
                .filter_map(|s| SerialNumber::new(s).ok())
                .collect(),
            None => sent.serial_numbers.clone(),
        };

        Some(DispatchRecord {
            id: DispatchId::new(self.id).ok()?,
            dispatch_number: self
                .dispatch_number
                .unwrap_or_else(|| sent.dispatch_number.as_str().to_string()),
            dealer_name: self.dealer_name.unwrap_or_else(|| sent.dealer_name.clone()),
            dispatch_date: self.dispatch_date.unwrap_or_else(|| sent.dispatch_date.clone()),
            serial_numbers,
        })
    }
}

// Registration

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterBody<'a> {
    pub model_id: &'a str,
    pub serial_numbers: Vec<&'a str>,
}

impl<'a> From<&'a RegistrationRequest> for RegisterBody<'a> {
    fn from(request: &'a RegistrationRequest) -> Self {
        Self {
            model_id: request.model_id.as_str(),
            serial_numbers: request.serial_numbers.iter().map(SerialNumber::as_str).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RegisterResponse {
    List(Vec<String>),
    Summary {
        #[serde(default, alias = "serialNumbers")]
        registered: Option<Vec<String>>,
    },
}

impl RegisterResponse {
    /// Serials the backend accepted. A summary without a list means all of
    /// the submitted ones.
    pub(crate) fn accepted(self, sent: &RegistrationRequest) -> Vec<SerialNumber> {
        match self {
            RegisterResponse::List(serials)
            | RegisterResponse::Summary {
                registered: Some(serials),
            } => serials
                .iter()
                .filter_map(|s| SerialNumber::new(s).ok())
                .collect(),
            RegisterResponse::Summary { registered: None } => sent.serial_numbers.clone(),
        }
    }
}

// Parts

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PartDto {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub part_code: String,
    #[serde(default, alias = "model", alias = "modelId")]
    pub model_ref: Option<Reference<IdOnly>>,
    #[serde(default)]
    pub quantity: u32,
}

impl PartDto {
    pub(crate) fn into_domain(self) -> Option<Part> {
        let model_ref = self.model_ref.and_then(|model| {
            let raw = match model {
                Reference::Id(id) => id,
                Reference::Populated(IdOnly { id }) => id,
            };
            ModelId::new(raw).ok()
        });

        Some(Part {
            id: PartId::new(self.id).ok()?,
            name: self.name.trim().to_string(),
            part_code: self.part_code.trim().to_string(),
            model_ref,
            quantity: self.quantity,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PartBody<'a> {
    pub name: &'a str,
    pub part_code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<&'a str>,
    pub quantity: u32,
}

impl<'a> From<&'a NewPart> for PartBody<'a> {
    fn from(part: &'a NewPart) -> Self {
        Self {
            name: &part.name,
            part_code: &part.part_code,
            model_id: part.model_ref.as_ref().map(ModelId::as_str),
            quantity: part.quantity,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PartUpdateBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl<'a> From<&'a PartUpdate> for PartUpdateBody<'a> {
    fn from(update: &'a PartUpdate) -> Self {
        Self {
            name: update.name.as_deref(),
            part_code: update.part_code.as_deref(),
            model_id: update.model_ref.as_ref().map(ModelId::as_str),
            quantity: update.quantity,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PartDispatchBody<'a> {
    pub part_id: &'a str,
    pub quantity: u32,
    pub recipient_name: &'a str,
    pub dispatch_date: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<&'a str>,
}

impl<'a> From<&'a PartDispatchRequest> for PartDispatchBody<'a> {
    fn from(request: &'a PartDispatchRequest) -> Self {
        Self {
            part_id: request.part_id.as_str(),
            quantity: request.quantity,
            recipient_name: &request.recipient_name,
            dispatch_date: &request.dispatch_date,
            remarks: request.remarks.as_deref(),
        }
    }
}

// Auth

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CurrentUserDto {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "displayName", alias = "fullName")]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl CurrentUserDto {
    pub(crate) fn into_domain(self) -> Option<AuthenticatedUser> {
        let user = AuthenticatedUser::new(UserId::new(self.id).ok()?, self.email, non_blank(self.name));
        Some(match non_blank(self.role) {
            Some(role) => user.with_role(role),
            None => user,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
