//! reqwest implementation of the factory backend ports.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpBackendConfig::new("https://factory.example.com/api")
//!     .with_token("service-token")
//!     .with_timeout(Duration::from_secs(15));
//!
//! let backend = HttpFactoryBackend::new(config)?;
//! let dealers = backend.list_dealers().await?;
//! ```
//!
//! There is no retry. A failed call is reported once with the backend's own
//! message, and the operator decides whether to try again.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use super::error::BackendError;
use super::wire::{
    CurrentUserDto, DealerDto, DealerNodeDto, DispatchBody, DispatchRecordDto, Envelope, ModelDto,
    PartBody, PartDispatchBody, PartDto, PartUpdateBody, PartialStockItem, RegisterBody,
    RegisterResponse, StockItemDto, StockPayload,
};
use crate::domain::catalog::{ModelRecord, ProductCategory};
use crate::domain::dealer::{Dealer, DealerNode};
use crate::domain::dispatch::{DispatchRecord, DispatchRequest};
use crate::domain::foundation::{AuthError, AuthenticatedUser, DomainError, ModelId, PartId};
use crate::domain::parts::{NewPart, Part, PartDispatchRequest, PartUpdate};
use crate::domain::stock::{RegistrationRequest, SerialNumber, StockItem};
use crate::ports::{
    DealerDirectory, DispatchGateway, InverterRegistry, ModelCatalog, PartsCatalog,
    SessionValidator, StockReader,
};

/// Connection settings for the factory backend.
#[derive(Debug, Clone)]
pub struct HttpBackendConfig {
    /// Base URL all endpoint paths are joined onto.
    pub base_url: String,
    /// Service token sent as a bearer token on data calls.
    api_token: Option<Secret<String>>,
    pub timeout: Duration,
}

impl HttpBackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(Secret::new(token.into()));
        self
    }

    pub fn with_secret_token(mut self, token: Option<Secret<String>>) -> Self {
        self.api_token = token;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Factory backend reached over HTTP.
pub struct HttpFactoryBackend {
    config: HttpBackendConfig,
    client: Client,
}

impl HttpFactoryBackend {
    pub fn new(config: HttpBackendConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BackendError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Request carrying the service token.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.config.api_token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    /// Sends the request and checks the status, logging transport failures.
    async fn execute(&self, builder: RequestBuilder) -> Result<reqwest::Response, BackendError> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(error = %e, timeout = e.is_timeout(), "Backend request failed");
            BackendError::Network(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();
        let err = BackendError::from_status(status.as_u16(), &body);
        tracing::warn!(%status, path = %url, reason = err.message(), "Backend rejected request");
        Err(err)
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, BackendError> {
        let response = self.execute(builder).await?;
        let envelope: Envelope<T> = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "Backend response did not decode");
            BackendError::Decode(e.to_string())
        })?;
        Ok(envelope.into_inner())
    }

    /// Resolves categories for stock rows that only carry a model id.
    async fn complete_categories(
        &self,
        partial: Vec<PartialStockItem>,
    ) -> Result<Vec<StockItem>, DomainError> {
        let unresolved: HashSet<&ModelId> = partial
            .iter()
            .filter(|item| item.category.is_none())
            .map(|item| &item.model_ref)
            .collect();

        let categories: HashMap<ModelId, ProductCategory> = if unresolved.is_empty() {
            HashMap::new()
        } else {
            tracing::debug!(models = unresolved.len(), "Looking up categories for stock models");
            self.list_models()
                .await?
                .into_iter()
                .map(|model| {
                    let category = model.category();
                    (model.id, category)
                })
                .collect()
        };

        Ok(partial
            .into_iter()
            .map(|item| {
                let category = item
                    .category
                    .or_else(|| categories.get(&item.model_ref).copied())
                    .unwrap_or_default();
                StockItem::new(item.serial_number, item.model_ref, category)
            })
            .collect())
    }
}

/// Keeps the records that narrow cleanly and logs how many were dropped.
fn narrow_all<D, T>(kind: &'static str, raw: Vec<D>, narrow: impl Fn(D) -> Option<T>) -> Vec<T> {
    let total = raw.len();
    let kept: Vec<T> = raw.into_iter().filter_map(narrow).collect();
    if kept.len() < total {
        tracing::debug!(kind, dropped = total - kept.len(), "Dropped malformed backend records");
    }
    kept
}

#[async_trait]
impl DealerDirectory for HttpFactoryBackend {
    async fn list_dealers(&self) -> Result<Vec<Dealer>, DomainError> {
        let raw: Vec<DealerDto> = self.fetch(self.request(Method::GET, "dealers")).await?;
        Ok(narrow_all("dealer", raw, DealerDto::into_domain))
    }

    async fn dealer_hierarchy(&self) -> Result<Vec<DealerNode>, DomainError> {
        let raw: Vec<DealerNodeDto> = self
            .fetch(self.request(Method::GET, "dealers/hierarchy"))
            .await?;
        Ok(narrow_all("dealer node", raw, DealerNodeDto::into_domain))
    }
}

#[async_trait]
impl ModelCatalog for HttpFactoryBackend {
    async fn list_models(&self) -> Result<Vec<ModelRecord>, DomainError> {
        let raw: Vec<ModelDto> = self.fetch(self.request(Method::GET, "models")).await?;
        Ok(narrow_all("model", raw, ModelDto::into_domain))
    }
}

#[async_trait]
impl StockReader for HttpFactoryBackend {
    async fn available_stock(&self) -> Result<Vec<StockItem>, DomainError> {
        let payload: StockPayload = self
            .fetch(self.request(Method::GET, "factory/stock"))
            .await?;
        let partial = narrow_all("stock item", payload.into_items(), StockItemDto::narrow);
        self.complete_categories(partial).await
    }
}

#[async_trait]
impl DispatchGateway for HttpFactoryBackend {
    async fn create_dispatch(&self, request: &DispatchRequest) -> Result<DispatchRecord, DomainError> {
        let body = DispatchBody::from(request);
        let created: DispatchRecordDto = self
            .fetch(self.request(Method::POST, "dispatches").json(&body))
            .await?;

        created
            .into_domain(request)
            .ok_or_else(|| BackendError::Decode("dispatch record without id".to_string()).into())
    }
}

#[async_trait]
impl InverterRegistry for HttpFactoryBackend {
    async fn register(&self, request: &RegistrationRequest) -> Result<Vec<SerialNumber>, DomainError> {
        let body = RegisterBody::from(request);
        let response: RegisterResponse = self
            .fetch(self.request(Method::POST, "inverters/register").json(&body))
            .await?;
        Ok(response.accepted(request))
    }
}

#[async_trait]
impl PartsCatalog for HttpFactoryBackend {
    async fn list_parts(&self) -> Result<Vec<Part>, DomainError> {
        let raw: Vec<PartDto> = self.fetch(self.request(Method::GET, "parts")).await?;
        Ok(narrow_all("part", raw, PartDto::into_domain))
    }

    async fn create_part(&self, part: &NewPart) -> Result<Part, DomainError> {
        let created: PartDto = self
            .fetch(self.request(Method::POST, "parts").json(&PartBody::from(part)))
            .await?;
        created
            .into_domain()
            .ok_or_else(|| BackendError::Decode("part without id".to_string()).into())
    }

    async fn update_part(&self, id: &PartId, update: &PartUpdate) -> Result<Part, DomainError> {
        let path = format!("parts/{}", id);
        let updated: PartDto = self
            .fetch(self.request(Method::PUT, &path).json(&PartUpdateBody::from(update)))
            .await?;
        updated
            .into_domain()
            .ok_or_else(|| BackendError::Decode("part without id".to_string()).into())
    }

    async fn delete_part(&self, id: &PartId) -> Result<(), DomainError> {
        let path = format!("parts/{}", id);
        self.execute(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    async fn create_part_dispatch(&self, request: &PartDispatchRequest) -> Result<(), DomainError> {
        let body = PartDispatchBody::from(request);
        self.execute(self.request(Method::POST, "parts/dispatch").json(&body))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl SessionValidator for HttpFactoryBackend {
    /// Asks the backend who owns the operator's token.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let response = self
            .client
            .get(self.url("auth/me"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Session lookup failed: {}", e);
                AuthError::service_unavailable(format!("Session lookup failed: {}", e))
            })?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                tracing::debug!("Backend refused session token");
                return Err(AuthError::InvalidToken);
            }
            status => {
                tracing::error!("Session endpoint returned {}", status);
                return Err(AuthError::service_unavailable(format!(
                    "Session endpoint returned {}",
                    status
                )));
            }
        }

        let user: Envelope<CurrentUserDto> = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse session user: {}", e);
            AuthError::service_unavailable(format!("Failed to parse session user: {}", e))
        })?;

        user.into_inner().into_domain().ok_or(AuthError::InvalidToken)
    }
}
