//! Wiring of configuration into adapters and application state.

use std::sync::Arc;

use crate::adapters::http::{AuthState, FactoryAppState, RouterOptions};
use crate::adapters::{
    BackendError, CachedBackend, CsvSheetReader, HttpBackendConfig, HttpFactoryBackend,
    InMemoryFactoryBackend, StaticTokenValidator,
};
use crate::application::handlers::DispatchSettings;
use crate::config::AppConfig;
use crate::ports::{
    DealerDirectory, DispatchGateway, InverterRegistry, ModelCatalog, PartsCatalog, StockReader,
};

/// Everything the router needs.
pub struct Services {
    pub state: FactoryAppState,
    pub auth: AuthState,
    pub options: RouterOptions,
}

/// Builds the services for the configured backend.
///
/// With a backend URL the HTTP backend serves data and validates sessions.
/// Without one the server runs on seeded in-memory data and accepts only the
/// configured development token.
pub fn services(config: &AppConfig) -> Result<Services, BackendError> {
    let (state, auth) = match config.backend.base_url() {
        Some(url) => {
            let http = Arc::new(HttpFactoryBackend::new(
                HttpBackendConfig::new(url)
                    .with_secret_token(config.backend.api_token.clone())
                    .with_timeout(config.backend.timeout()),
            )?);
            tracing::info!(backend = %url, "Using factory backend");
            let auth: AuthState = http.clone();
            (app_state(http, config), auth)
        }
        None => {
            let memory = Arc::new(InMemoryFactoryBackend::seeded());
            let mut validator = StaticTokenValidator::new();
            match &config.backend.dev_token {
                Some(token) => {
                    validator =
                        validator.with_operator(token.as_str(), "dev", &config.backend.dev_operator);
                }
                None => tracing::warn!("No development token configured; every request will be refused"),
            }
            tracing::warn!("No backend URL configured; using in-memory data");
            let auth: AuthState = Arc::new(validator);
            (app_state(memory, config), auth)
        }
    };

    Ok(Services {
        state,
        auth,
        options: RouterOptions {
            request_timeout: config.server.request_timeout(),
            cors_origins: config.server.cors_origins_list(),
        },
    })
}

/// Application state over one backend, with reads cached for the
/// configured TTL.
pub fn app_state<B>(backend: Arc<B>, config: &AppConfig) -> FactoryAppState
where
    B: StockReader
        + ModelCatalog
        + DealerDirectory
        + DispatchGateway
        + InverterRegistry
        + PartsCatalog
        + 'static,
{
    let cached = Arc::new(CachedBackend::new(backend.clone(), config.cache.ttl()));

    FactoryAppState {
        stock: cached.clone(),
        models: cached.clone(),
        dealers: cached.clone(),
        dispatches: backend.clone(),
        registry: backend,
        parts: cached.clone(),
        invalidator: cached,
        sheets: Arc::new(CsvSheetReader::new()),
        settings: DispatchSettings::new(config.dispatch.default_prefix.trim()),
        search_limit: config.dispatch.search_limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;

    #[tokio::test]
    async fn dev_token_authenticates_the_dev_operator() {
        let config = AppConfig {
            backend: BackendConfig {
                dev_token: Some("letmein".to_string()),
                dev_operator: "Sun Light".to_string(),
                timeout_secs: 30,
                ..Default::default()
            },
            ..Default::default()
        };

        let services = services(&config).unwrap();
        let user = services.auth.validate("letmein").await.unwrap();

        assert_eq!(user.display_name.as_deref(), Some("Sun Light"));
        assert!(services.auth.validate("other").await.is_err());
    }

    #[tokio::test]
    async fn reads_are_cached_until_invalidated() {
        let backend = Arc::new(InMemoryFactoryBackend::seeded());
        let state = app_state(backend.clone(), &AppConfig::default());

        state.models.list_models().await.unwrap();
        state.models.list_models().await.unwrap();

        assert_eq!(backend.model_reads(), 1);
    }

    #[test]
    fn configured_backend_builds_http_services() {
        let config = AppConfig {
            backend: BackendConfig {
                base_url: Some("http://factory.local/api".to_string()),
                timeout_secs: 5,
                ..Default::default()
            },
            ..Default::default()
        };

        let services = services(&config).unwrap();
        assert_eq!(services.state.search_limit, 10);
        assert_eq!(services.state.settings.default_prefix, "FD");
    }
}
