//! HTTP handlers for the factory desk endpoints.
//!
//! These handlers connect axum routes to the application handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::{
    CreateDispatchCommand, CreateDispatchHandler, CreatePartCommand, CreatePartHandler,
    DeletePartCommand, DeletePartHandler, DispatchPartCommand, DispatchPartHandler,
    DispatchSettings, GetDealerHierarchyHandler, GetDealerHierarchyQuery,
    GetStockOverviewHandler, GetStockOverviewQuery, ImportSerialsCommand, ImportSerialsHandler,
    ListAvailableSerialsHandler, ListAvailableSerialsQuery, ListPartsHandler, ListPartsQuery,
    PreviewDispatchCommand, PreviewDispatchHandler, RegisterUnitsCommand, RegisterUnitsHandler,
    SearchDealersHandler, SearchDealersQuery, UpdatePartCommand, UpdatePartHandler,
};
use crate::domain::dispatch::DispatchError;
use crate::domain::foundation::{DomainError, ErrorCode, PartId, ValidationError};
use crate::domain::parts::{NewPart, Part, PartDispatchRequest, PartUpdate, PartsError};
use crate::domain::stock::{RegistrationError, StockOverview};
use crate::ports::{
    DealerDirectory, DispatchGateway, InverterRegistry, ModelCatalog, PartsCatalog,
    QueryInvalidator, SheetReader, StockReader,
};

use super::dto::{
    DealerHierarchyResponse, DealerSearchParams, DealerSearchResponse, DispatchFormRequest,
    DispatchResponse, ErrorResponse, HealthResponse, ImportSerialsRequest, ImportSerialsResponse,
    PreviewResponse, RegisterUnitsRequest, RegisterUnitsResponse, ScopeParams,
    SerialListResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned per request; every port is an `Arc`. Reads go through the cached
/// ports, so `invalidator` must be the cache those ports read from.
#[derive(Clone)]
pub struct FactoryAppState {
    pub stock: Arc<dyn StockReader>,
    pub models: Arc<dyn ModelCatalog>,
    pub dealers: Arc<dyn DealerDirectory>,
    pub dispatches: Arc<dyn DispatchGateway>,
    pub registry: Arc<dyn InverterRegistry>,
    pub parts: Arc<dyn PartsCatalog>,
    pub invalidator: Arc<dyn QueryInvalidator>,
    pub sheets: Arc<dyn SheetReader>,
    pub settings: DispatchSettings,
    /// Result cap for dealer autocomplete.
    pub search_limit: usize,
}

impl FactoryAppState {
    /// Create handlers on demand from the shared state.
    pub fn preview_dispatch_handler(&self) -> PreviewDispatchHandler {
        PreviewDispatchHandler::new(self.stock.clone(), self.settings.clone())
    }

    pub fn create_dispatch_handler(&self) -> CreateDispatchHandler {
        CreateDispatchHandler::new(
            self.stock.clone(),
            self.dispatches.clone(),
            self.invalidator.clone(),
            self.settings.clone(),
        )
    }

    pub fn import_serials_handler(&self) -> ImportSerialsHandler {
        ImportSerialsHandler::new(self.stock.clone(), self.sheets.clone())
    }

    pub fn list_serials_handler(&self) -> ListAvailableSerialsHandler {
        ListAvailableSerialsHandler::new(self.stock.clone())
    }

    pub fn stock_overview_handler(&self) -> GetStockOverviewHandler {
        GetStockOverviewHandler::new(self.stock.clone(), self.models.clone())
    }

    pub fn dealer_hierarchy_handler(&self) -> GetDealerHierarchyHandler {
        GetDealerHierarchyHandler::new(self.dealers.clone())
    }

    pub fn search_dealers_handler(&self) -> SearchDealersHandler {
        SearchDealersHandler::new(self.dealers.clone(), self.search_limit)
    }

    pub fn register_units_handler(&self) -> RegisterUnitsHandler {
        RegisterUnitsHandler::new(
            self.models.clone(),
            self.stock.clone(),
            self.registry.clone(),
            self.invalidator.clone(),
            self.sheets.clone(),
        )
    }

    pub fn list_parts_handler(&self) -> ListPartsHandler {
        ListPartsHandler::new(self.parts.clone())
    }

    pub fn create_part_handler(&self) -> CreatePartHandler {
        CreatePartHandler::new(self.parts.clone(), self.invalidator.clone())
    }

    pub fn update_part_handler(&self) -> UpdatePartHandler {
        UpdatePartHandler::new(self.parts.clone(), self.invalidator.clone())
    }

    pub fn delete_part_handler(&self) -> DeletePartHandler {
        DeletePartHandler::new(self.parts.clone(), self.invalidator.clone())
    }

    pub fn dispatch_part_handler(&self) -> DispatchPartHandler {
        DispatchPartHandler::new(self.parts.clone(), self.invalidator.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Dispatch Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/factory/dispatches/preview - Dispatch number and reconciliation
pub async fn preview_dispatch(
    State(state): State<FactoryAppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<DispatchFormRequest>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let (draft, scope, input) = request.into_parts()?;
    let serials = input
        .into_source(state.sheets.as_ref())
        .map_err(DispatchError::from)?;
    let cmd = PreviewDispatchCommand {
        operator: user,
        draft,
        scope,
        serials,
    };

    let result = state.preview_dispatch_handler().handle(cmd).await?;
    Ok(Json(result.into()))
}

/// POST /api/factory/dispatches - Submit a dispatch
pub async fn create_dispatch(
    State(state): State<FactoryAppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<DispatchFormRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (draft, scope, input) = request.into_parts()?;
    let serials = input
        .into_source(state.sheets.as_ref())
        .map_err(DispatchError::from)?;
    let cmd = CreateDispatchCommand {
        operator: user,
        draft,
        scope,
        serials,
    };

    let result = state.create_dispatch_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(DispatchResponse::from(result))))
}

/// POST /api/factory/dispatches/import - Merge serials into the selection
pub async fn import_serials(
    State(state): State<FactoryAppState>,
    RequireAuth(_user): RequireAuth,
    Json(request): Json<ImportSerialsRequest>,
) -> Result<Json<ImportSerialsResponse>, ApiError> {
    let cmd = ImportSerialsCommand {
        scope: request.scope.into_scope()?,
        upload: request.input.into_upload(),
        existing: request.existing,
    };

    let result = state.import_serials_handler().handle(cmd).await?;
    Ok(Json(result.into()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Stock Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/factory/stock/serials?category=&model= - Serials for the picker
pub async fn list_serials(
    State(state): State<FactoryAppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<ScopeParams>,
) -> Result<Json<SerialListResponse>, ApiError> {
    let query = ListAvailableSerialsQuery {
        scope: params.into_scope()?,
    };

    let serials = state.list_serials_handler().handle(query).await?;
    Ok(Json(serials.into()))
}

/// GET /api/factory/stock/overview - Available unit counts
pub async fn stock_overview(
    State(state): State<FactoryAppState>,
    RequireAuth(_user): RequireAuth,
) -> Result<Json<StockOverview>, ApiError> {
    let overview = state
        .stock_overview_handler()
        .handle(GetStockOverviewQuery)
        .await?;
    Ok(Json(overview))
}

// ════════════════════════════════════════════════════════════════════════════════
// Dealer Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/factory/dealers/hierarchy - Dealer tree
pub async fn dealer_hierarchy(
    State(state): State<FactoryAppState>,
    RequireAuth(_user): RequireAuth,
) -> Result<Json<DealerHierarchyResponse>, ApiError> {
    let view = state
        .dealer_hierarchy_handler()
        .handle(GetDealerHierarchyQuery)
        .await?;
    Ok(Json(view.into()))
}

/// GET /api/factory/dealers/search?q= - Dealer autocomplete
pub async fn search_dealers(
    State(state): State<FactoryAppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<DealerSearchParams>,
) -> Result<Json<DealerSearchResponse>, ApiError> {
    let query = SearchDealersQuery {
        query: params.q,
        limit: params.limit,
    };

    let dealers = state.search_dealers_handler().handle(query).await?;
    Ok(Json(DealerSearchResponse { dealers }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Registration Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/factory/inverters/register - Register new units
pub async fn register_units(
    State(state): State<FactoryAppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<RegisterUnitsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = RegisterUnitsCommand {
        model_id: request.model_id,
        upload: request.input.into_upload(),
    };

    let result = state.register_units_handler().handle(cmd).await?;
    tracing::debug!(operator = %user.id, "Registration submitted");
    Ok((StatusCode::CREATED, Json(RegisterUnitsResponse::from(result))))
}

// ════════════════════════════════════════════════════════════════════════════════
// Parts Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/factory/parts - Parts catalog
pub async fn list_parts(
    State(state): State<FactoryAppState>,
    RequireAuth(_user): RequireAuth,
) -> Result<Json<Vec<Part>>, ApiError> {
    let parts = state.list_parts_handler().handle(ListPartsQuery).await?;
    Ok(Json(parts))
}

/// POST /api/factory/parts - Add a part
pub async fn create_part(
    State(state): State<FactoryAppState>,
    RequireAuth(_user): RequireAuth,
    Json(part): Json<NewPart>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state
        .create_part_handler()
        .handle(CreatePartCommand { part })
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/factory/parts/:id - Edit a part
pub async fn update_part(
    State(state): State<FactoryAppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
    Json(update): Json<PartUpdate>,
) -> Result<Json<Part>, ApiError> {
    let cmd = UpdatePartCommand {
        id: PartId::new(id)?,
        update,
    };

    let updated = state.update_part_handler().handle(cmd).await?;
    Ok(Json(updated))
}

/// DELETE /api/factory/parts/:id - Remove a part
pub async fn delete_part(
    State(state): State<FactoryAppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let cmd = DeletePartCommand {
        id: PartId::new(id)?,
    };

    state.delete_part_handler().handle(cmd).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/factory/parts/dispatch - Send parts out
pub async fn dispatch_part(
    State(state): State<FactoryAppState>,
    RequireAuth(_user): RequireAuth,
    Json(request): Json<PartDispatchRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let dispatched = state
        .dispatch_part_handler()
        .handle(DispatchPartCommand { request })
        .await?;
    Ok((StatusCode::CREATED, Json(dispatched)))
}

/// GET /health - Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts domain errors to `{code, message}` responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        status_for(self.code)
    }
}

/// HTTP status for an error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
            StatusCode::BAD_REQUEST
        }
        ErrorCode::OutOfRange
        | ErrorCode::NoValidSerials
        | ErrorCode::NoNewSerials
        | ErrorCode::ImportFailed => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::NotFound
        | ErrorCode::PartNotFound
        | ErrorCode::DealerNotFound
        | ErrorCode::ModelNotFound => StatusCode::NOT_FOUND,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::BackendError => StatusCode::BAD_GATEWAY,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::new(err.code, err.message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::new(ErrorCode::ValidationFailed, err.to_string())
    }
}

impl From<DispatchError> for ApiError {
    fn from(err: DispatchError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

impl From<PartsError> for ApiError {
    fn from(err: PartsError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(code = %self.code, reason = %self.message, "Request failed");
        }
        let body = ErrorResponse::new(self.code.to_string(), self.message);
        (status, Json(body)).into_response()
    }
}
