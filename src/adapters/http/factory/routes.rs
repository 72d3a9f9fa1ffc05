//! Axum router configuration for the factory desk endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    create_dispatch, create_part, dealer_hierarchy, delete_part, dispatch_part, import_serials,
    list_parts, list_serials, preview_dispatch, register_units, search_dealers, stock_overview,
    update_part, FactoryAppState,
};

/// Create the factory desk API router, mounted at `/api/factory`.
///
/// # Routes
///
/// ## Dispatch
/// - `POST /dispatches/preview` - Dispatch number and reconciliation
/// - `POST /dispatches` - Submit a dispatch
/// - `POST /dispatches/import` - Merge typed or uploaded serials
///
/// ## Stock
/// - `GET /stock/serials` - Serials for the picker (`category`, `model`)
/// - `GET /stock/overview` - Available unit counts
///
/// ## Dealers
/// - `GET /dealers/hierarchy` - Dealer tree
/// - `GET /dealers/search` - Autocomplete (`q`, `limit`)
///
/// ## Registration
/// - `POST /inverters/register` - Register new units
///
/// ## Parts
/// - `GET /parts`, `POST /parts`
/// - `PUT /parts/:id`, `DELETE /parts/:id`
/// - `POST /parts/dispatch`
///
/// Every route requires an authenticated operator.
pub fn factory_routes() -> Router<FactoryAppState> {
    Router::new()
        // Dispatch
        .route("/dispatches", post(create_dispatch))
        .route("/dispatches/preview", post(preview_dispatch))
        .route("/dispatches/import", post(import_serials))
        // Stock
        .route("/stock/serials", get(list_serials))
        .route("/stock/overview", get(stock_overview))
        // Dealers
        .route("/dealers/hierarchy", get(dealer_hierarchy))
        .route("/dealers/search", get(search_dealers))
        // Registration
        .route("/inverters/register", post(register_units))
        // Parts
        .route("/parts", get(list_parts).post(create_part))
        .route("/parts/dispatch", post(dispatch_part))
        .route("/parts/:id", put(update_part).delete(delete_part))
}
