//! Integration tests for the factory desk HTTP API.
//!
//! The full router (auth middleware, layers, routes) over the seeded
//! in-memory backend, driven with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use factory_dispatch::adapters::http::{build_router, AuthState, RouterOptions};
use factory_dispatch::adapters::{InMemoryFactoryBackend, StaticTokenValidator};
use factory_dispatch::bootstrap::app_state;
use factory_dispatch::config::AppConfig;

const TOKEN: &str = "desk-token";

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app() -> Router {
    let backend = Arc::new(InMemoryFactoryBackend::seeded());
    let state = app_state(backend, &AppConfig::default());
    let auth: AuthState =
        Arc::new(StaticTokenValidator::new().with_operator(TOKEN, "op-1", "Sun Light"));
    build_router(state, auth, RouterOptions::default())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
        .body(Body::empty())
        .unwrap()
}

fn send_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn register(app: &Router, model: &str, text: &str) {
    let (status, _) = call(
        app,
        send_json(
            "POST",
            "/api/factory/inverters/register",
            json!({ "model_id": model, "text": text }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

// =============================================================================
// Health & Auth
// =============================================================================

#[tokio::test]
async fn health_needs_no_token() {
    let app = app();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let (status, body) = call(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn api_without_token_is_401() {
    let app = app();
    let request = Request::builder()
        .uri("/api/factory/stock/serials")
        .body(Body::empty())
        .unwrap();

    let (status, body) = call(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = app();

    let response = app.oneshot(get("/api/factory/stock/overview")).await.unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

// =============================================================================
// Dispatch
// =============================================================================

#[tokio::test]
async fn preview_then_submit_dispatch() {
    let app = app();
    register(&app, "m-hyb-5k", "SN3\nSN1").await;

    let form = json!({
        "dealer_name": "Ravi Energy",
        "dispatch_date": "2024-05-09",
        "text": "SN3\nSN1\nNOPE",
    });
    let (status, preview) = call(&app, send_json("POST", "/api/factory/dispatches/preview", form.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(preview["dispatch_number"], "SL090524SN1SN3");
    assert_eq!(preview["valid"], json!(["SN1", "SN3"]));
    assert_eq!(preview["rejected"], json!(["NOPE"]));
    assert_eq!(preview["can_submit"], true);

    let (status, created) = call(&app, send_json("POST", "/api/factory/dispatches", form)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["dispatch_number"], "SL090524SN1SN3");
    assert_eq!(created["serial_numbers"], json!(["SN1", "SN3"]));

    let (_, serials) = call(&app, get("/api/factory/stock/serials?category=inverter")).await;
    assert_eq!(serials["count"], 0);
}

#[tokio::test]
async fn dispatch_without_dealer_is_400() {
    let app = app();
    register(&app, "m-hyb-5k", "SN1").await;

    let (status, body) = call(
        &app,
        send_json("POST", "/api/factory/dispatches", json!({ "serials": ["SN1"] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "EMPTY_FIELD");
}

#[tokio::test]
async fn dispatch_with_nothing_in_stock_is_422() {
    let app = app();

    let (status, body) = call(
        &app,
        send_json(
            "POST",
            "/api/factory/dispatches",
            json!({ "dealer_name": "Ravi Energy", "text": "GHOST-1\nGHOST-2" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "NO_VALID_SERIALS");
}

#[tokio::test]
async fn dispatch_from_csv_uses_the_serial_column() {
    let app = app();
    register(&app, "m-hyb-5k", "SN1\nSN2").await;

    let (status, created) = call(
        &app,
        send_json(
            "POST",
            "/api/factory/dispatches",
            json!({
                "dealer_name": "Ravi Energy",
                "dispatch_date": "2024-05-09",
                "csv": "serial,model\nSN2,HY-5K\nSN1,HY-5K\n",
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["serial_numbers"], json!(["SN1", "SN2"]));
    assert_eq!(created["rejected"], json!([]));
}

#[tokio::test]
async fn preview_of_an_unreadable_csv_is_422() {
    let app = app();

    let (status, body) = call(
        &app,
        send_json(
            "POST",
            "/api/factory/dispatches/preview",
            json!({ "dealer_name": "Ravi Energy", "csv": "" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "IMPORT_FAILED");
}

#[tokio::test]
async fn csv_import_merges_into_selection() {
    let app = app();
    register(&app, "m-hyb-5k", "SN1\nSN2\nSN10").await;

    let (status, body) = call(
        &app,
        send_json(
            "POST",
            "/api/factory/dispatches/import",
            json!({ "existing": ["SN2"], "csv": "Serial Number\nSN10\nSN1\nSN2\n" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["selection"], json!(["SN1", "SN2", "SN10"]));
    assert_eq!(body["added"], 2);
    assert_eq!(body["duplicates"], 1);
}

// =============================================================================
// Stock, Dealers, Registration
// =============================================================================

#[tokio::test]
async fn unknown_category_is_400() {
    let app = app();

    let (status, _) = call(&app, get("/api/factory/stock/serials?category=toaster")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn dealer_hierarchy_nests_sub_dealers() {
    let app = app();

    let (status, body) = call(&app, get("/api/factory/dealers/hierarchy")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    let flat = body["flat"].as_array().unwrap();
    let sub = flat.iter().find(|d| d["id"] == "d-north-1").unwrap();
    assert_eq!(sub["depth"], 1);
}

#[tokio::test]
async fn dealer_search_matches_names() {
    let app = app();

    let (status, body) = call(&app, get("/api/factory/dealers/search?q=ravi")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dealers"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn registering_for_an_unknown_model_is_404() {
    let app = app();

    let (status, body) = call(
        &app,
        send_json(
            "POST",
            "/api/factory/inverters/register",
            json!({ "model_id": "m-nope", "text": "X1" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "MODEL_NOT_FOUND");
}

// =============================================================================
// Parts
// =============================================================================

#[tokio::test]
async fn part_lifecycle() {
    let app = app();

    let (status, created) = call(
        &app,
        send_json(
            "POST",
            "/api/factory/parts",
            json!({ "name": "DC Breaker", "part_code": "DCB-32", "quantity": 4 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = call(
        &app,
        send_json("PUT", &format!("/api/factory/parts/{}", id), json!({ "quantity": 9 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["quantity"], 9);

    let (status, _) = call(
        &app,
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/factory/parts/{}", id))
            .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, parts) = call(&app, get("/api/factory/parts")).await;
    assert_eq!(parts.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn dispatching_more_parts_than_on_hand_is_rejected() {
    let app = app();

    let (status, _) = call(
        &app,
        send_json(
            "POST",
            "/api/factory/parts/dispatch",
            json!({
                "part_id": "p-fan-80",
                "quantity": 500,
                "recipient_name": "Southern Power House",
                "dispatch_date": "2024-05-09",
            }),
        ),
    )
    .await;

    assert!(status.is_client_error());
}
