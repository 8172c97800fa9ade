//! HTTP surface of the maintenance service

use super::cleanup::remove_redundant_questions;
use super::store::QuestionStore;
use axum::{
    extract::State,
    http::{header, HeaderName, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

pub const REMOVE_REDUNDANT_QUESTIONS_ROUTE: &str = "/maintenance/remove-redundant-questions";

pub const FAILURE_MESSAGE: &str = "Failed to remove redundant questions";

const CORS_HEADERS: [(HeaderName, &str); 3] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        "authorization, x-client-info, apikey, content-type",
    ),
    (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
];

#[derive(Clone)]
struct MaintenanceState {
    store: Arc<dyn QuestionStore>,
}

pub fn build_router(store: Arc<dyn QuestionStore>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(
            REMOVE_REDUNDANT_QUESTIONS_ROUTE,
            post(http_remove_redundant_questions).options(preflight),
        )
        .with_state(MaintenanceState { store })
}

async fn healthz(State(state): State<MaintenanceState>) -> impl IntoResponse {
    match state.store.health_check().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(error) => {
            tracing::warn!(%error, "datastore health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    }
}

async fn preflight() -> impl IntoResponse {
    (StatusCode::OK, CORS_HEADERS)
}

async fn http_remove_redundant_questions(
    State(state): State<MaintenanceState>,
) -> impl IntoResponse {
    match remove_redundant_questions(state.store.as_ref()).await {
        Ok(report) => (
            StatusCode::OK,
            CORS_HEADERS,
            Json(json!({
                "success": true,
                "message": "Redundant questions removed",
                "deleted": report.deleted,
            })),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            CORS_HEADERS,
            Json(json!({ "error": FAILURE_MESSAGE })),
        ),
    }
}
