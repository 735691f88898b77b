use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    backend: &'static str,
}

/// Health check endpoint
///
/// Always 200; `backend` reports whether a model key is configured.
pub async fn health_handler(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        backend: if state.backend.is_some() {
            "configured"
        } else {
            "missing"
        },
    })
}
