//! Service metadata and liveness endpoints.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::middleware::AppState;

/// Service identification.
#[derive(Serialize)]
pub struct MetaResponse {
    pub message: String,
    pub version: String,
}

/// Liveness probe response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

async fn meta() -> Json<MetaResponse> {
    Json(MetaResponse {
        message: "Are You Safe API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(meta))
        .route("/health", get(health))
}
