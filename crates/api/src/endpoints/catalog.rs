//! Reference data endpoints.

use areyousafe_core::{Location, Symbol, list_locations, list_symbols};
use axum::{Json, Router, routing::get};

use crate::middleware::AppState;

/// Symbols offered by the reporting UI, in display order.
async fn symbols() -> Json<Vec<Symbol>> {
    Json(list_symbols())
}

/// Locations offered by the reporting UI, in display order.
async fn locations() -> Json<Vec<Location>> {
    Json(list_locations())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/symbols", get(symbols))
        .route("/locations", get(locations))
}
