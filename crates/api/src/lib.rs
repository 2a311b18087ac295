//! HTTP API layer for the Are You Safe backend.
//!
//! - **Endpoints**: reference data, report submission and triage, user upsert
//! - **Extractors**: validated JSON bodies
//! - **CORS**: allowed origins built from configuration
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod cors;
pub mod endpoints;
pub mod extractors;
pub mod middleware;

pub use cors::cors_layer;
pub use endpoints::router;
pub use middleware::AppState;
