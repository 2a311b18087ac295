//! API endpoints.

mod catalog;
mod meta;
mod reports;
mod users;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    let api = Router::new()
        .merge(catalog::router())
        .merge(users::router())
        .nest("/reports", reports::router());

    Router::new().merge(meta::router()).nest("/api", api)
}
