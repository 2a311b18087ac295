//! User endpoints.

use areyousafe_common::AppResult;
use areyousafe_db::entities::users;
use axum::{Json, Router, extract::State, routing::post};
use serde::Serialize;

use crate::middleware::AppState;

/// Durable user record.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub front_id: String,
    pub name: String,
}

impl From<users::Model> for UserResponse {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            front_id: user.front_id,
            name: user.name,
        }
    }
}

/// Upsert the author of the most recent report.
async fn from_latest_report(State(state): State<AppState>) -> AppResult<Json<UserResponse>> {
    let user = state.report_service.upsert_latest_reporter().await?;
    Ok(Json(user.into()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/from-latest-report", post(from_latest_report))
}
