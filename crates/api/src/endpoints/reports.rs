//! Report endpoints.

use areyousafe_common::AppResult;
use areyousafe_core::{Report, ReportCreate, ReportUpdate};
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;

use crate::{
    extractors::{ValidatedJson, parse_optional_body},
    middleware::AppState,
};

// ==================== Request Types ====================

/// Status/notes change, accepted both as query string and JSON body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReportRequest {
    pub status: Option<String>,
    pub teacher_notes: Option<String>,
}

impl UpdateReportRequest {
    /// Combine with another request; fields set in `other` win.
    fn overridden_by(self, other: Self) -> Self {
        Self {
            status: other.status.or(self.status),
            teacher_notes: other.teacher_notes.or(self.teacher_notes),
        }
    }
}

// ==================== Handlers ====================

/// Submit a report.
async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<ReportCreate>,
) -> AppResult<(StatusCode, Json<Report>)> {
    let report = state.report_service.create(input).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// All reports, newest first.
async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Report>>> {
    Ok(Json(state.report_service.list().await?))
}

async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Report>> {
    Ok(Json(state.report_service.get(&id).await?))
}

/// Change status and/or teacher notes.
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<UpdateReportRequest>,
    body: Bytes,
) -> AppResult<Json<Report>> {
    let request = match parse_optional_body::<UpdateReportRequest>(&body)? {
        Some(body) => query.overridden_by(body),
        None => query,
    };
    let update = ReportUpdate::from_raw(request.status.as_deref(), request.teacher_notes)?;

    Ok(Json(state.report_service.update(&id, update).await?))
}

async fn by_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> AppResult<Json<Vec<Report>>> {
    Ok(Json(state.report_service.list_by_student(&student_id).await?))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(show).put(update))
        .route("/student/{student_id}", get(by_student))
}
