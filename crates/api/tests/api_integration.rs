//! API integration tests.
//!
//! These tests drive the full router over the in-memory report store; the
//! user tables are backed by a mock database.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::redundant_clone)]

use std::sync::Arc;
use std::time::Duration;

use areyousafe_api::{AppState, cors_layer, router as api_router};
use areyousafe_common::config::CorsConfig;
use areyousafe_core::{
    InMemoryReportStore, ReconciliationService, ReconciliationWorker, ReportService, RetryConfig,
};
use areyousafe_db::entities::users;
use areyousafe_db::repositories::{
    UserAccHistoryRepository, UserAccRepository, UserRoleRepository, UsersRepository,
};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use serde_json::{Value, json};
use tower::ServiceExt;

fn create_reconciliation(db: DatabaseConnection) -> ReconciliationService {
    let db = Arc::new(db);
    ReconciliationService::new(
        UsersRepository::new(Arc::clone(&db)),
        UserRoleRepository::new(Arc::clone(&db)),
        UserAccRepository::new(Arc::clone(&db)),
        UserAccHistoryRepository::new(Arc::clone(&db)),
        Duration::from_secs(5),
    )
}

/// Create test app state with a mock database and no background worker.
fn create_test_state(db: DatabaseConnection) -> AppState {
    let service = ReportService::new(
        Arc::new(InMemoryReportStore::new()),
        create_reconciliation(db),
        None,
    );
    AppState::new(service)
}

/// Create the test router.
fn create_test_router() -> Router {
    create_router_with_db(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
}

fn create_router_with_db(db: DatabaseConnection) -> Router {
    api_router().with_state(create_test_state(db))
}

fn report_body(student_id: &str) -> Value {
    json!({
        "studentId": student_id,
        "studentName": "Alice",
        "symbols": [{"id": "push", "label": "Pousser", "category": "physical"}],
        "bodyMap": [{"x": 0.5, "y": 0.3, "bodyPart": "arm"}],
        "emotion": {"level": 2, "color": "yellow"},
        "location": {"id": "classroom", "name": "Salle de classe", "icon": "🏫"},
        "frequency": {"value": "sometimes"},
        "safety": {"level": 3, "feeling": "neutral"}
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().uri(uri).method(method);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_report(app: &Router, student_id: &str) -> Value {
    let response = send(app, "POST", "/api/reports", Some(report_body(student_id))).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

#[tokio::test]
async fn test_root_endpoint() {
    let app = create_test_router();

    let response = send(&app, "GET", "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["message"], "Are You Safe API");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_router();

    let response = send(&app, "GET", "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_catalog_endpoints() {
    let app = create_test_router();

    let symbols = json_body(send(&app, "GET", "/api/symbols", None).await).await;
    let symbols = symbols.as_array().unwrap();
    assert_eq!(symbols.len(), 13);
    assert_eq!(symbols[0]["id"], "everything_fine");
    assert_eq!(symbols[0]["category"], "general");

    let locations = json_body(send(&app, "GET", "/api/locations", None).await).await;
    let locations = locations.as_array().unwrap();
    assert_eq!(locations.len(), 7);
    assert_eq!(locations[0]["id"], "classroom");
}

#[tokio::test]
async fn test_create_and_fetch_report() {
    let app = create_test_router();

    let created = create_report(&app, "s1").await;
    assert_eq!(created["status"], "pending");
    assert_eq!(created["studentId"], "s1");
    assert!(created["teacherNotes"].is_null());
    assert!(created["timestamp"].is_string());
    let id = created["id"].as_str().unwrap();
    assert!(!id.is_empty());

    let response = send(&app, "GET", &format!("/api/reports/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, created);
}

#[tokio::test]
async fn test_get_unknown_report_returns_404() {
    let app = create_test_router();

    let response = send(&app, "GET", "/api/reports/does-not-exist", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "REPORT_NOT_FOUND");
}

#[tokio::test]
async fn test_create_report_validation() {
    let app = create_test_router();

    let mut body = report_body("s1");
    body["symbols"] = json!([]);
    let response = send(&app, "POST", "/api/reports", Some(body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");

    let mut body = report_body("s1");
    body["frequency"] = json!({"value": "never"});
    let response = send(&app, "POST", "/api/reports", Some(body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut body = report_body("s1");
    body.as_object_mut().unwrap().remove("studentName");
    let response = send(&app, "POST", "/api/reports", Some(body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was stored.
    let reports = json_body(send(&app, "GET", "/api/reports", None).await).await;
    assert!(reports.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_report_with_malformed_json() {
    let app = create_test_router();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/reports")
                .method("POST")
                .header("Content-Type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_update_report_from_query() {
    let app = create_test_router();
    let created = create_report(&app, "s1").await;
    let id = created["id"].as_str().unwrap();

    let response = send(
        &app,
        "PUT",
        &format!("/api/reports/{id}?status=reviewed&teacherNotes=Seen"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "reviewed");
    assert_eq!(body["teacherNotes"], "Seen");
}

#[tokio::test]
async fn test_update_report_body_wins_over_query() {
    let app = create_test_router();
    let created = create_report(&app, "s1").await;
    let id = created["id"].as_str().unwrap();

    let response = send(
        &app,
        "PUT",
        &format!("/api/reports/{id}?status=reviewed"),
        Some(json!({"status": "resolved", "teacherNotes": "Parents called"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "resolved");
    assert_eq!(body["teacherNotes"], "Parents called");
}

#[tokio::test]
async fn test_update_report_keeps_unspecified_fields() {
    let app = create_test_router();
    let created = create_report(&app, "s1").await;
    let id = created["id"].as_str().unwrap();

    send(
        &app,
        "PUT",
        &format!("/api/reports/{id}"),
        Some(json!({"teacherNotes": "first"})),
    )
    .await;

    // An empty status means "not provided".
    let response = send(&app, "PUT", &format!("/api/reports/{id}?status="), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "pending");
    assert_eq!(body["teacherNotes"], "first");
}

#[tokio::test]
async fn test_update_report_clears_notes() {
    let app = create_test_router();
    let created = create_report(&app, "s1").await;
    let id = created["id"].as_str().unwrap();

    let response = send(&app, "PUT", &format!("/api/reports/{id}?teacherNotes=abc"), None).await;
    assert_eq!(json_body(response).await["teacherNotes"], "abc");

    let response = send(&app, "PUT", &format!("/api/reports/{id}?teacherNotes="), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["teacherNotes"], "");

    let response = send(&app, "GET", &format!("/api/reports/{id}"), None).await;
    assert_eq!(json_body(response).await["teacherNotes"], "");
}

#[tokio::test]
async fn test_update_report_rejects_unknown_status() {
    let app = create_test_router();
    let created = create_report(&app, "s1").await;
    let id = created["id"].as_str().unwrap();

    let response = send(&app, "PUT", &format!("/api/reports/{id}?status=closed"), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, "GET", &format!("/api/reports/{id}"), None).await;
    assert_eq!(json_body(response).await["status"], "pending");
}

#[tokio::test]
async fn test_update_unknown_report_returns_404() {
    let app = create_test_router();

    let response = send(&app, "PUT", "/api/reports/missing?status=resolved", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_reports_newest_first() {
    let app = create_test_router();

    let first = create_report(&app, "s1").await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = create_report(&app, "s2").await;

    let reports = json_body(send(&app, "GET", "/api/reports", None).await).await;
    let ids: Vec<&str> = reports
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec![second["id"].as_str().unwrap(), first["id"].as_str().unwrap()]
    );
}

#[tokio::test]
async fn test_list_reports_by_student() {
    let app = create_test_router();

    create_report(&app, "s1").await;
    create_report(&app, "s2").await;
    create_report(&app, "s1").await;

    let reports = json_body(send(&app, "GET", "/api/reports/student/s1", None).await).await;
    let reports = reports.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r["studentId"] == "s1"));

    let reports = json_body(send(&app, "GET", "/api/reports/student/nobody", None).await).await;
    assert!(reports.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_from_latest_report_without_reports_returns_404() {
    let app = create_test_router();

    let response = send(&app, "POST", "/api/from-latest-report", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_from_latest_report_upserts_user() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[users::Model {
            id: 1,
            front_id: "s1".to_string(),
            name: "Alice".to_string(),
        }]])
        .into_connection();
    let app = create_router_with_db(db);
    create_report(&app, "s1").await;

    let response = send(&app, "POST", "/api/from-latest-report", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"id": 1, "frontId": "s1", "name": "Alice"})
    );
}

#[tokio::test]
async fn test_from_latest_report_database_failure_returns_500() {
    let app = create_test_router();
    create_report(&app, "s1").await;

    let response = send(&app, "POST", "/api/from-latest-report", None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await["error"]["code"], "DATABASE_ERROR");
}

#[tokio::test]
async fn test_create_succeeds_when_reconciliation_fails() {
    // The mock database has no results queued, so every reconciliation fails.
    let reconciliation =
        create_reconciliation(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
    let worker = ReconciliationWorker::new(
        10,
        1,
        RetryConfig {
            max_retries: 1,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(1),
            multiplier: 2.0,
        },
    );
    let queue = worker.queue();
    let handle = worker.start(Arc::new(reconciliation.clone()));

    let service = ReportService::new(
        Arc::new(InMemoryReportStore::new()),
        reconciliation,
        Some(queue),
    );
    let app = api_router().with_state(AppState::new(service));

    let created = create_report(&app, "s1").await;
    assert_eq!(created["status"], "pending");

    drop(app);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_unknown_endpoint_returns_404() {
    let app = create_test_router();

    let response = send(&app, "GET", "/api/nonexistent", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_allows_configured_and_preview_origins() {
    let cors = CorsConfig {
        origins: "http://localhost:5173,https://are-you-safe.vercel.app".to_string(),
    };
    let app = api_router()
        .layer(cors_layer(&cors))
        .with_state(create_test_state(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        ));

    for origin in ["http://localhost:5173", "https://are-you-safe-git-feature.vercel.app"] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/reports")
                    .method("OPTIONS")
                    .header(header::ORIGIN, origin)
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            origin
        );
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
            "true"
        );
    }

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/reports")
                .header(header::ORIGIN, "https://evil.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
