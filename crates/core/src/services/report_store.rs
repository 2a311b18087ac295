//! Report storage backends.

use std::sync::Arc;

use areyousafe_common::{AppError, AppResult, IdGenerator};
use areyousafe_db::entities::report;
use areyousafe_db::repositories::ReportRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{Set, Unchanged};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use crate::services::report::{Report, ReportCreate, ReportUpdate, sort_newest_first};

/// Storage for submitted reports.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Persist a new report with a fresh id, current time and `pending` status.
    async fn create(&self, input: ReportCreate) -> AppResult<Report>;

    /// All reports, newest first, reports without timestamp last.
    async fn list_all(&self) -> AppResult<Vec<Report>>;

    /// A single report, `ReportNotFound` if absent.
    async fn get(&self, id: &str) -> AppResult<Report>;

    /// Apply a partial update and return the result.
    async fn update(&self, id: &str, update: ReportUpdate) -> AppResult<Report>;

    /// Reports of one student, in storage order.
    async fn list_by_student(&self, student_id: &str) -> AppResult<Vec<Report>>;

    /// The report with the greatest timestamp.
    async fn latest(&self) -> AppResult<Option<Report>>;
}

/// Shared handle to the configured store.
pub type SharedReportStore = Arc<dyn ReportStore>;

/// Process-local report store. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryReportStore {
    reports: RwLock<Vec<Report>>,
    id_gen: IdGenerator,
}

impl InMemoryReportStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn create(&self, input: ReportCreate) -> AppResult<Report> {
        let report = Report::from_input(self.id_gen.generate_uuid_v4(), Utc::now(), input);
        self.reports.write().await.push(report.clone());
        Ok(report)
    }

    async fn list_all(&self) -> AppResult<Vec<Report>> {
        let mut reports = self.reports.read().await.clone();
        sort_newest_first(&mut reports);
        Ok(reports)
    }

    async fn get(&self, id: &str) -> AppResult<Report> {
        self.reports
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| AppError::ReportNotFound(id.to_string()))
    }

    async fn update(&self, id: &str, update: ReportUpdate) -> AppResult<Report> {
        let mut reports = self.reports.write().await;
        let report = reports
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::ReportNotFound(id.to_string()))?;

        report.apply(update);
        Ok(report.clone())
    }

    async fn list_by_student(&self, student_id: &str) -> AppResult<Vec<Report>> {
        Ok(self
            .reports
            .read()
            .await
            .iter()
            .filter(|r| r.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn latest(&self) -> AppResult<Option<Report>> {
        Ok(self
            .reports
            .read()
            .await
            .iter()
            .filter(|r| r.timestamp.is_some())
            .max_by_key(|r| r.timestamp)
            .cloned())
    }
}

/// Report store backed by the `report` table.
#[derive(Clone)]
pub struct DatabaseReportStore {
    repo: ReportRepository,
    id_gen: IdGenerator,
}

impl DatabaseReportStore {
    /// Create a store over the given repository.
    #[must_use]
    pub const fn new(repo: ReportRepository) -> Self {
        Self {
            repo,
            id_gen: IdGenerator::new(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> AppResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| AppError::Internal(e.to_string()))
}

fn from_json<T: DeserializeOwned>(id: &str, value: serde_json::Value) -> AppResult<T> {
    serde_json::from_value(value)
        .map_err(|e| AppError::Internal(format!("Malformed report {id}: {e}")))
}

fn to_active_model(report: &Report) -> AppResult<report::ActiveModel> {
    Ok(report::ActiveModel {
        id: Set(report.id.clone()),
        student_id: Set(report.student_id.clone()),
        student_name: Set(report.student_name.clone()),
        timestamp: Set(report.timestamp.map(|ts| ts.fixed_offset())),
        symbols: Set(to_json(&report.symbols)?),
        body_map: Set(report.body_map.as_ref().map(to_json).transpose()?),
        emotion: Set(to_json(&report.emotion)?),
        location: Set(to_json(&report.location)?),
        frequency: Set(to_json(&report.frequency)?),
        safety: Set(to_json(&report.safety)?),
        status: Set(report.status),
        teacher_notes: Set(report.teacher_notes.clone()),
    })
}

fn from_model(model: report::Model) -> AppResult<Report> {
    let id = model.id;
    Ok(Report {
        student_id: model.student_id,
        student_name: model.student_name,
        timestamp: model.timestamp.map(|ts| ts.with_timezone(&Utc)),
        symbols: from_json(&id, model.symbols)?,
        body_map: model.body_map.map(|v| from_json(&id, v)).transpose()?,
        emotion: from_json(&id, model.emotion)?,
        location: from_json(&id, model.location)?,
        frequency: from_json(&id, model.frequency)?,
        safety: from_json(&id, model.safety)?,
        status: model.status,
        teacher_notes: model.teacher_notes,
        id,
    })
}

fn from_models(models: Vec<report::Model>) -> AppResult<Vec<Report>> {
    models.into_iter().map(from_model).collect()
}

#[async_trait]
impl ReportStore for DatabaseReportStore {
    async fn create(&self, input: ReportCreate) -> AppResult<Report> {
        let now: DateTime<Utc> = Utc::now();
        let report = Report::from_input(self.id_gen.generate_uuid_v4(), now, input);
        let model = self.repo.create(to_active_model(&report)?).await?;
        from_model(model)
    }

    async fn list_all(&self) -> AppResult<Vec<Report>> {
        from_models(self.repo.find_all().await?)
    }

    async fn get(&self, id: &str) -> AppResult<Report> {
        from_model(self.repo.get_by_id(id).await?)
    }

    async fn update(&self, id: &str, update: ReportUpdate) -> AppResult<Report> {
        let current = self.repo.get_by_id(id).await?;
        if update.status.is_none() && update.teacher_notes.is_none() {
            return from_model(current);
        }

        // Columns absent from the update stay NotSet and are never written.
        let mut model = report::ActiveModel {
            id: Unchanged(current.id),
            ..Default::default()
        };
        if let Some(status) = update.status {
            model.status = Set(status);
        }
        if let Some(notes) = update.teacher_notes {
            model.teacher_notes = Set(Some(notes));
        }
        from_model(self.repo.update(model).await?)
    }

    async fn list_by_student(&self, student_id: &str) -> AppResult<Vec<Report>> {
        from_models(self.repo.find_by_student(student_id).await?)
    }

    async fn latest(&self) -> AppResult<Option<Report>> {
        self.repo.find_latest().await?.map(from_model).transpose()
    }
}
