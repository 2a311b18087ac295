//! Report model and service.

use areyousafe_common::{AppError, AppResult};
use areyousafe_db::entities::users;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use validator::Validate;

pub use areyousafe_db::entities::report::ReportStatus;

use crate::services::catalog::{Location, Symbol};
use crate::services::jobs::ReconciliationQueue;
use crate::services::reconciliation::ReconciliationService;
use crate::services::report_store::SharedReportStore;

/// A point marked on the body map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BodyMapPoint {
    pub x: f64,
    pub y: f64,
    #[validate(length(min = 1, max = 64))]
    pub body_part: String,
}

/// How the student felt, 1 (fine) to 5 (very bad).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct EmotionScale {
    #[validate(range(min = 1, max = 5))]
    pub level: i32,
    pub color: String,
}

/// How often the behavior happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyValue {
    Once,
    Sometimes,
    Often,
    Always,
}

impl FrequencyValue {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Once => "once",
            Self::Sometimes => "sometimes",
            Self::Often => "often",
            Self::Always => "always",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frequency {
    pub value: FrequencyValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyFeeling {
    VerySafe,
    Safe,
    Neutral,
    Unsafe,
    VeryUnsafe,
}

impl SafetyFeeling {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VerySafe => "very_safe",
            Self::Safe => "safe",
            Self::Neutral => "neutral",
            Self::Unsafe => "unsafe",
            Self::VeryUnsafe => "very_unsafe",
        }
    }
}

/// How safe the student feels at school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SafetyThermometer {
    #[validate(range(min = 1, max = 5))]
    pub level: i32,
    pub feeling: SafetyFeeling,
}

/// Input for submitting a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReportCreate {
    #[validate(length(min = 1, max = 128))]
    pub student_id: String,
    #[validate(length(min = 1, max = 256))]
    pub student_name: String,
    #[validate(length(min = 1))]
    pub symbols: Vec<Symbol>,
    #[serde(default)]
    #[validate(nested)]
    pub body_map: Option<Vec<BodyMapPoint>>,
    #[validate(nested)]
    pub emotion: EmotionScale,
    pub location: Location,
    pub frequency: Frequency,
    #[validate(nested)]
    pub safety: SafetyThermometer,
}

/// A submitted report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub symbols: Vec<Symbol>,
    pub body_map: Option<Vec<BodyMapPoint>>,
    pub emotion: EmotionScale,
    pub location: Location,
    pub frequency: Frequency,
    pub safety: SafetyThermometer,
    pub status: ReportStatus,
    pub teacher_notes: Option<String>,
}

impl Report {
    /// Build a fresh pending report from submitted input.
    #[must_use]
    pub fn from_input(id: String, timestamp: DateTime<Utc>, input: ReportCreate) -> Self {
        Self {
            id,
            student_id: input.student_id,
            student_name: input.student_name,
            timestamp: Some(timestamp),
            symbols: input.symbols,
            body_map: input.body_map,
            emotion: input.emotion,
            location: input.location,
            frequency: input.frequency,
            safety: input.safety,
            status: ReportStatus::Pending,
            teacher_notes: None,
        }
    }

    /// Body-map points, empty when none were marked.
    #[must_use]
    pub fn body_map_points(&self) -> &[BodyMapPoint] {
        self.body_map.as_deref().unwrap_or_default()
    }

    /// Apply a partial update.
    pub fn apply(&mut self, update: ReportUpdate) {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(notes) = update.teacher_notes {
            self.teacher_notes = Some(notes);
        }
    }
}

/// Partial update of a report by staff.
///
/// `teacher_notes: Some(String::new())` clears the notes; `None` keeps them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportUpdate {
    pub status: Option<ReportStatus>,
    pub teacher_notes: Option<String>,
}

impl ReportUpdate {
    /// Build an update from raw request values.
    ///
    /// An empty status string counts as "not provided".
    pub fn from_raw(status: Option<&str>, teacher_notes: Option<String>) -> AppResult<Self> {
        let status = match status.filter(|s| !s.is_empty()) {
            Some(raw) => Some(ReportStatus::parse(raw).ok_or_else(|| {
                AppError::Validation(format!(
                    "status must be one of pending, reviewed, resolved (got {raw:?})"
                ))
            })?),
            None => None,
        };

        Ok(Self {
            status,
            teacher_notes,
        })
    }
}

/// Order reports newest first; reports without timestamp go last.
pub fn sort_newest_first(reports: &mut [Report]) {
    reports.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// Service for submitting and triaging reports.
#[derive(Clone)]
pub struct ReportService {
    store: SharedReportStore,
    reconciliation: ReconciliationService,
    queue: Option<ReconciliationQueue>,
}

impl ReportService {
    /// Create a new report service.
    ///
    /// Without a queue, submitted reports are not reconciled into the user
    /// tables.
    #[must_use]
    pub fn new(
        store: SharedReportStore,
        reconciliation: ReconciliationService,
        queue: Option<ReconciliationQueue>,
    ) -> Self {
        Self {
            store,
            reconciliation,
            queue,
        }
    }

    /// Submit a report.
    ///
    /// User and history bookkeeping runs in the background; its failures never
    /// reach the submitter.
    pub async fn create(&self, input: ReportCreate) -> AppResult<Report> {
        input.validate()?;

        let report = self.store.create(input).await?;
        info!(report_id = %report.id, student_id = %report.student_id, "Report created");

        match &self.queue {
            Some(queue) => {
                queue.enqueue(report.clone());
            }
            None => debug!(report_id = %report.id, "Reconciliation disabled, skipping"),
        }

        Ok(report)
    }

    /// All reports, newest first.
    pub async fn list(&self) -> AppResult<Vec<Report>> {
        self.store.list_all().await
    }

    /// A single report.
    pub async fn get(&self, id: &str) -> AppResult<Report> {
        self.store.get(id).await
    }

    /// Change status and/or teacher notes.
    pub async fn update(&self, id: &str, update: ReportUpdate) -> AppResult<Report> {
        let report = self.store.update(id, update).await?;
        info!(report_id = %report.id, status = report.status.as_str(), "Report updated");
        Ok(report)
    }

    /// All reports of a student.
    pub async fn list_by_student(&self, student_id: &str) -> AppResult<Vec<Report>> {
        self.store.list_by_student(student_id).await
    }

    /// Upsert the author of the most recent report into the durable users.
    pub async fn upsert_latest_reporter(&self) -> AppResult<users::Model> {
        let latest = self
            .store
            .latest()
            .await?
            .ok_or_else(|| AppError::NotFound("No report found".to_string()))?;

        self.reconciliation.upsert_user_from_report(&latest).await
    }
}
