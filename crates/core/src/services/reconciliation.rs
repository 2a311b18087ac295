//! Reconciliation of submitted reports into the durable user tables.
//!
//! For every report the author is recorded in `users`, a student account is
//! ensured in `user_acc` and one `user_acc_history` row is written per
//! body-map point (or a single row without body part).

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use areyousafe_common::{AppError, AppResult};
use areyousafe_db::entities::user_role::STUDENT_ROLE_TYPE;
use areyousafe_db::entities::{user_acc_history, users};
use areyousafe_db::repositories::{
    UserAccHistoryRepository, UserAccRepository, UserRoleRepository, UsersRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::Set;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::services::mapping::{
    map_body_part, map_emotion, map_frequency, map_location, map_safety_feeling,
};
use crate::services::report::Report;

/// Something that can bring the user tables in line with a report.
#[async_trait]
pub trait ReportReconciler: Send + Sync {
    /// Reconcile one report. Safe to call again for the same report's author.
    async fn reconcile(&self, report: &Report) -> AppResult<()>;
}

/// Writes report authors, accounts and history rows.
#[derive(Clone)]
pub struct ReconciliationService {
    users: UsersRepository,
    roles: UserRoleRepository,
    accounts: UserAccRepository,
    history: UserAccHistoryRepository,
    student_role_id: Arc<OnceCell<i32>>,
    timeout: Duration,
}

impl ReconciliationService {
    /// Create a new reconciliation service.
    ///
    /// `timeout` bounds every single database round trip.
    #[must_use]
    pub fn new(
        users: UsersRepository,
        roles: UserRoleRepository,
        accounts: UserAccRepository,
        history: UserAccHistoryRepository,
        timeout: Duration,
    ) -> Self {
        Self {
            users,
            roles,
            accounts,
            history,
            student_role_id: Arc::new(OnceCell::new()),
            timeout,
        }
    }

    async fn bounded<T>(
        &self,
        operation: &str,
        fut: impl Future<Output = AppResult<T>> + Send,
    ) -> AppResult<T> {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| AppError::Timeout(format!("{operation} exceeded {:?}", self.timeout)))?
    }

    /// Insert the user unless the `front_id` is already known.
    pub async fn ensure_user(&self, front_id: &str, name: &str) -> AppResult<()> {
        let inserted = self
            .bounded("insert user", self.users.insert_if_absent(front_id, name))
            .await?;
        if inserted > 0 {
            debug!(front_id = %front_id, "User created");
        }
        Ok(())
    }

    /// Id of the student role. Resolved once per process.
    pub async fn ensure_student_role_id(&self) -> AppResult<i32> {
        self.student_role_id
            .get_or_try_init(|| async {
                if let Some(role) = self
                    .bounded("select role", self.roles.find_by_role_type(STUDENT_ROLE_TYPE))
                    .await?
                {
                    return Ok::<_, AppError>(role.id);
                }

                self.bounded("insert role", self.roles.insert_if_absent(STUDENT_ROLE_TYPE))
                    .await?;

                self.bounded("select role", self.roles.find_by_role_type(STUDENT_ROLE_TYPE))
                    .await?
                    .map(|role| role.id)
                    .ok_or_else(|| {
                        AppError::Internal(format!("Role {STUDENT_ROLE_TYPE} could not be created"))
                    })
            })
            .await
            .copied()
    }

    /// Id of the account `(role_id, name)`, created if missing.
    pub async fn ensure_user_account(&self, role_id: i32, name: &str) -> AppResult<i32> {
        self.bounded("insert account", self.accounts.insert_if_absent(role_id, name))
            .await?;

        self.bounded(
            "select account",
            self.accounts.find_by_role_and_name(role_id, name),
        )
        .await?
        .map(|account| account.id)
        .ok_or_else(|| AppError::Internal(format!("Account {name:?} could not be created")))
    }

    /// Write the history rows of a report. Returns the number of rows.
    pub async fn create_history(&self, report: &Report, account_id: i32) -> AppResult<u64> {
        let event_time = report.timestamp.unwrap_or_else(Utc::now);
        let rows = history_rows(report, account_id, event_time);
        self.bounded("insert history", self.history.insert_many(rows))
            .await
    }

    /// Insert the report's author or refresh their name.
    pub async fn upsert_user_from_report(&self, report: &Report) -> AppResult<users::Model> {
        let user = self
            .bounded(
                "upsert user",
                self.users.upsert(&report.student_id, &report.student_name),
            )
            .await?;
        info!(front_id = %user.front_id, user_id = user.id, "User upserted from latest report");
        Ok(user)
    }
}

#[async_trait]
impl ReportReconciler for ReconciliationService {
    async fn reconcile(&self, report: &Report) -> AppResult<()> {
        self.ensure_user(&report.student_id, &report.student_name)
            .await?;
        let role_id = self.ensure_student_role_id().await?;
        let account_id = self
            .ensure_user_account(role_id, &report.student_name)
            .await?;
        let rows = self.create_history(report, account_id).await?;

        info!(
            report_id = %report.id,
            account_id,
            history_rows = rows,
            safety_code = map_safety_feeling(report.safety.feeling.as_str(), report.safety.level),
            "Report reconciled"
        );
        Ok(())
    }
}

/// Symbol labels joined for the history description.
#[must_use]
pub fn history_description(report: &Report) -> String {
    report
        .symbols
        .iter()
        .map(|s| s.label.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// History rows for a report: one per body-map point, or one without body part.
#[must_use]
pub fn history_rows(
    report: &Report,
    account_id: i32,
    event_time: DateTime<Utc>,
) -> Vec<user_acc_history::ActiveModel> {
    let description = history_description(report);
    let row = |description: String, body_part_id: Option<i32>| user_acc_history::ActiveModel {
        event_time: Set(event_time.fixed_offset()),
        location_id: Set(map_location(&report.location.id)),
        emotion_id: Set(map_emotion(report.emotion.level)),
        user_acc_id: Set(account_id),
        frequency_index_id: Set(map_frequency(report.frequency.value.as_str())),
        description: Set(description),
        body_part_id: Set(body_part_id),
        ..Default::default()
    };

    let points = report.body_map_points();
    if points.is_empty() {
        return vec![row(description, None)];
    }

    points
        .iter()
        .map(|point| {
            row(
                format!("{description} - {}", point.body_part),
                Some(map_body_part(&point.body_part)),
            )
        })
        .collect()
}
