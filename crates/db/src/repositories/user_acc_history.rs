//! Account history repository.

use std::sync::Arc;

use crate::entities::{UserAccHistory, user_acc_history};
use areyousafe_common::{AppError, AppResult};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

/// Repository for the `user_acc_history` table.
#[derive(Clone)]
pub struct UserAccHistoryRepository {
    db: Arc<DatabaseConnection>,
}

impl UserAccHistoryRepository {
    /// Create a new history repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert history rows in a single statement.
    ///
    /// Returns the number of inserted rows.
    pub async fn insert_many(&self, rows: Vec<user_acc_history::ActiveModel>) -> AppResult<u64> {
        if rows.is_empty() {
            return Ok(0);
        }

        UserAccHistory::insert_many(rows)
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// History of an account, oldest first.
    pub async fn find_by_account(&self, account_id: i32) -> AppResult<Vec<user_acc_history::Model>> {
        UserAccHistory::find()
            .filter(user_acc_history::Column::UserAccId.eq(account_id))
            .order_by_asc(user_acc_history::Column::EventTime)
            .order_by_asc(user_acc_history::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Set};

    fn draft(description: &str, body_part_id: Option<i32>) -> user_acc_history::ActiveModel {
        user_acc_history::ActiveModel {
            event_time: Set(Utc::now().into()),
            location_id: Set(2),
            emotion_id: Set(2),
            user_acc_id: Set(12),
            frequency_index_id: Set(2),
            description: Set(description.to_string()),
            body_part_id: Set(body_part_id),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_insert_many() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 2,
                }])
                .into_connection(),
        );

        let repo = UserAccHistoryRepository::new(db);
        let inserted = repo
            .insert_many(vec![draft("Pousser - arm", Some(27)), draft("Pousser - head", Some(1))])
            .await
            .unwrap();
        assert_eq!(inserted, 2);
    }

    #[tokio::test]
    async fn test_insert_many_empty_skips_database() {
        // No exec results queued: touching the database would fail.
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = UserAccHistoryRepository::new(db);
        assert_eq!(repo.insert_many(Vec::new()).await.unwrap(), 0);
    }
}
