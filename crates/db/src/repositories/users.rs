//! Users repository.

use std::sync::Arc;

use crate::entities::{Users, users};
use areyousafe_common::{AppError, AppResult};
use sea_orm::{DatabaseConnection, EntityTrait, Set, sea_query::OnConflict};

/// Repository for the durable `users` table.
#[derive(Clone)]
pub struct UsersRepository {
    db: Arc<DatabaseConnection>,
}

impl UsersRepository {
    /// Create a new users repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert a user unless one with the same `front_id` exists.
    ///
    /// Returns the number of inserted rows (0 or 1).
    pub async fn insert_if_absent(&self, front_id: &str, name: &str) -> AppResult<u64> {
        let model = users::ActiveModel {
            front_id: Set(front_id.to_string()),
            name: Set(name.to_string()),
            ..Default::default()
        };

        Users::insert(model)
            .on_conflict(
                OnConflict::column(users::Column::FrontId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a user or refresh the name of the existing one.
    pub async fn upsert(&self, front_id: &str, name: &str) -> AppResult<users::Model> {
        let model = users::ActiveModel {
            front_id: Set(front_id.to_string()),
            name: Set(name.to_string()),
            ..Default::default()
        };

        Users::insert(model)
            .on_conflict(
                OnConflict::column(users::Column::FrontId)
                    .update_column(users::Column::Name)
                    .to_owned(),
            )
            .exec_with_returning(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
