//! User account repository.

use std::sync::Arc;

use crate::entities::{UserAcc, user_acc};
use areyousafe_common::{AppError, AppResult};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, sea_query::OnConflict,
};

/// Repository for the `user_acc` table.
#[derive(Clone)]
pub struct UserAccRepository {
    db: Arc<DatabaseConnection>,
}

impl UserAccRepository {
    /// Create a new user account repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the account of a role with the given display name.
    pub async fn find_by_role_and_name(
        &self,
        role_id: i32,
        name: &str,
    ) -> AppResult<Option<user_acc::Model>> {
        UserAcc::find()
            .filter(user_acc::Column::UserRoleId.eq(role_id))
            .filter(user_acc::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert an account unless `(role_id, name)` exists.
    /// Returns the number of inserted rows.
    pub async fn insert_if_absent(&self, role_id: i32, name: &str) -> AppResult<u64> {
        let model = user_acc::ActiveModel {
            user_role_id: Set(role_id),
            name: Set(name.to_string()),
            ..Default::default()
        };

        UserAcc::insert(model)
            .on_conflict(
                OnConflict::columns([user_acc::Column::UserRoleId, user_acc::Column::Name])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    #[tokio::test]
    async fn test_find_by_role_and_name() {
        let account = user_acc::Model {
            id: 12,
            user_role_id: 1,
            name: "Alice".to_string(),
        };
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[account.clone()]])
                .into_connection(),
        );

        let repo = UserAccRepository::new(db);
        let result = repo.find_by_role_and_name(1, "Alice").await.unwrap();
        assert_eq!(result, Some(account));
    }

    #[tokio::test]
    async fn test_insert_if_absent() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 12,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = UserAccRepository::new(db);
        assert_eq!(repo.insert_if_absent(1, "Alice").await.unwrap(), 1);
    }
}
