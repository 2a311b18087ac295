//! User role repository.

use std::sync::Arc;

use crate::entities::{UserRole, user_role};
use areyousafe_common::{AppError, AppResult};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, sea_query::OnConflict,
};

/// Repository for the `user_role` table.
#[derive(Clone)]
pub struct UserRoleRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRoleRepository {
    /// Create a new user role repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a role by its type marker.
    pub async fn find_by_role_type(&self, role_type: &str) -> AppResult<Option<user_role::Model>> {
        UserRole::find()
            .filter(user_role::Column::RoleType.eq(role_type))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a role unless it exists. Returns the number of inserted rows.
    pub async fn insert_if_absent(&self, role_type: &str) -> AppResult<u64> {
        let model = user_role::ActiveModel {
            role_type: Set(role_type.to_string()),
            ..Default::default()
        };

        UserRole::insert(model)
            .on_conflict(
                OnConflict::column(user_role::Column::RoleType)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
