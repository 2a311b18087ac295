//! Database migrations.
//!
//! Schema migrations for the database. The user tables may already exist in
//! a shared database, so every statement is idempotent.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250601_000001_create_users_table;
mod m20250601_000002_create_user_role_table;
mod m20250601_000003_create_user_acc_table;
mod m20250601_000004_create_user_acc_history_table;
mod m20250601_000005_create_report_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_users_table::Migration),
            Box::new(m20250601_000002_create_user_role_table::Migration),
            Box::new(m20250601_000003_create_user_acc_table::Migration),
            Box::new(m20250601_000004_create_user_acc_history_table::Migration),
            Box::new(m20250601_000005_create_report_table::Migration),
        ]
    }
}
