//! Database integration tests.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test --test db_integration -- --ignored`
//!
//! Environment variables:
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` (default: `areyousafe_test`)
//!   `TEST_DB_PASSWORD` (default: `areyousafe_test`)
//!   `TEST_DB_NAME` (default: `areyousafe_test`)

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use areyousafe_db::entities::user_role::STUDENT_ROLE_TYPE;
use areyousafe_db::repositories::{UserAccRepository, UserRoleRepository, UsersRepository};
use areyousafe_db::test_utils::{TestDatabase, TestDbConfig};

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_database_connection() {
    let config = TestDbConfig::default();
    let result = TestDatabase::with_config(config).await;
    assert!(result.is_ok(), "Failed to connect: {:?}", result.err());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_migrations_seed_student_role() {
    let db = TestDatabase::create_unique().await.expect("Failed to create database");
    let conn = Arc::new(sea_orm::SqlxPostgresConnector::from_sqlx_postgres_pool(
        db.connection().get_postgres_connection_pool().clone(),
    ));

    let roles = UserRoleRepository::new(conn);
    let role = roles.find_by_role_type(STUDENT_ROLE_TYPE).await.unwrap();
    assert!(role.is_some());

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_user_insert_is_idempotent() {
    let db = TestDatabase::create_unique().await.expect("Failed to create database");
    let conn = Arc::new(sea_orm::SqlxPostgresConnector::from_sqlx_postgres_pool(
        db.connection().get_postgres_connection_pool().clone(),
    ));
    let users = UsersRepository::new(conn);

    assert_eq!(users.insert_if_absent("s1", "Alice").await.unwrap(), 1);
    assert_eq!(users.insert_if_absent("s1", "Alice").await.unwrap(), 0);

    let upserted = users.upsert("s1", "Alice B.").await.unwrap();
    assert_eq!(upserted.name, "Alice B.");

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_accounts_unique_per_role_and_name() {
    let db = TestDatabase::create_unique().await.expect("Failed to create database");
    let conn = Arc::new(sea_orm::SqlxPostgresConnector::from_sqlx_postgres_pool(
        db.connection().get_postgres_connection_pool().clone(),
    ));
    let roles = UserRoleRepository::new(conn.clone());
    let accounts = UserAccRepository::new(conn);

    let role = roles
        .find_by_role_type(STUDENT_ROLE_TYPE)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(accounts.insert_if_absent(role.id, "Alice").await.unwrap(), 1);
    assert_eq!(accounts.insert_if_absent(role.id, "Alice").await.unwrap(), 0);

    db.drop_database().await.unwrap();
}

#[test]
fn test_config_from_env() {
    // Test that default config is valid
    let config = TestDbConfig::default();
    assert!(!config.host.is_empty());
    assert!(config.port > 0);
    assert!(!config.username.is_empty());
    assert!(!config.database.is_empty());
}

#[test]
fn test_database_url_format() {
    let config = TestDbConfig {
        host: "testhost".to_string(),
        port: 5432,
        username: "testuser".to_string(),
        password: "testpass".to_string(),
        database: "testdb".to_string(),
    };

    let url = config.database_url();
    assert!(url.starts_with("postgres://"));
    assert!(url.contains("testhost"));
    assert!(url.contains("5432"));
    assert!(url.contains("testuser"));
    assert!(url.contains("testdb"));
}

#[test]
fn test_postgres_url_format() {
    let config = TestDbConfig::default();
    let url = config.postgres_url();
    assert!(url.ends_with("/postgres"));
}
