//! Core business logic for the Are You Safe backend.
//!
//! - **Catalog**: symbols and locations offered by the reporting UI
//! - **Mapping**: frontend identifiers to the integer codes of the user tables
//! - **Reports**: the report store and the service in front of it
//! - **Reconciliation**: durable user/account/history bookkeeping, run in the
//!   background with bounded retries

pub mod services;

pub use services::*;
