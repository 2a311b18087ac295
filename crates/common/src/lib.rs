//! Common utilities and shared types for the Are You Safe backend.
//!
//! This crate provides foundational components used across all workspace crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: report identifiers via [`IdGenerator`]
//!
//! # Example
//!
//! ```no_run
//! use areyousafe_common::{Config, IdGenerator, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     let id = id_gen.generate_uuid_v4();
//!     println!("Listening on port {} for report {}", config.server.port, id);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;

pub use config::{Config, StorageBackend};
pub use error::{AppError, AppResult};
pub use id::IdGenerator;
