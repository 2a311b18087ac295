//! Application configuration.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Origins allowed when nothing else is configured (local frontend dev servers).
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

/// Domain suffix of the frontend preview hosting.
pub const PREVIEW_HOST_SUFFIX: &str = "vercel.app";

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Cross-origin configuration.
    #[serde(default)]
    pub cors: CorsConfig,
    /// Report storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Background reconciliation configuration.
    #[serde(default)]
    pub reconciliation: ReconciliationConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Cross-origin request configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins.
    #[serde(default = "default_cors_origins")]
    pub origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origins: default_cors_origins(),
        }
    }
}

impl CorsConfig {
    /// Configured origins, trimmed, with empty entries removed.
    #[must_use]
    pub fn allowed_origins(&self) -> Vec<String> {
        self.origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(ToString::to_string)
            .collect()
    }

    /// Whether preview deployments (`https://*.vercel.app`) should be allowed.
    ///
    /// True as soon as one configured origin belongs to the preview domain.
    #[must_use]
    pub fn allow_preview_deployments(&self) -> bool {
        self.allowed_origins()
            .iter()
            .any(|origin| origin.contains(PREVIEW_HOST_SUFFIX))
    }
}

/// Which report store backs the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local store, lost on restart.
    #[default]
    Memory,
    /// `PostgreSQL` `report` table.
    Database,
}

/// Report storage configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Selected backend.
    #[serde(default)]
    pub backend: StorageBackend,
}

/// Configuration of the user/account reconciliation worker.
#[derive(Debug, Clone, Deserialize)]
pub struct ReconciliationConfig {
    /// Whether reports are reconciled into the user tables at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Attempts after the first failure before a job is dropped.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Delay before the first retry, in milliseconds.
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    /// Upper bound for the backoff delay, in milliseconds.
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    /// Timeout for a single database round trip, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Capacity of the pending job queue.
    #[serde(default = "default_queue_size")]
    pub queue_size: usize,
    /// Maximum number of jobs processed concurrently.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            timeout_secs: default_timeout_secs(),
            queue_size: default_queue_size(),
            workers: default_workers(),
        }
    }
}

impl ReconciliationConfig {
    /// Timeout applied to each database round trip, at least one second.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8000
}

const fn default_max_connections() -> u32 {
    20
}

const fn default_min_connections() -> u32 {
    1
}

fn default_cors_origins() -> String {
    DEFAULT_CORS_ORIGINS.to_string()
}

const fn default_true() -> bool {
    true
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_initial_delay_ms() -> u64 {
    500
}

const fn default_max_delay_ms() -> u64 {
    10_000
}

const fn default_timeout_secs() -> u64 {
    5
}

const fn default_queue_size() -> usize {
    1000
}

const fn default_workers() -> usize {
    4
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// A `.env` file in the working directory is read first, if present.
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `AREYOUSAFE_ENV`)
    /// 3. Environment variables with `AREYOUSAFE__` prefix
    /// 4. `CORS_ORIGINS`, which overrides `cors.origins` when set
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        let env = std::env::var("AREYOUSAFE_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("AREYOUSAFE")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("cors.origins", std::env::var("CORS_ORIGINS").ok())?
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("AREYOUSAFE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
