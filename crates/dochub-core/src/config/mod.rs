//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field carries a serde default so that a missing
//! file still yields a usable configuration.

pub mod app;
pub mod cache;
pub mod database;
pub mod logging;
pub mod versioning;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::cache::CacheConfig;
pub use self::database::{DatabaseBackend, DatabaseConfig};
pub use self::logging::LoggingConfig;
pub use self::versioning::{IndexConfig, RollbackConfig, VersioningConfig};

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Persistence backend settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Version and conflict cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Version creation and diff limits.
    #[serde(default)]
    pub versioning: VersioningConfig,
    /// Rollback risk thresholds.
    #[serde(default)]
    pub rollback: RollbackConfig,
    /// Content index chunking.
    #[serde(default)]
    pub index: IndexConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `DOCHUB__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config", env)
    }

    /// Load configuration from an explicit directory.
    pub fn load_from(dir: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("DOCHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make the service misbehave at runtime.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.index.chunk_size == 0 {
            return Err(AppError::configuration("index.chunk_size must be positive"));
        }
        if self.index.chunk_overlap >= self.index.chunk_size {
            return Err(AppError::configuration(
                "index.chunk_overlap must be smaller than index.chunk_size",
            ));
        }
        if self.versioning.default_keep_versions == 0 {
            return Err(AppError::configuration(
                "versioning.default_keep_versions must be at least 1",
            ));
        }
        if self.rollback.high_risk_distance < self.rollback.medium_risk_distance {
            return Err(AppError::configuration(
                "rollback.high_risk_distance must not be below rollback.medium_risk_distance",
            ));
        }
        if self.database.backend == DatabaseBackend::Postgres && self.database.url.is_empty() {
            return Err(AppError::configuration(
                "database.url is required for the postgres backend",
            ));
        }
        Ok(())
    }
}
