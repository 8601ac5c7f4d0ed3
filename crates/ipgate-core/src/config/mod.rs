//! Application configuration schemas.
//!
//! Configuration is deserialized from TOML files via the `config` crate.
//! Each sub-module represents a logical configuration section. Gate
//! settings that operators change at runtime (the allow-list, the
//! pre-login flag, the error template) are not part of this file; they
//! live in the settings store.

pub mod database;
pub mod gate;
pub mod logging;
pub mod server;
pub mod session;

use serde::{Deserialize, Serialize};

pub use self::database::DatabaseConfig;
pub use self::gate::GateConfig;
pub use self::logging::LoggingConfig;
pub use self::server::ServerConfig;
pub use self::session::SessionConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Session window settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Login gate settings.
    #[serde(default)]
    pub gate: GateConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// Merges the given file with an optional environment overlay
    /// (`config/{IPGATE_ENV}.toml`) and environment variables prefixed
    /// with `IPGATE__`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let env = std::env::var("IPGATE_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("IPGATE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self, AppError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(AppError::from)
    }
}
