//! PostgreSQL connection pool management.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use ipgate_core::config::DatabaseConfig;
use ipgate_core::error::{AppError, ErrorKind};
use ipgate_core::traits::{SessionStore, SettingsStore, UserDirectory};

use crate::repositories::{SessionRepository, SettingsRepository, UserRepository};

/// Wrapper around the sqlx PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    /// The underlying sqlx connection pool.
    pool: PgPool,
}

impl DatabasePool {
    /// Connect using the `[database]` configuration section.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        info!(
            url = %mask_password(&config.url),
            max_connections = config.max_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to connect to database: {e}"),
                    e,
                )
            })?;

        Ok(Self { pool })
    }

    /// Return a reference to the underlying sqlx pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// User directory over the `users` table.
    pub fn user_directory(&self) -> Arc<dyn UserDirectory> {
        Arc::new(UserRepository::new(self.pool.clone()))
    }

    /// Session store over the `sessions` table.
    pub fn session_store(&self) -> Arc<dyn SessionStore> {
        Arc::new(SessionRepository::new(self.pool.clone()))
    }

    /// Settings store over the `ip_gate_settings` table.
    pub fn settings_store(&self) -> Arc<dyn SettingsStore> {
        Arc::new(SettingsRepository::new(self.pool.clone()))
    }

    /// Close all connections in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

/// Mask the password portion of a database URL for safe logging.
fn mask_password(url: &str) -> String {
    let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
    let Some(at_pos) = url.rfind('@') else {
        return url.to_string();
    };
    match url[..at_pos].rfind(':') {
        Some(colon_pos) if colon_pos > scheme_end => {
            format!("{}:****@{}", &url[..colon_pos], &url[at_pos + 1..])
        }
        _ => url.to_string(),
    }
}
