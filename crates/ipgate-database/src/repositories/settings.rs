//! Settings store backed by the single-row `ip_gate_settings` table.

use async_trait::async_trait;
use sqlx::PgPool;

use ipgate_core::error::{AppError, ErrorKind};
use ipgate_core::result::AppResult;
use ipgate_core::traits::SettingsStore;
use ipgate_core::types::GateSettings;

/// Repository for the runtime gate settings.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    /// Create a new settings repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upsert one column of the settings row.
    async fn save_column<T>(&self, column: &'static str, value: T) -> AppResult<()>
    where
        T: for<'q> sqlx::Encode<'q, sqlx::Postgres> + sqlx::Type<sqlx::Postgres> + Send + 'static,
    {
        let sql = format!(
            "INSERT INTO ip_gate_settings (id, {column}) VALUES (1, $1) \
             ON CONFLICT (id) DO UPDATE SET {column} = EXCLUDED.{column}, updated_at = NOW()"
        );
        sqlx::query(&sql)
            .bind(value)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to save setting '{column}'"),
                    e,
                )
            })?;
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for SettingsRepository {
    async fn load(&self) -> AppResult<GateSettings> {
        let row = sqlx::query_as::<_, GateSettings>(
            "SELECT valid_ips, check_before_login, error_text FROM ip_gate_settings WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load settings", e))?;
        Ok(row.unwrap_or_default())
    }

    async fn save_valid_ips(&self, valid_ips: &str) -> AppResult<()> {
        self.save_column("valid_ips", valid_ips.to_string()).await
    }

    async fn save_check_before_login(&self, enabled: bool) -> AppResult<()> {
        self.save_column("check_before_login", enabled).await
    }

    async fn save_error_text(&self, error_text: &str) -> AppResult<()> {
        self.save_column("error_text", error_text.to_string()).await
    }
}
