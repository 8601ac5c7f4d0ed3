//! Session store backed by the `sessions` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use ipgate_core::error::{AppError, ErrorKind};
use ipgate_core::result::AppResult;
use ipgate_core::traits::SessionStore;
use ipgate_core::types::{SessionId, SessionRecord};

/// Repository for enumerating and removing sessions.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn list_active_sessions(&self, since: DateTime<Utc>) -> AppResult<Vec<SessionRecord>> {
        sqlx::query_as::<_, SessionRecord>(
            "SELECT id, user_id, ip_address, last_activity FROM sessions \
             WHERE last_activity > $1 ORDER BY last_activity ASC",
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list sessions", e))
    }

    async fn count_active_sessions(&self, since: DateTime<Utc>) -> AppResult<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE last_activity > $1")
                .bind(since)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count sessions", e)
                })?;
        Ok(count.max(0) as u64)
    }

    async fn remove_session(&self, id: SessionId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to remove session", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
