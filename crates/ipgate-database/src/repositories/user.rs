//! User directory backed by the `users` table.

use async_trait::async_trait;
use sqlx::PgPool;

use ipgate_core::error::{AppError, ErrorKind};
use ipgate_core::result::AppResult;
use ipgate_core::traits::UserDirectory;
use ipgate_core::types::UserRecord;

/// Read-only repository over user accounts.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn find_user(&self, username: &str) -> AppResult<Option<UserRecord>> {
        sqlx::query_as::<_, UserRecord>(
            "SELECT id, username, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))
    }
}
