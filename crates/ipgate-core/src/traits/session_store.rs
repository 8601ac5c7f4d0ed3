//! Session store collaborator.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::result::AppResult;
use crate::types::{SessionId, SessionRecord};

/// Queryable view over the external session storage engine.
///
/// Implementations: PostgreSQL (`ipgate-database`) and in-memory
/// (`ipgate-auth::session::memory`).
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// List sessions whose last activity is strictly after `since`.
    async fn list_active_sessions(&self, since: DateTime<Utc>) -> AppResult<Vec<SessionRecord>>;

    /// Count sessions whose last activity is strictly after `since`.
    async fn count_active_sessions(&self, since: DateTime<Utc>) -> AppResult<u64> {
        Ok(self.list_active_sessions(since).await?.len() as u64)
    }

    /// Remove a session.
    ///
    /// Returns `Ok(false)` when the session was already gone; that is not
    /// an error.
    async fn remove_session(&self, id: SessionId) -> AppResult<bool>;
}
