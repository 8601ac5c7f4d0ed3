//! In-memory session store for single-node setups and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use ipgate_core::error::AppError;
use ipgate_core::traits::SessionStore;
use ipgate_core::types::{SessionId, SessionRecord};

/// Session store backed by a map behind a Tokio lock.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionRecord>>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a session.
    pub async fn insert(&self, session: SessionRecord) {
        self.sessions.write().await.insert(session.id, session);
    }

    /// Whether a session is still present.
    pub async fn contains(&self, id: SessionId) -> bool {
        self.sessions.read().await.contains_key(&id)
    }

    /// Number of stored sessions, regardless of activity.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// True when no sessions are stored.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn list_active_sessions(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<SessionRecord>, AppError> {
        let mut active: Vec<SessionRecord> = self
            .sessions
            .read()
            .await
            .values()
            .filter(|s| s.last_activity > since)
            .cloned()
            .collect();
        active.sort_by_key(|s| s.last_activity);
        Ok(active)
    }

    async fn remove_session(&self, id: SessionId) -> Result<bool, AppError> {
        Ok(self.sessions.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use ipgate_core::types::UserId;

    fn session(minutes_ago: i64) -> SessionRecord {
        SessionRecord {
            id: SessionId::new(),
            user_id: UserId::new(),
            ip_address: "10.0.0.1".into(),
            last_activity: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[tokio::test]
    async fn test_list_filters_by_activity() {
        let store = MemorySessionStore::new();
        let fresh = session(5);
        let stale = session(600);
        store.insert(fresh.clone()).await;
        store.insert(stale).await;

        let since = Utc::now() - Duration::minutes(60);
        let active = store.list_active_sessions(since).await.unwrap();
        assert_eq!(active, vec![fresh]);
        assert_eq!(store.count_active_sessions(since).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let store = MemorySessionStore::new();
        let s = session(1);
        store.insert(s.clone()).await;

        assert!(store.remove_session(s.id).await.unwrap());
        assert!(!store.remove_session(s.id).await.unwrap());
        assert!(store.is_empty().await);
    }
}
