//! In-memory user directory for single-node setups and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use ipgate_core::error::AppError;
use ipgate_core::traits::UserDirectory;
use ipgate_core::types::UserRecord;

/// User directory keyed by username.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserDirectory {
    users: Arc<RwLock<HashMap<String, UserRecord>>>,
}

impl MemoryUserDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a user.
    pub async fn insert(&self, user: UserRecord) {
        self.users.write().await.insert(user.username.clone(), user);
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn find_user(&self, username: &str) -> Result<Option<UserRecord>, AppError> {
        Ok(self.users.read().await.get(username).cloned())
    }
}
