//! User lookup and password verification collaborators.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::UserRecord;

/// Read-only access to the external user store.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Look up a user by login name.
    async fn find_user(&self, username: &str) -> AppResult<Option<UserRecord>>;
}

/// Checks a plaintext password against a stored user record.
///
/// The login gate only calls this after the source address has been
/// permitted.
pub trait PasswordVerifier: Send + Sync + 'static {
    /// Returns `Ok(true)` when the password is correct for `user`.
    fn verify(&self, user: &UserRecord, password: &str) -> AppResult<bool>;
}
