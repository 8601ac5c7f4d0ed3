//! User records as seen by the login gate.

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// A user account owned by the external user store.
///
/// IpGate only reads these; it never creates accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct UserRecord {
    /// Account identifier.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Stored password hash, handed to the password verifier untouched.
    #[serde(skip_serializing)]
    pub password_hash: String,
}
