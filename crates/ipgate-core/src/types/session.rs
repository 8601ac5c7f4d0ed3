//! Session records as exposed by the external session store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{SessionId, UserId};

/// One live authenticated session.
///
/// The session store owns these records. IpGate reads them and may ask
/// the store to remove one; it never mutates their fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SessionRecord {
    /// Session identifier.
    pub id: SessionId,
    /// Owning user.
    pub user_id: UserId,
    /// Last address the session was seen from, as recorded by the store.
    pub ip_address: String,
    /// Timestamp of the last request made with this session.
    pub last_activity: DateTime<Utc>,
}
