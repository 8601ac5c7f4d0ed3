//! Runtime gate settings.

use serde::{Deserialize, Serialize};

/// Operator-controlled gate settings, read fresh for every evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct GateSettings {
    /// Allow-list entries, one per line (legacy values may be comma-separated).
    #[serde(default)]
    pub valid_ips: String,
    /// Reject disallowed addresses before the login form is even shown.
    #[serde(default)]
    pub check_before_login: bool,
    /// Message template for a denied pre-login attempt.
    ///
    /// Supports the `[[valid_ips]]` and `[[your_ip]]` placeholders.
    #[serde(default)]
    pub error_text: String,
}
