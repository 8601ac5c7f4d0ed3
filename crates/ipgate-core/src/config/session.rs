//! Session window configuration.

use serde::{Deserialize, Serialize};

/// Session configuration.
///
/// The session store owns expiry. IpGate only needs to know how far back
/// to look when enumerating sessions that may still be live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Idle timeout in minutes after which the store treats a session as expired.
    #[serde(default = "default_timeout")]
    pub timeout_minutes: u64,
}

impl SessionConfig {
    /// The timeout as a `chrono` duration.
    pub fn timeout(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.timeout_minutes as i64)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout_minutes: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    480
}
