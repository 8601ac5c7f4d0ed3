//! Login gate configuration.

use serde::{Deserialize, Serialize};

/// Process-level gate configuration.
///
/// The allow-list itself is runtime state held by the settings store;
/// these values only shape how requests are observed and how settings
/// are read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Use the left-most `X-Forwarded-For` entry as the source address.
    ///
    /// Only enable behind a reverse proxy that overwrites the header.
    #[serde(default)]
    pub trust_forwarded_for: bool,
    /// Seconds to cache gate settings in-process. `0` reads them on every request.
    #[serde(default)]
    pub settings_cache_seconds: u64,
    /// Message shown on a denied pre-login attempt when the operator template is empty.
    #[serde(default = "default_error_text")]
    pub default_error_text: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            trust_forwarded_for: false,
            settings_cache_seconds: 0,
            default_error_text: default_error_text(),
        }
    }
}

fn default_error_text() -> String {
    "Access from your IP address ([[your_ip]]) is not permitted.".to_string()
}
