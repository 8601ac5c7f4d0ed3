//! Persistent gate settings collaborator.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::GateSettings;

/// Persistent store for the runtime gate settings.
///
/// Writes are raw; validation happens in the settings service before a
/// value reaches the store.
#[async_trait]
pub trait SettingsStore: Send + Sync + 'static {
    /// Load the current settings. A store with nothing saved yields defaults.
    async fn load(&self) -> AppResult<GateSettings>;

    /// Replace the stored allow-list text.
    async fn save_valid_ips(&self, valid_ips: &str) -> AppResult<()>;

    /// Set the pre-login enforcement flag.
    async fn save_check_before_login(&self, enabled: bool) -> AppResult<()>;

    /// Replace the error message template.
    async fn save_error_text(&self, error_text: &str) -> AppResult<()>;
}
