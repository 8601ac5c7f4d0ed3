//! In-memory settings store for single-node setups and tests.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use ipgate_core::error::AppError;
use ipgate_core::traits::SettingsStore;
use ipgate_core::types::GateSettings;

/// Settings held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    settings: Arc<RwLock<GateSettings>>,
}

impl MemorySettingsStore {
    /// Creates a store seeded with `settings`.
    pub fn new(settings: GateSettings) -> Self {
        Self {
            settings: Arc::new(RwLock::new(settings)),
        }
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn load(&self) -> Result<GateSettings, AppError> {
        Ok(self.settings.read().await.clone())
    }

    async fn save_valid_ips(&self, valid_ips: &str) -> Result<(), AppError> {
        self.settings.write().await.valid_ips = valid_ips.to_string();
        Ok(())
    }

    async fn save_check_before_login(&self, enabled: bool) -> Result<(), AppError> {
        self.settings.write().await.check_before_login = enabled;
        Ok(())
    }

    async fn save_error_text(&self, error_text: &str) -> Result<(), AppError> {
        self.settings.write().await.error_text = error_text.to_string();
        Ok(())
    }
}
