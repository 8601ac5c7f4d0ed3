//! Settings service: validate-on-write, change auditing, optional caching.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{info, warn};

use ipgate_core::config::GateConfig;
use ipgate_core::error::AppError;
use ipgate_core::traits::SettingsStore;
use ipgate_core::types::GateSettings;

use crate::allowlist::{ensure_valid, upgrade_legacy};

/// Front door for reading and changing gate settings.
///
/// With `settings_cache_seconds > 0` reads are served from a process-wide
/// cache. Every write made through this service invalidates it; writes
/// made directly to the store become visible when the entry expires.
#[derive(Clone)]
pub struct SettingsService {
    /// Backing store.
    store: Arc<dyn SettingsStore>,
    /// Single-entry cache, absent when caching is disabled.
    cache: Option<Cache<(), GateSettings>>,
}

impl std::fmt::Debug for SettingsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsService")
            .field("cached", &self.cache.is_some())
            .finish()
    }
}

impl SettingsService {
    /// Creates a settings service over `store`.
    pub fn new(store: Arc<dyn SettingsStore>, config: &GateConfig) -> Self {
        let cache = (config.settings_cache_seconds > 0).then(|| {
            Cache::builder()
                .max_capacity(1)
                .time_to_live(Duration::from_secs(config.settings_cache_seconds))
                .build()
        });
        Self { store, cache }
    }

    /// The current settings snapshot.
    pub async fn current(&self) -> Result<GateSettings, AppError> {
        let Some(cache) = &self.cache else {
            return self.store.load().await;
        };

        if let Some(settings) = cache.get(&()).await {
            return Ok(settings);
        }
        let settings = self.store.load().await?;
        cache.insert((), settings.clone()).await;
        Ok(settings)
    }

    async fn invalidate(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate(&()).await;
        }
    }

    /// Validate, normalize, and save a new allow-list.
    ///
    /// Rejects the whole update if any entry is malformed. Returns the
    /// normalized text that was stored.
    pub async fn update_valid_ips(&self, text: &str) -> Result<String, AppError> {
        let normalized = ensure_valid(text)?;
        self.store.save_valid_ips(&normalized).await?;
        self.invalidate().await;

        warn!(valid_ips = %normalized, "Allow-list changed");
        Ok(normalized)
    }

    /// Turn pre-login enforcement on or off.
    pub async fn set_check_before_login(&self, enabled: bool) -> Result<(), AppError> {
        self.store.save_check_before_login(enabled).await?;
        self.invalidate().await;

        warn!(enabled, "Check before login changed");
        Ok(())
    }

    /// Replace the denial message template.
    pub async fn set_error_text(&self, error_text: &str) -> Result<(), AppError> {
        self.store.save_error_text(error_text).await?;
        self.invalidate().await;

        info!("Error text changed");
        Ok(())
    }

    /// Rewrite a legacy comma-separated allow-list into the newline format.
    ///
    /// Entries are kept as written, even malformed ones. Returns the new
    /// value, or `None` if nothing needed changing.
    pub async fn upgrade_legacy_list(&self) -> Result<Option<String>, AppError> {
        let current = self.store.load().await?;
        let Some(upgraded) = upgrade_legacy(&current.valid_ips) else {
            return Ok(None);
        };

        self.store.save_valid_ips(&upgraded).await?;
        self.invalidate().await;

        warn!(valid_ips = %upgraded, "Allow-list upgraded from legacy format");
        Ok(Some(upgraded))
    }
}
