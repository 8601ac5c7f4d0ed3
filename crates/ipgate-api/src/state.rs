//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use ipgate_auth::{LoginGate, SettingsService};
use ipgate_core::config::AppConfig;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Gate settings, read fresh (or from cache) per request
    pub settings: SettingsService,
    /// Pre-login and credential checks
    pub login_gate: LoginGate,
}

impl AppState {
    /// Bundle the shared dependencies.
    pub fn new(config: AppConfig, settings: SettingsService, login_gate: LoginGate) -> Self {
        Self {
            config: Arc::new(config),
            settings,
            login_gate,
        }
    }
}
