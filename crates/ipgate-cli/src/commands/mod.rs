//! CLI command definitions and dispatch.

pub mod allowlist;
pub mod check_before_login;
pub mod session;
pub mod settings;

use clap::{Parser, Subcommand};

use ipgate_auth::SettingsService;
use ipgate_core::config::AppConfig;
use ipgate_core::error::AppError;
use ipgate_database::DatabasePool;

use crate::output::OutputFormat;

/// IpGate: restrict logins and live sessions to an IPv4 allow-list
#[derive(Debug, Parser)]
#[command(name = "ipgate-cli", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Turn the pre-login address check on or off
    CheckBeforeLogin(check_before_login::CheckBeforeLoginArgs),
    /// Inspect and edit the allow-list
    Allowlist(allowlist::AllowlistArgs),
    /// Inspect gate settings and edit the error text
    Settings(settings::SettingsArgs),
    /// Count sessions or reap those outside the allow-list
    Session(session::SessionArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let ctx = Context::connect(&self.config, self.format).await?;
        let result = match &self.command {
            Commands::CheckBeforeLogin(args) => check_before_login::execute(args, &ctx).await,
            Commands::Allowlist(args) => allowlist::execute(args, &ctx).await,
            Commands::Settings(args) => settings::execute(args, &ctx).await,
            Commands::Session(args) => session::execute(args, &ctx).await,
        };
        ctx.db.close().await;
        result
    }
}

/// Everything a command needs: config, database, and the settings front door.
pub struct Context {
    /// Loaded configuration
    pub config: AppConfig,
    /// Database connection pool
    pub db: DatabasePool,
    /// Validated access to the gate settings
    pub settings: SettingsService,
    /// Selected output format
    pub format: OutputFormat,
}

impl Context {
    /// Load configuration and connect to the database.
    pub async fn connect(config_path: &str, format: OutputFormat) -> Result<Self, AppError> {
        let config = AppConfig::load(config_path)
            .map_err(|e| AppError::configuration(format!("Failed to load config: {}", e.message)))?;
        let db = DatabasePool::connect(&config.database).await?;
        let settings = SettingsService::new(db.settings_store(), &config.gate);
        tracing::debug!(config = config_path, "Connected to database");

        Ok(Self {
            config,
            db,
            settings,
            format,
        })
    }
}
