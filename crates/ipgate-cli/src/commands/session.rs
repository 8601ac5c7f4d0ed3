//! `session` commands: counting and reaping.

use std::net::IpAddr;

use chrono::Utc;
use clap::{Args, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use ipgate_auth::gate::lockout_warning;
use ipgate_auth::{ReapProgress, ReapReport, SessionReaper};
use ipgate_core::error::AppError;
use ipgate_core::traits::UserDirectory;

use super::Context;
use crate::output::{self, OutputFormat};

/// Shown when a reap is requested while the gate is off.
pub const ENFORCEMENT_DISABLED_MESSAGE: &str =
    "\"Check IP before logging in\" setting is disabled. Enable it first.";

/// Arguments for session commands
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Session subcommand
    #[command(subcommand)]
    pub command: SessionCommand,
}

/// Session subcommands
#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Count sessions active within the timeout window
    Count,
    /// Terminate every session whose address is outside the allow-list
    Reap {
        /// Username of the operator; their own sessions are kept
        #[arg(long = "as", value_name = "USERNAME")]
        actor: String,
        /// Operator's current address, checked for a lockout warning
        #[arg(long)]
        ip: Option<IpAddr>,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
}

#[derive(Serialize)]
struct CountOutput {
    active_sessions: u64,
}

/// Drives an indicatif bar from reap progress.
struct BarProgress(ProgressBar);

impl ReapProgress for BarProgress {
    fn started(&self, total: usize) {
        self.0.set_length(total as u64);
    }

    fn advanced(&self, processed: usize, removed: u32) {
        self.0.set_position(processed as u64);
        self.0.set_message(format!("{removed} removed"));
    }
}

/// Execute session commands
pub async fn execute(args: &SessionArgs, ctx: &Context) -> Result<(), AppError> {
    let reaper = SessionReaper::new(ctx.db.session_store(), &ctx.config.session);

    match &args.command {
        SessionCommand::Count => {
            let active_sessions = reaper.count_active(Utc::now()).await?;
            match ctx.format {
                OutputFormat::Json => output::print_json(&CountOutput { active_sessions }),
                OutputFormat::Table => println!("{active_sessions} active sessions"),
            }
            Ok(())
        }
        SessionCommand::Reap { actor, ip, force } => {
            reap(ctx, &reaper, actor, *ip, *force).await
        }
    }
}

async fn reap(
    ctx: &Context,
    reaper: &SessionReaper,
    actor: &str,
    operator_ip: Option<IpAddr>,
    force: bool,
) -> Result<(), AppError> {
    let settings = ctx.settings.current().await?;
    if !settings.check_before_login {
        return Err(AppError::validation(ENFORCEMENT_DISABLED_MESSAGE));
    }

    let user = ctx
        .db
        .user_directory()
        .find_user(actor)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Unknown user '{actor}'")))?;

    if let Some(warning) = operator_ip.and_then(|addr| lockout_warning(&settings, addr)) {
        output::print_warning(&warning);
    }

    let now = Utc::now();
    let active = reaper.count_active(now).await?;
    let doomed = reaper.plan(&settings, user.id, now).await?;
    if doomed.is_empty() {
        output::print_success("No sessions outside the allow-list");
        return Ok(());
    }

    if !force {
        let confirm = dialoguer::Confirm::new()
            .with_prompt(format!(
                "Terminate {} of {} active sessions whose IP is not in the allow-list?",
                doomed.len(),
                active
            ))
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;

        if !confirm {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let bar = match ctx.format {
        OutputFormat::Json => ProgressBar::hidden(),
        OutputFormat::Table => {
            let style = ProgressStyle::default_bar()
                .template("{bar:40.cyan/blue} {pos}/{len} {msg}")
                .map_err(|e| AppError::internal(format!("Invalid progress template: {}", e)))?;
            ProgressBar::new(0).with_style(style)
        }
    };

    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    let progress = BarProgress(bar);
    let result = reaper
        .reap(&settings, user.id, Utc::now(), &progress, &cancel)
        .await;
    interrupt.abort();
    progress.0.finish_and_clear();

    print_report(&result?, ctx.format);
    Ok(())
}

fn print_report(report: &ReapReport, format: OutputFormat) {
    if format == OutputFormat::Json {
        output::print_json(report);
        return;
    }

    output::print_success(&format!("Terminated {} sessions", report.removed));
    output::print_kv("Scanned", &report.scanned.to_string());
    output::print_kv("Kept (own)", &report.kept_own.to_string());
    output::print_kv("Kept (permitted)", &report.kept_permitted.to_string());
    output::print_kv("Already gone", &report.already_gone.to_string());
    output::print_kv("Failed", &report.failed.to_string());

    if report.failed > 0 {
        output::print_warning(&format!(
            "{} sessions could not be removed and are still active",
            report.failed
        ));
    }
    if report.cancelled {
        output::print_warning("Interrupted: remaining sessions were not examined");
    }
}
