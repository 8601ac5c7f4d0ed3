//! `settings` commands.

use clap::{Args, Subcommand};

use ipgate_auth::gate::message::placeholders;
use ipgate_core::error::AppError;

use super::Context;
use crate::output::{self, OutputFormat};

/// Arguments for settings commands
#[derive(Debug, Args)]
pub struct SettingsArgs {
    /// Settings subcommand
    #[command(subcommand)]
    pub command: SettingsCommand,
}

/// Settings subcommands
#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Show all gate settings
    Show,
    /// Set the message shown to rejected addresses
    ErrorText {
        /// Template; may contain [[valid_ips]] and [[your_ip]]
        text: String,
    },
}

/// Execute settings commands
pub async fn execute(args: &SettingsArgs, ctx: &Context) -> Result<(), AppError> {
    match &args.command {
        SettingsCommand::Show => {
            let settings = ctx.settings.current().await?;
            match ctx.format {
                OutputFormat::Json => output::print_json(&settings),
                OutputFormat::Table => {
                    let entries = settings.valid_ips.lines().filter(|l| !l.trim().is_empty());
                    output::print_kv(
                        "Check before login",
                        output::yes_no(settings.check_before_login),
                    );
                    output::print_kv("Allow-list entries", &entries.count().to_string());
                    output::print_kv(
                        "Error text",
                        if settings.error_text.trim().is_empty() {
                            ctx.config.gate.default_error_text.as_str()
                        } else {
                            settings.error_text.as_str()
                        },
                    );
                    output::print_kv("Placeholders", &placeholders().join(" "));
                }
            }
        }
        SettingsCommand::ErrorText { text } => {
            ctx.settings.set_error_text(text).await?;
            output::print_success("Error text updated");
        }
    }

    Ok(())
}
