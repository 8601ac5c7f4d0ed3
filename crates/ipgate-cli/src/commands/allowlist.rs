//! `allowlist` commands.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use ipgate_auth::allowlist::{AllowList, InvalidEntry, as_ipv4, validate};
use ipgate_core::error::AppError;

use super::Context;
use crate::output::{self, OutputFormat};

/// Arguments for allowlist commands
#[derive(Debug, Args)]
pub struct AllowlistArgs {
    /// Allowlist subcommand
    #[command(subcommand)]
    pub command: AllowlistCommand,
}

/// Allowlist subcommands
#[derive(Debug, Subcommand)]
pub enum AllowlistCommand {
    /// Print the stored entries
    Show,
    /// Replace the allow-list (rejected if any entry is malformed)
    Set {
        /// Entries: exact address, prefix, CIDR block, or last-octet range
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        entries: Vec<String>,
        /// Read entries from a file, one per line
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Test whether an address is permitted
    Check {
        /// Address to test
        ip: IpAddr,
    },
    /// Report stored entries that can never match
    Validate,
    /// Convert a legacy comma-separated list to one entry per line
    Upgrade,
}

#[derive(Serialize)]
struct ShowOutput<'a> {
    entries: Vec<&'a str>,
    check_before_login: bool,
}

#[derive(Serialize)]
struct CheckOutput {
    ip: IpAddr,
    permitted: bool,
    matched_entry: Option<String>,
}

#[derive(Serialize, Tabled)]
struct InvalidRow {
    /// Position
    position: usize,
    /// Entry
    entry: String,
    /// Problem
    reason: String,
}

impl From<InvalidEntry> for InvalidRow {
    fn from(e: InvalidEntry) -> Self {
        Self {
            position: e.position,
            entry: e.text,
            reason: e.reason,
        }
    }
}

/// Execute allowlist commands
pub async fn execute(args: &AllowlistArgs, ctx: &Context) -> Result<(), AppError> {
    match &args.command {
        AllowlistCommand::Show => {
            let settings = ctx.settings.current().await?;
            let entries: Vec<&str> = settings
                .valid_ips
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .collect();

            match ctx.format {
                OutputFormat::Json => output::print_json(&ShowOutput {
                    entries,
                    check_before_login: settings.check_before_login,
                }),
                OutputFormat::Table => {
                    if entries.is_empty() {
                        println!("The allow-list is empty.");
                    }
                    for entry in entries {
                        println!("{entry}");
                    }
                }
            }
        }
        AllowlistCommand::Set { entries, file } => {
            let text = match file {
                Some(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
                    AppError::validation(format!("Cannot read '{}': {}", path.display(), e))
                })?,
                None => entries.join("\n"),
            };

            let saved = ctx.settings.update_valid_ips(&text).await?;
            let count = saved.lines().count();
            match ctx.format {
                OutputFormat::Json => output::print_json(&saved.lines().collect::<Vec<_>>()),
                OutputFormat::Table => {
                    output::print_success(&format!("Saved {count} allow-list entries"))
                }
            }
        }
        AllowlistCommand::Check { ip } => {
            let settings = ctx.settings.current().await?;
            let list = AllowList::parse(&settings.valid_ips);
            let matched_entry = as_ipv4(*ip)
                .and_then(|v4| list.find_match(v4))
                .map(ToString::to_string);

            let result = CheckOutput {
                ip: *ip,
                permitted: matched_entry.is_some(),
                matched_entry,
            };
            match ctx.format {
                OutputFormat::Json => output::print_json(&result),
                OutputFormat::Table => match &result.matched_entry {
                    Some(entry) => println!("{ip} is permitted (matches '{entry}')"),
                    None => println!("{ip} is NOT permitted"),
                },
            }
        }
        AllowlistCommand::Validate => {
            let settings = ctx.settings.current().await?;
            let rows: Vec<InvalidRow> = validate(&settings.valid_ips)
                .into_iter()
                .map(InvalidRow::from)
                .collect();

            if rows.is_empty() {
                output::print_success("All allow-list entries are valid");
                return Ok(());
            }
            output::print_list(&rows, ctx.format);
            return Err(AppError::validation(format!(
                "{} invalid allow-list entries",
                rows.len()
            )));
        }
        AllowlistCommand::Upgrade => match ctx.settings.upgrade_legacy_list().await? {
            Some(upgraded) => output::print_success(&format!(
                "Upgraded allow-list to {} entries, one per line",
                upgraded.lines().count()
            )),
            None => println!("Allow-list is already in the current format."),
        },
    }

    Ok(())
}
