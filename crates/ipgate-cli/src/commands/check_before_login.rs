//! `check-before-login` command.

use clap::Args;
use serde::Serialize;

use ipgate_core::error::AppError;

use super::Context;
use crate::output::{self, OutputFormat};

/// Arguments for `check-before-login`
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct CheckBeforeLoginArgs {
    /// Reject disallowed addresses before the login form
    #[arg(long)]
    pub enable: bool,
    /// Only check addresses at credential time
    #[arg(long)]
    pub disable: bool,
}

#[derive(Serialize)]
struct Status {
    check_before_login: bool,
}

/// Execute `check-before-login`
pub async fn execute(args: &CheckBeforeLoginArgs, ctx: &Context) -> Result<(), AppError> {
    let enabled = args.enable && !args.disable;
    ctx.settings.set_check_before_login(enabled).await?;

    match ctx.format {
        OutputFormat::Json => output::print_json(&Status {
            check_before_login: enabled,
        }),
        OutputFormat::Table => output::print_success(&format!(
            "Check IP before logging in: {}",
            if enabled { "enabled" } else { "disabled" }
        )),
    }

    if enabled && ctx.settings.current().await?.valid_ips.trim().is_empty() {
        output::print_warning("The allow-list is empty: every login will be rejected.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::commands::{Cli, Commands};

    #[test]
    fn test_exactly_one_flag_required() {
        let cli = Cli::try_parse_from(["ipgate-cli", "check-before-login", "--enable"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::CheckBeforeLogin(ref args) if args.enable && !args.disable
        ));

        assert!(Cli::try_parse_from(["ipgate-cli", "check-before-login"]).is_err());
        assert!(
            Cli::try_parse_from(["ipgate-cli", "check-before-login", "--enable", "--disable"])
                .is_err()
        );
    }
}
