//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing and configuration loading.

use super::handlers::{MigrateCommandHandler, ResetCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::Settings;
use crate::error::AppResult;

/// Execute a CLI command with the given settings
///
/// Running without a subcommand is the same as `serve`.
///
/// # Errors
/// Returns errors from command handlers
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    let command = cli.resolved_command();
    warn_on_risky_args(&command);

    match command {
        Commands::Serve { dry_run, .. } => ServeCommandHandler::new(settings).execute(dry_run).await,
        Commands::Migrate { dry_run, rollback } => {
            MigrateCommandHandler::new(settings)
                .execute(dry_run, rollback)
                .await
        }
        Commands::Reset { yes } => ResetCommandHandler::new(settings).execute(yes).await,
    }
}

fn warn_on_risky_args(command: &Commands) {
    match command {
        Commands::Serve {
            port: Some(port), ..
        } if *port < 1024 => {
            eprintln!(
                "Warning: Binding to port {} usually requires root privileges",
                port
            );
        }
        Commands::Migrate {
            rollback: Some(steps),
            ..
        } if *steps > 50 => {
            eprintln!(
                "Warning: Rolling back {} migrations is a large operation. Consider using smaller steps.",
                steps
            );
        }
        _ => {}
    }
}
