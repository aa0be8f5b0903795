//! CLI module for users-api
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing with clap
//! - Configuration merging (CLI args over config files and environment)
//! - Command handlers for serve, migrate and reset

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, Environment, LogLevel};

use crate::config::{ConfigError, Settings};

/// Load and merge configuration from CLI arguments
///
/// 1. Load base configuration from files and environment
/// 2. Merge CLI argument overrides
/// 3. Validate the final configuration
///
/// # Errors
/// Returns error if configuration loading, merging, or validation fails
pub fn load_and_merge_config(cli: &Cli) -> Result<Settings, ConfigError> {
    ConfigurationMerger::from_cli(cli)?.merge_cli_args(cli)
}
