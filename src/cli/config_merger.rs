//! Configuration merger for CLI arguments and config files
//!
//! CLI arguments are the last and highest-priority configuration layer.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};

/// Applies CLI overrides on top of file and environment configuration
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the base configuration the way the CLI asks for it.
    ///
    /// `--config` switches to single-file mode; `--env` picks the
    /// environment layer.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let loader = match &cli.config {
            Some(path) => ConfigLoader::from_file(path.clone()),
            None => ConfigLoader::new()?,
        };
        let loader = match cli.env {
            Some(env) => loader.with_environment(env.into()),
            None => loader,
        };

        Ok(Self::new(loader.load()?))
    }

    /// Returns the base configuration with CLI overrides applied and
    /// validated.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(Commands::Serve {
            host,
            port,
            log_level,
            ..
        }) = &cli.command
        {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            // Command-specific level wins over --verbose/--quiet
            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn merged(args: &[&str]) -> Settings {
        let cli = Cli::try_parse_from(args).unwrap();
        ConfigurationMerger::new(Settings::default())
            .merge_cli_args(&cli)
            .unwrap()
    }

    #[test]
    fn test_no_overrides_keeps_base() {
        let settings = merged(&["users-api"]);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_verbose_and_quiet() {
        assert_eq!(merged(&["users-api", "--verbose"]).logger.level, "debug");
        assert_eq!(merged(&["users-api", "--quiet"]).logger.level, "error");
    }

    #[test]
    fn test_serve_overrides() {
        let settings = merged(&[
            "users-api",
            "--quiet",
            "serve",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--log-level",
            "trace",
        ]);

        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.logger.level, "trace");
    }

    #[test]
    fn test_migrate_does_not_touch_server() {
        let settings = merged(&["users-api", "migrate", "--dry-run"]);
        assert_eq!(settings.server, Settings::default().server);
    }

    #[test]
    fn test_from_cli_with_config_file() {
        let _lock = crate::config::loader::tests::ENV_MUTEX
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        let _env = crate::config::loader::tests::EnvGuard::clean();
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[server]\nport = 5050\n[database]\nbackend = \"memory\"\n",
        )
        .unwrap();

        let cli =
            Cli::try_parse_from(["users-api", "--config", path.to_str().unwrap(), "serve"]).unwrap();
        let merger = ConfigurationMerger::from_cli(&cli).unwrap();

        assert_eq!(merger.config().server.port, 5050);
        assert_eq!(
            merger.config().database.backend,
            crate::config::StoreBackend::Memory
        );
    }
}
