//! Serve command handler
//!
//! Validates configuration for `--dry-run`, otherwise runs the HTTP server.

use crate::config::{Settings, StoreBackend};
use crate::error::AppResult;
use crate::server::Server;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub async fn execute(&self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            return self.validate_only();
        }

        Server::new(self.config.clone()).run().await?;
        Ok(())
    }

    /// Validate configuration without starting the server
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!(
            "✓ User store: {} backend, collection '{}'",
            self.config.database.backend, self.config.database.collection
        );

        if self.config.database.backend == StoreBackend::Postgres {
            // Only resolvability is checked; the server connects lazily.
            self.config.database.connection_url()?;
            println!("✓ Database URL is configured");
        }

        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
