//! Migrate command handler
//!
//! Applies, lists or reverts the embedded Postgres migrations.

use crate::config::{Settings, StoreBackend};
use crate::db::{pending_migrations, revert_migrations, run_pending_migrations};
use crate::error::{AppError, AppResult};

/// Handler for the migrate command
pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the migrate command
    ///
    /// # Errors
    /// - `Validation` when the backend is not Postgres or `rollback` is 0
    /// - `Configuration` when no database URL can be resolved
    /// - `Connection` / `Database` from the migration run itself
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        if self.config.database.backend != StoreBackend::Postgres {
            return Err(AppError::Validation {
                field: "database.backend".to_string(),
                reason: format!(
                    "Migrations only apply to the postgres backend, configured backend is '{}'",
                    self.config.database.backend
                ),
            });
        }

        if rollback == Some(0) {
            return Err(AppError::Validation {
                field: "rollback_steps".to_string(),
                reason: "Number of rollback steps must be greater than 0".to_string(),
            });
        }

        let database_url = self.config.database.connection_url()?;

        if dry_run {
            println!("Checking for pending migrations...");
            let pending = pending_migrations(database_url).await?;
            if pending.is_empty() {
                println!("✓ No pending migrations found - database is up to date");
            } else {
                println!("Found {} pending migration(s):", pending.len());
                for name in &pending {
                    println!("  - {}", name);
                }
                println!("\nRun without --dry-run to apply these migrations");
            }
            return Ok(());
        }

        if let Some(steps) = rollback {
            println!("Rolling back {} migration(s)...", steps);
            let reverted = revert_migrations(database_url, steps).await?;
            for version in &reverted {
                println!("  - reverted {}", version);
            }
            println!("✓ Rolled back {} migration(s)", reverted.len());
            return Ok(());
        }

        println!("Running database migrations...");
        let applied = run_pending_migrations(database_url).await?;
        if applied.is_empty() {
            println!("✓ No migrations to apply - database is already up to date");
        } else {
            println!("✓ Applied {} migration(s):", applied.len());
            for version in &applied {
                println!("  - {}", version);
            }
        }

        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
