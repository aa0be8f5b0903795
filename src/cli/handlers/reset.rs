//! Reset command handler
//!
//! Deletes every user of the configured collection.

use std::sync::Arc;

use crate::config::Settings;
use crate::db::{StoreConnection, StoreConnector, connector_for};
use crate::error::{AppError, AppResult};
use crate::services::UserService;

/// Handler for the reset command
pub struct ResetCommandHandler {
    config: Settings,
    connector: Arc<dyn StoreConnector>,
}

impl ResetCommandHandler {
    pub fn new(config: Settings) -> Self {
        let connector = connector_for(&config.database);
        Self::with_connector(config, connector)
    }

    pub fn with_connector(config: Settings, connector: Arc<dyn StoreConnector>) -> Self {
        Self { config, connector }
    }

    pub async fn execute(&self, confirmed: bool) -> AppResult<()> {
        if !confirmed {
            return Err(AppError::Validation {
                field: "yes".to_string(),
                reason: "Refusing to delete all users without --yes".to_string(),
            });
        }

        let users = UserService::new(StoreConnection::new(Arc::clone(&self.connector)));
        users.delete_all_users().await?;

        println!(
            "✓ Deleted all users from collection '{}'",
            self.config.database.collection
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreBackend;
    use crate::db::MemoryStoreConnector;
    use crate::models::NewUser;

    fn memory_settings() -> Settings {
        let mut settings = Settings::default();
        settings.database.backend = StoreBackend::Memory;
        settings
    }

    #[tokio::test]
    async fn test_reset_requires_confirmation() {
        let result = ResetCommandHandler::new(memory_settings()).execute(false).await;
        assert!(matches!(
            result,
            Err(AppError::Validation { field, .. }) if field == "yes"
        ));
    }

    #[tokio::test]
    async fn test_reset_clears_store() {
        let connector = Arc::new(MemoryStoreConnector::new());
        let store = connector.connect().await.unwrap();
        store
            .insert(NewUser {
                name: "John".to_string(),
                email: "john@doe.com".to_string(),
            })
            .await
            .unwrap();

        ResetCommandHandler::with_connector(memory_settings(), connector)
            .execute(true)
            .await
            .unwrap();

        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reset_without_database_url_is_unavailable() {
        let result = ResetCommandHandler::new(Settings::default()).execute(true).await;
        assert!(matches!(result, Err(AppError::Connection { .. })));
    }
}
