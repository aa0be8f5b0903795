//! User service for business logic operations.
//!
//! Resolves the store through the shared `StoreConnection` and forwards each
//! call to it. Mutations are logged here so every entrypoint (HTTP, CLI)
//! records them the same way.

use uuid::Uuid;

use crate::db::StoreConnection;
use crate::error::AppResult;
use crate::models::{NewUser, UpdateUser, User};

/// User service for handling user-related operations.
///
/// Cloning is cheap: clones share one `StoreConnection`.
#[derive(Clone)]
pub struct UserService {
    connection: StoreConnection,
}

impl UserService {
    pub fn new(connection: StoreConnection) -> Self {
        Self { connection }
    }

    /// Lists all users in insertion order.
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.connection.store().await?.find_all().await
    }

    /// Gets a user by id, or `NotFound`.
    pub async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.connection.store().await?.find_one_by_id(id).await
    }

    /// Gets a user by email, or `NotFound`.
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<User> {
        self.connection.store().await?.find_one_by_email(email).await
    }

    /// Creates a user; `Duplicate` if the email is taken.
    pub async fn create_user(&self, new_user: NewUser) -> AppResult<User> {
        let user = self.connection.store().await?.insert(new_user).await?;
        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Applies a partial update.
    pub async fn update_user(&self, id: Uuid, changes: UpdateUser) -> AppResult<()> {
        self.connection.store().await?.update(id, changes).await?;
        tracing::info!(user_id = %id, "User updated");
        Ok(())
    }

    pub async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.connection.store().await?.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }

    /// Removes every user of the configured collection.
    pub async fn delete_all_users(&self) -> AppResult<()> {
        self.connection.store().await?.delete_all().await?;
        tracing::warn!("All users deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::repositories::InMemoryUserRepository;
    use std::sync::Arc;

    fn service() -> UserService {
        UserService::new(StoreConnection::connected(Arc::new(
            InMemoryUserRepository::new(),
        )))
    }

    #[tokio::test]
    async fn test_create_then_lookup() {
        let service = service();
        let user = service
            .create_user(NewUser {
                name: "John".to_string(),
                email: "john@doe.com".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(service.get_user(user.id).await.unwrap(), user);
        assert_eq!(service.get_user_by_email("john@doe.com").await.unwrap(), user);
        assert_eq!(service.list_users().await.unwrap(), vec![user]);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let service = service();
        let user = service
            .create_user(NewUser {
                name: "John".to_string(),
                email: "john@doe.com".to_string(),
            })
            .await
            .unwrap();

        service
            .update_user(
                user.id,
                UpdateUser {
                    name: None,
                    email: Some("jd@doe.com".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(service.get_user(user.id).await.unwrap().email, "jd@doe.com");

        service.delete_user(user.id).await.unwrap();
        assert!(matches!(
            service.get_user(user.id).await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_all_users() {
        let service = service();
        for (name, email) in [("John", "john@doe.com"), ("Jane", "jane@doe.com")] {
            service
                .create_user(NewUser {
                    name: name.to_string(),
                    email: email.to_string(),
                })
                .await
                .unwrap();
        }

        service.delete_all_users().await.unwrap();
        assert!(service.list_users().await.unwrap().is_empty());
    }
}
