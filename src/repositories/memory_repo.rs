//! In-memory user store used by the `memory` backend and by tests.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{NewUser, UpdateUser, User};
use crate::repositories::UserStore;

/// Users kept in insertion order behind one lock.
///
/// Uniqueness checks and the write they guard happen under the same write
/// lock, so concurrent inserts of one email cannot both succeed.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserRepository {
    async fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn find_one_by_id(&self, id: Uuid) -> AppResult<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or_else(|| AppError::user_not_found("id", id))
    }

    async fn find_one_by_email(&self, email: &str) -> AppResult<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|user| user.email == email)
            .cloned()
            .ok_or_else(|| AppError::user_not_found("email", email))
    }

    async fn insert(&self, new_user: NewUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|user| user.email == new_user.email) {
            return Err(AppError::duplicate_email(&new_user.email));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: Uuid, changes: UpdateUser) -> AppResult<()> {
        let mut users = self.users.write().await;

        let position = users
            .iter()
            .position(|user| user.id == id)
            .ok_or_else(|| AppError::user_not_found("id", id))?;

        if let Some(email) = changes.email.as_deref()
            && users.iter().any(|user| user.email == email && user.id != id)
        {
            return Err(AppError::duplicate_email(email));
        }

        changes.apply_to(&mut users[position]);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut users = self.users.write().await;
        let position = users
            .iter()
            .position(|user| user.id == id)
            .ok_or_else(|| AppError::user_not_found("id", id))?;
        users.remove(position);
        Ok(())
    }

    async fn delete_all(&self) -> AppResult<()> {
        self.users.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_find_all_empty() {
        let repo = InMemoryUserRepository::new();
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let repo = InMemoryUserRepository::new();
        let first = repo.insert(new_user("John", "john@doe.com")).await.unwrap();
        let second = repo.insert(new_user("Jane", "jane@doe.com")).await.unwrap();

        assert_eq!(repo.find_all().await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_and_original_kept() {
        let repo = InMemoryUserRepository::new();
        let original = repo.insert(new_user("John", "john@doe.com")).await.unwrap();

        let result = repo.insert(new_user("Johnny", "john@doe.com")).await;
        assert!(matches!(
            result,
            Err(AppError::Duplicate { field, value, .. }) if field == "email" && value == "john@doe.com"
        ));

        assert_eq!(repo.find_all().await.unwrap(), vec![original]);
    }

    #[tokio::test]
    async fn test_lookups() {
        let repo = InMemoryUserRepository::new();
        let user = repo.insert(new_user("John", "john@doe.com")).await.unwrap();

        assert_eq!(repo.find_one_by_id(user.id).await.unwrap(), user);
        assert_eq!(repo.find_one_by_email("john@doe.com").await.unwrap(), user);
        assert!(matches!(
            repo.find_one_by_id(Uuid::new_v4()).await,
            Err(AppError::NotFound { .. })
        ));
        assert!(matches!(
            repo.find_one_by_email("nobody@doe.com").await,
            Err(AppError::NotFound { field, .. }) if field == "email"
        ));
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_field() {
        let repo = InMemoryUserRepository::new();
        let user = repo.insert(new_user("John", "john@doe.com")).await.unwrap();

        repo.update(
            user.id,
            UpdateUser {
                name: Some("Johnny".to_string()),
                email: None,
            },
        )
        .await
        .unwrap();

        let updated = repo.find_one_by_id(user.id).await.unwrap();
        assert_eq!(updated.name, "Johnny");
        assert_eq!(updated.email, "john@doe.com");
    }

    #[tokio::test]
    async fn test_update_absent_id() {
        let repo = InMemoryUserRepository::new();
        let result = repo
            .update(
                Uuid::new_v4(),
                UpdateUser {
                    name: Some("Ghost".to_string()),
                    email: None,
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_absent_id_with_taken_email() {
        let repo = InMemoryUserRepository::new();
        repo.insert(new_user("John", "john@doe.com")).await.unwrap();

        let result = repo
            .update(
                Uuid::new_v4(),
                UpdateUser {
                    name: None,
                    email: Some("john@doe.com".to_string()),
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_empty_update() {
        let repo = InMemoryUserRepository::new();
        let user = repo.insert(new_user("John", "john@doe.com")).await.unwrap();

        repo.update(user.id, UpdateUser::default()).await.unwrap();
        assert_eq!(repo.find_one_by_id(user.id).await.unwrap(), user);

        assert!(matches!(
            repo.update(Uuid::new_v4(), UpdateUser::default()).await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_to_taken_email() {
        let repo = InMemoryUserRepository::new();
        let john = repo.insert(new_user("John", "john@doe.com")).await.unwrap();
        repo.insert(new_user("Jane", "jane@doe.com")).await.unwrap();

        let result = repo
            .update(
                john.id,
                UpdateUser {
                    name: None,
                    email: Some("jane@doe.com".to_string()),
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Duplicate { .. })));

        // Re-submitting one's own email is not a conflict
        repo.update(
            john.id,
            UpdateUser {
                name: None,
                email: Some("john@doe.com".to_string()),
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryUserRepository::new();
        let john = repo.insert(new_user("John", "john@doe.com")).await.unwrap();
        let jane = repo.insert(new_user("Jane", "jane@doe.com")).await.unwrap();

        repo.delete(john.id).await.unwrap();
        assert_eq!(repo.find_all().await.unwrap(), vec![jane]);

        assert!(matches!(
            repo.delete(john.id).await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_all() {
        let repo = InMemoryUserRepository::new();
        repo.insert(new_user("John", "john@doe.com")).await.unwrap();
        repo.insert(new_user("Jane", "jane@doe.com")).await.unwrap();

        repo.delete_all().await.unwrap();
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_inserts_of_one_email() {
        let repo = InMemoryUserRepository::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.insert(new_user(&format!("John {}", i), "john@doe.com"))
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }
}
