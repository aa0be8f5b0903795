//! Repository layer for data access operations.
//!
//! `UserStore` is the only seam between the HTTP layer and storage; each
//! backend provides one implementation bound to a single collection.

mod memory_repo;
mod user_repo;

pub use memory_repo::InMemoryUserRepository;
pub use user_repo::PgUserRepository;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{NewUser, UpdateUser, User};

/// Data operations on the users of one collection.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users in insertion order.
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// `NotFound` when no user has `id`.
    async fn find_one_by_id(&self, id: Uuid) -> AppResult<User>;

    /// `NotFound` when no user has `email`.
    async fn find_one_by_email(&self, email: &str) -> AppResult<User>;

    /// Stores a new user under a fresh id. `Duplicate` when the email is taken.
    async fn insert(&self, new_user: NewUser) -> AppResult<User>;

    /// Applies the present fields of `changes`.
    ///
    /// `NotFound` when the id is unknown, `Duplicate` when the new email
    /// belongs to another user. An empty change set only checks existence.
    async fn update(&self, id: Uuid, changes: UpdateUser) -> AppResult<()>;

    /// `NotFound` when no user had `id`.
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Removes every user of the collection.
    async fn delete_all(&self) -> AppResult<()>;
}
