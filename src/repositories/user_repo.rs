//! Postgres user repository for async database operations.
//!
//! Users live in `user_documents`, one row per user, with the `collection`
//! column scoping every query.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{NewUser, NewUserDocument, UpdateUser, User};
use crate::repositories::UserStore;
use crate::schema::user_documents::dsl::*;

/// User repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: AsyncDbPool,
    collection_name: String,
}

impl PgUserRepository {
    /// Creates a repository over `collection_name` with the given pool.
    pub fn new(pool: AsyncDbPool, collection_name: impl Into<String>) -> Self {
        Self {
            pool,
            collection_name: collection_name.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection_name
    }

    /// Whether another user of the collection already holds `user_email`.
    async fn email_taken(&self, user_email: &str, except_id: Uuid) -> AppResult<bool> {
        let mut conn = self.pool.get().await?;

        let query = user_documents
            .filter(collection.eq(&self.collection_name))
            .filter(email.eq(user_email))
            .filter(id.ne(except_id));

        diesel::select(diesel::dsl::exists(query))
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "check email"))
    }
}

#[async_trait]
impl UserStore for PgUserRepository {
    async fn find_all(&self) -> AppResult<Vec<User>> {
        let mut conn = self.pool.get().await?;

        user_documents
            .filter(collection.eq(&self.collection_name))
            .order(seq.asc())
            .select(User::as_select())
            .load(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "list users"))
    }

    async fn find_one_by_id(&self, user_id: Uuid) -> AppResult<User> {
        let mut conn = self.pool.get().await?;

        user_documents
            .filter(collection.eq(&self.collection_name))
            .filter(id.eq(user_id))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "find user by id"))?
            .ok_or_else(|| AppError::user_not_found("id", user_id))
    }

    async fn find_one_by_email(&self, user_email: &str) -> AppResult<User> {
        let mut conn = self.pool.get().await?;

        user_documents
            .filter(collection.eq(&self.collection_name))
            .filter(email.eq(user_email))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "find user by email"))?
            .ok_or_else(|| AppError::user_not_found("email", user_email))
    }

    async fn insert(&self, new_user: NewUser) -> AppResult<User> {
        // The unique index still catches a concurrent insert of the same email.
        if self.email_taken(&new_user.email, Uuid::nil()).await? {
            return Err(AppError::duplicate_email(&new_user.email));
        }

        let mut conn = self.pool.get().await?;
        let document = NewUserDocument {
            id: Uuid::new_v4(),
            collection: &self.collection_name,
            name: &new_user.name,
            email: &new_user.email,
        };

        diesel::insert_into(user_documents)
            .values(&document)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert user"))
    }

    async fn update(&self, user_id: Uuid, changes: UpdateUser) -> AppResult<()> {
        // An unknown id is NotFound even when the new email is taken
        self.find_one_by_id(user_id).await?;
        if changes.is_empty() {
            return Ok(());
        }

        if let Some(new_email) = changes.email.as_deref()
            && self.email_taken(new_email, user_id).await?
        {
            return Err(AppError::duplicate_email(new_email));
        }

        let mut conn = self.pool.get().await?;
        let updated = diesel::update(
            user_documents
                .filter(collection.eq(&self.collection_name))
                .filter(id.eq(user_id)),
        )
        .set(&changes)
        .execute(&mut conn)
        .await
        .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "update user"))?;

        if updated == 0 {
            return Err(AppError::user_not_found("id", user_id));
        }
        Ok(())
    }

    async fn delete(&self, user_id: Uuid) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(
            user_documents
                .filter(collection.eq(&self.collection_name))
                .filter(id.eq(user_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "delete user"))?;

        if deleted == 0 {
            return Err(AppError::user_not_found("id", user_id));
        }
        Ok(())
    }

    async fn delete_all(&self) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(user_documents.filter(collection.eq(&self.collection_name)))
            .execute(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "delete all users"))?;

        tracing::debug!(collection = %self.collection_name, deleted, "Cleared collection");
        Ok(())
    }
}
