use diesel::prelude::*;
use uuid::Uuid;

/// User model for reading from database
/// Derives Queryable for SELECT operations and Selectable for type-safe column selection
#[derive(Debug, Queryable, Selectable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::user_documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Fields supplied when creating a user; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Row written on insert, scoped to one collection
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::user_documents)]
pub struct NewUserDocument<'a> {
    pub id: Uuid,
    pub collection: &'a str,
    pub name: &'a str,
    pub email: &'a str,
}

/// UpdateUser model for partial updates
/// Derives AsChangeset for UPDATE operations with optional fields
#[derive(Debug, AsChangeset, Clone, Default, PartialEq, Eq)]
#[diesel(table_name = crate::schema::user_documents)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UpdateUser {
    /// True when no field would change; diesel rejects an empty changeset.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }

    /// Applies the present fields onto `user`.
    pub fn apply_to(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
    }
}
