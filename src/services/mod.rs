//! Service layer for business logic operations.
//!
//! Services sit between handlers and the user store.

mod user_service;

pub use user_service::UserService;

use crate::db::StoreConnection;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since the store connection is shared through an `Arc`.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
}

impl Services {
    pub fn new(connection: StoreConnection) -> Self {
        Self {
            users: UserService::new(connection),
        }
    }
}
