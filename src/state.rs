//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use crate::db::StoreConnection;
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// Cloning is cheap; services and the connection share one `Arc`ed cell.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Lazily established user store, also used by the bootstrap middleware
    pub connection: StoreConnection,
}

impl AppState {
    /// Creates the state around a (possibly not yet established) connection.
    ///
    /// # Example
    /// ```ignore
    /// let connection = StoreConnection::new(connector_for(&settings.database));
    /// let state = AppState::new(connection);
    /// ```
    pub fn new(connection: StoreConnection) -> Self {
        Self {
            services: Services::new(connection.clone()),
            connection,
        }
    }
}
