//! Database connection module.
//!
//! Provides async PostgreSQL connection pooling using diesel_async with bb8,
//! embedded migrations, and the lazy store connection shared by handlers.

mod connection;
mod pool;

pub use connection::{
    MemoryStoreConnector, PgStoreConnector, StoreConnection, StoreConnector, connector_for,
};
pub use pool::{
    AsyncDbPool, MIGRATIONS, establish_async_connection_pool, pending_migrations,
    revert_migrations, run_pending_migrations,
};
