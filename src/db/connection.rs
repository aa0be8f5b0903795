//! Lazily established user store connection.
//!
//! The server starts without touching the database. The first request that
//! needs the store triggers one connection attempt; concurrent requests wait
//! on that same attempt instead of starting their own.

use std::sync::Arc;

use async_trait::async_trait;
use diesel_async::pooled_connection::bb8::Pool;
use tokio::sync::OnceCell;

use crate::config::{DatabaseConfig, StoreBackend};
use crate::db::pool::{establish_async_connection_pool, run_pending_migrations};
use crate::error::{AppError, AppResult};
use crate::repositories::{InMemoryUserRepository, PgUserRepository, UserStore};

/// Establishes a user store.
#[async_trait]
pub trait StoreConnector: Send + Sync {
    async fn connect(&self) -> AppResult<Arc<dyn UserStore>>;

    /// Short name used in logs.
    fn backend(&self) -> &'static str;
}

/// Builds the connector for the configured backend.
pub fn connector_for(config: &DatabaseConfig) -> Arc<dyn StoreConnector> {
    match config.backend {
        StoreBackend::Postgres => Arc::new(PgStoreConnector::new(config.clone())),
        StoreBackend::Memory => Arc::new(MemoryStoreConnector::new()),
    }
}

/// Connects to Postgres through a bb8 pool.
pub struct PgStoreConnector {
    config: DatabaseConfig,
}

impl PgStoreConnector {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl StoreConnector for PgStoreConnector {
    async fn connect(&self) -> AppResult<Arc<dyn UserStore>> {
        let database_url = self.config.connection_url()?;

        if self.config.auto_migrate {
            let applied = run_pending_migrations(database_url).await?;
            if !applied.is_empty() {
                tracing::info!(count = applied.len(), "Applied pending migrations");
            }
        }

        let pool = establish_async_connection_pool(&self.config).await?;
        check_reachable(&pool).await?;

        Ok(Arc::new(PgUserRepository::new(
            pool,
            self.config.collection.clone(),
        )))
    }

    fn backend(&self) -> &'static str {
        StoreBackend::Postgres.as_str()
    }
}

async fn check_reachable(pool: &Pool<diesel_async::AsyncPgConnection>) -> AppResult<()> {
    let _conn = pool.get().await?;
    Ok(())
}

/// Hands out one shared in-memory store.
#[derive(Default)]
pub struct MemoryStoreConnector {
    store: InMemoryUserRepository,
}

impl MemoryStoreConnector {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StoreConnector for MemoryStoreConnector {
    async fn connect(&self) -> AppResult<Arc<dyn UserStore>> {
        Ok(Arc::new(self.store.clone()))
    }

    fn backend(&self) -> &'static str {
        StoreBackend::Memory.as_str()
    }
}

/// Single-flight, initialize-once handle on the user store.
///
/// Clones share the same cell. A failed attempt leaves the cell empty so
/// the next caller retries.
#[derive(Clone)]
pub struct StoreConnection {
    inner: Arc<ConnectionInner>,
}

struct ConnectionInner {
    connector: Arc<dyn StoreConnector>,
    store: OnceCell<Arc<dyn UserStore>>,
}

impl StoreConnection {
    pub fn new(connector: Arc<dyn StoreConnector>) -> Self {
        Self {
            inner: Arc::new(ConnectionInner {
                connector,
                store: OnceCell::new(),
            }),
        }
    }

    /// A connection that is already established, for tests and tools.
    pub fn connected(store: Arc<dyn UserStore>) -> Self {
        Self {
            inner: Arc::new(ConnectionInner {
                connector: Arc::new(MemoryStoreConnector::new()),
                store: OnceCell::new_with(Some(store)),
            }),
        }
    }

    /// Returns the store, connecting first if needed.
    pub async fn store(&self) -> AppResult<Arc<dyn UserStore>> {
        let store = self
            .inner
            .store
            .get_or_try_init(|| async {
                let backend = self.inner.connector.backend();
                tracing::info!(backend, "Connecting to user store");
                match self.inner.connector.connect().await {
                    Ok(store) => {
                        tracing::info!(backend, "User store connected");
                        Ok(store)
                    }
                    Err(e) => {
                        tracing::error!(backend, error = %e, "User store connection failed");
                        Err(into_connection_error(e))
                    }
                }
            })
            .await?;
        Ok(Arc::clone(store))
    }

    pub fn is_connected(&self) -> bool {
        self.inner.store.initialized()
    }
}

/// Configuration and connection failures surface to clients as
/// "store unavailable"; other kinds pass through.
fn into_connection_error(error: AppError) -> AppError {
    match error {
        AppError::Configuration { source, .. } | AppError::Database { source, .. } => {
            AppError::Connection { source }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewUser;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Counts attempts and fails the first `failures` of them.
    struct CountingConnector {
        attempts: AtomicUsize,
        failures: usize,
        store: InMemoryUserRepository,
    }

    impl CountingConnector {
        fn new(failures: usize) -> Self {
            Self {
                attempts: AtomicUsize::new(0),
                failures,
                store: InMemoryUserRepository::new(),
            }
        }
    }

    #[async_trait]
    impl StoreConnector for CountingConnector {
        async fn connect(&self) -> AppResult<Arc<dyn UserStore>> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            if attempt < self.failures {
                return Err(AppError::connection(std::io::Error::other("refused")));
            }
            Ok(Arc::new(self.store.clone()))
        }

        fn backend(&self) -> &'static str {
            "counting"
        }
    }

    #[tokio::test]
    async fn test_concurrent_first_callers_share_one_attempt() {
        let connector = Arc::new(CountingConnector::new(0));
        let connection = StoreConnection::new(connector.clone());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let connection = connection.clone();
                tokio::spawn(async move { connection.store().await.map(|_| ()) })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(connector.attempts.load(Ordering::SeqCst), 1);
        assert!(connection.is_connected());
    }

    #[tokio::test]
    async fn test_failed_attempt_is_retried() {
        let connector = Arc::new(CountingConnector::new(1));
        let connection = StoreConnection::new(connector.clone());

        assert!(matches!(
            connection.store().await,
            Err(AppError::Connection { .. })
        ));
        assert!(!connection.is_connected());

        connection.store().await.unwrap();
        assert!(connection.is_connected());
        assert_eq!(connector.attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_clones_share_the_store() {
        let connection = StoreConnection::new(Arc::new(MemoryStoreConnector::new()));
        let other = connection.clone();

        connection
            .store()
            .await
            .unwrap()
            .insert(NewUser {
                name: "John".to_string(),
                email: "john@doe.com".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(other.store().await.unwrap().find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_url_is_a_connection_error() {
        let connection =
            StoreConnection::new(Arc::new(PgStoreConnector::new(DatabaseConfig::default())));

        assert!(matches!(
            connection.store().await,
            Err(AppError::Connection { .. })
        ));
        assert!(!connection.is_connected());
    }

    #[tokio::test]
    async fn test_preconnected() {
        let connection = StoreConnection::connected(Arc::new(InMemoryUserRepository::new()));
        assert!(connection.is_connected());
        assert!(connection.store().await.unwrap().find_all().await.unwrap().is_empty());
    }

    #[test]
    fn test_connector_for_backend() {
        let config = DatabaseConfig {
            backend: StoreBackend::Memory,
            ..Default::default()
        };
        assert_eq!(connector_for(&config).backend(), "memory");
        assert_eq!(connector_for(&DatabaseConfig::default()).backend(), "postgres");
    }
}
