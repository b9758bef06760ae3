//! # Connection Provider
//!
//! Supplies database connections on demand from an explicit [`DbConfig`].
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ConnectionProvider::new(config)     ← nothing opened yet              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  acquire()  ── first call ──► Database::new(config) (pool + migrate)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PoolConnection<Sqlite>              ← returned to the pool on drop    │
//! │                                                                         │
//! │  reconfigure(new_config)             ← write lock, old pool closed,    │
//! │                                         next acquire() reopens         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Readers share the state through a `tokio::sync::RwLock`; only
//! `reconfigure` and the first open take the write lock.

use sqlx::pool::PoolConnection;
use sqlx::Sqlite;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::DbResult;
use crate::pool::{Database, DbConfig};

#[derive(Debug)]
struct ProviderState {
    config: DbConfig,
    database: Option<Database>,
}

/// Shared, reconfigurable source of database connections.
///
/// Cloning is cheap; clones share the same pool and configuration.
#[derive(Debug, Clone)]
pub struct ConnectionProvider {
    inner: Arc<RwLock<ProviderState>>,
}

impl ConnectionProvider {
    /// Creates a provider that opens the database on first use.
    pub fn new(config: DbConfig) -> Self {
        ConnectionProvider {
            inner: Arc::new(RwLock::new(ProviderState {
                config,
                database: None,
            })),
        }
    }

    /// Creates a provider and opens the database immediately.
    pub async fn connect(config: DbConfig) -> DbResult<Self> {
        let provider = Self::new(config);
        provider.database().await?;
        Ok(provider)
    }

    /// Wraps an already-open database.
    pub fn from_database(config: DbConfig, database: Database) -> Self {
        ConnectionProvider {
            inner: Arc::new(RwLock::new(ProviderState {
                config,
                database: Some(database),
            })),
        }
    }

    /// Returns a copy of the current configuration.
    pub async fn config(&self) -> DbConfig {
        self.inner.read().await.config.clone()
    }

    /// Returns the open database, opening it if needed.
    pub async fn database(&self) -> DbResult<Database> {
        if let Some(db) = self.inner.read().await.database.as_ref() {
            return Ok(db.clone());
        }

        let mut state = self.inner.write().await;
        // Another task may have opened it while we waited for the lock
        if let Some(db) = state.database.as_ref() {
            return Ok(db.clone());
        }

        debug!(path = %state.config.database_path.display(), "Opening database");
        let db = Database::new(state.config.clone()).await?;
        state.database = Some(db.clone());
        Ok(db)
    }

    /// Checks a connection out of the pool.
    ///
    /// The connection goes back to the pool when the returned guard drops.
    pub async fn acquire(&self) -> DbResult<PoolConnection<Sqlite>> {
        let db = self.database().await?;
        let conn = db.pool().acquire().await?;
        Ok(conn)
    }

    /// Replaces the configuration.
    ///
    /// Any open pool is closed; the next call reopens with `config`.
    pub async fn reconfigure(&self, config: DbConfig) {
        let mut state = self.inner.write().await;

        if let Some(db) = state.database.take() {
            db.close().await;
        }

        info!(path = %config.database_path.display(), "Database settings changed");
        state.config = config;
    }

    /// Tests the current configuration without opening the pool.
    pub async fn test(&self) -> DbResult<()> {
        let config = self.config().await;
        test_connection(&config).await
    }
}

/// Tests explicit settings without touching any saved configuration.
pub async fn test_connection(config: &DbConfig) -> DbResult<()> {
    Database::test_connection(config).await
}
