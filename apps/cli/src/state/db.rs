//! # Database State
//!
//! Wraps the [`ConnectionProvider`] for use in commands.
//!
//! The provider opens the database lazily, so commands that never touch
//! it (`db test --path ...`) never create a file.

use medstore_db::{ConnectionProvider, Database, DbConfig, DbResult, SaleProcessor};

/// Database access for commands.
#[derive(Debug, Clone)]
pub struct DbState {
    provider: ConnectionProvider,
}

impl DbState {
    /// Creates a new DbState over `config`. Nothing is opened yet.
    pub fn new(config: DbConfig) -> Self {
        DbState {
            provider: ConnectionProvider::new(config),
        }
    }

    /// Returns the open database, opening it on first use.
    pub async fn database(&self) -> DbResult<Database> {
        self.provider.database().await
    }

    /// Returns a sale processor sharing this state's provider.
    pub fn sale_processor(&self) -> SaleProcessor {
        SaleProcessor::new(self.provider.clone())
    }

    /// Returns the connection provider.
    pub fn provider(&self) -> &ConnectionProvider {
        &self.provider
    }
}
