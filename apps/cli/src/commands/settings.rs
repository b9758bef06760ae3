//! # Settings Commands
//!
//! Database connection tester and status report.
//!
//! `db test` never changes the configured settings and never creates a
//! database file: it opens one connection with `create_if_missing` off,
//! runs `SELECT 1`, and closes it.

use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

use super::Reply;
use crate::error::AppError;
use crate::state::{ConfigState, DbState};
use medstore_db::{migrations, test_connection, DbConfig};

/// Tests a database path (or the configured one).
///
/// Prints `OK: connected` on success; failures surface as
/// `ERROR: <message>`.
pub async fn test_db(db: &DbState, path: Option<PathBuf>) -> Result<Reply, AppError> {
    let config = match path {
        Some(path) => DbConfig::new(path),
        None => db.provider().config().await,
    }
    .create_if_missing(false);

    test_connection(&config).await?;

    info!(path = %config.database_path.display(), "Connection test passed");

    Reply::new(
        "OK: connected",
        &json!({ "connected": true, "path": config.database_path }),
    )
}

/// Summary printed by `db status`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DbStatus {
    pub path: PathBuf,
    pub migrations_total: usize,
    pub migrations_applied: usize,
    pub medicines: i64,
    pub bills: i64,
    pub users: i64,
    pub revenue: String,
}

/// Reports schema version and row counts.
pub async fn db_status(db: &DbState, config: &ConfigState) -> Result<Reply, AppError> {
    let database = db.database().await?;
    let (migrations_total, migrations_applied) = migrations::migration_status(database.pool()).await?;

    let status = DbStatus {
        path: db.provider().config().await.database_path,
        migrations_total,
        migrations_applied,
        medicines: database.medicines().count().await?,
        bills: database.bills().count().await?,
        users: database.users().count().await?,
        revenue: config.format_currency(database.bills().total_revenue().await?),
    };

    let text = format!(
        "Database:   {}\nMigrations: {}/{}\nMedicines:  {}\nBills:      {}\nUsers:      {}\nRevenue:    {}",
        status.path.display(),
        status.migrations_applied,
        status.migrations_total,
        status.medicines,
        status.bills,
        status.users,
        status.revenue,
    );

    Reply::new(text, &status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_db_test_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");
        let db = DbState::new(DbConfig::new(&path));
        db.database().await.unwrap();

        let reply = test_db(&db, None).await.unwrap();
        assert_eq!(reply.text, "OK: connected");
    }

    #[tokio::test]
    async fn test_db_test_missing_file_is_not_created() {
        let dir = tempfile::tempdir().unwrap();
        let saved = DbConfig::new(dir.path().join("store.db"));
        let db = DbState::new(saved.clone());

        let candidate = dir.path().join("other.db");
        let err = test_db(&db, Some(candidate.clone())).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::DatabaseUnavailable);
        assert!(!candidate.exists());
        assert_eq!(db.provider().config().await, saved);
    }

    #[tokio::test]
    async fn test_db_status() {
        let db = DbState::new(DbConfig::in_memory());

        let reply = db_status(&db, &ConfigState::default()).await.unwrap();
        assert_eq!(reply.json["medicines"], 0);
        assert_eq!(reply.json["revenue"], "$0.00");
        assert_eq!(reply.json["migrationsTotal"], reply.json["migrationsApplied"]);
    }
}
