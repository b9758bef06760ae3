//! # Bill Repository
//!
//! Read-only access to the bill ledger.
//!
//! Bills are written only by [`crate::billing::SaleProcessor`], inside the
//! same transaction as the stock decrement. This repository has no write
//! methods.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use medstore_core::{Bill, Money};

/// Repository for the append-only bills table.
#[derive(Debug, Clone)]
pub struct BillRepository {
    pool: SqlitePool,
}

impl BillRepository {
    /// Creates a new BillRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BillRepository { pool }
    }

    /// Most recent bills first.
    pub async fn recent(&self, limit: u32) -> DbResult<Vec<Bill>> {
        debug!(limit = limit, "Fetching recent bills");

        let bills = sqlx::query_as::<_, Bill>(
            r#"
            SELECT id, medicine_name, quantity, total_cents, created_at
            FROM bills
            ORDER BY id DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(bills)
    }

    /// All bills for one medicine name, oldest first.
    pub async fn for_medicine(&self, name: &str) -> DbResult<Vec<Bill>> {
        let bills = sqlx::query_as::<_, Bill>(
            r#"
            SELECT id, medicine_name, quantity, total_cents, created_at
            FROM bills
            WHERE medicine_name = ?1
            ORDER BY id
            "#,
        )
        .bind(name.trim())
        .fetch_all(&self.pool)
        .await?;

        Ok(bills)
    }

    /// Number of bills in the ledger.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bills")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Sum of every bill total.
    pub async fn total_revenue(&self) -> DbResult<Money> {
        let cents: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(total_cents), 0) FROM bills")
            .fetch_one(&self.pool)
            .await?;

        Ok(Money::from_cents(cents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;

    async fn insert_bill(db: &Database, name: &str, quantity: i64, total_cents: i64) {
        sqlx::query(
            "INSERT INTO bills (medicine_name, quantity, total_cents, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(name)
        .bind(quantity)
        .bind(total_cents)
        .bind(Utc::now())
        .execute(db.pool())
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_empty_ledger() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.bills();

        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(repo.total_revenue().await.unwrap().is_zero());
        assert!(repo.recent(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recent_and_filters() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        insert_bill(&db, "Paracetamol", 10, 2500).await;
        insert_bill(&db, "Ibuprofen", 2, 800).await;
        insert_bill(&db, "Paracetamol", 4, 1000).await;

        let repo = db.bills();

        let recent = repo.recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].quantity, 4);
        assert_eq!(recent[1].medicine_name, "Ibuprofen");

        let para = repo.for_medicine("Paracetamol").await.unwrap();
        assert_eq!(para.len(), 2);
        assert_eq!(para[0].total().cents(), 2500);

        assert_eq!(repo.count().await.unwrap(), 3);
        assert_eq!(repo.total_revenue().await.unwrap(), Money::from_cents(4300));
    }
}
