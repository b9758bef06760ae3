//! # Sale Processor
//!
//! Sells N units of a medicine as one atomic unit of work: check the
//! shelf, decrement stock, append a bill.
//!
//! ## Sale Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       process_sale(name, quantity)                      │
//! │                                                                         │
//! │  SaleRequest::parse ──── bad input ──────────────► Validation          │
//! │       │                                                                 │
//! │  provider.acquire() ──── no connection ──────────► DbUnavailable       │
//! │       │                                                                 │
//! │  SELECT id, price_cents, stock ── no row ────────► NotFound            │
//! │       │                                                                 │
//! │  stock < quantity ───────────────────────────────► InsufficientStock   │
//! │       │                                                                 │
//! │  BEGIN ────────────────────────────────────────────────────────┐       │
//! │  │  UPDATE medicine SET stock = stock - q                      │       │
//! │  │         WHERE id = ? AND stock >= q ── 0 rows ──► ROLLBACK  │       │
//! │  │  INSERT INTO bills ...            ──── 0 rows ──► ROLLBACK  │       │
//! │  │  any SQL error                    ──────────────► ROLLBACK  │       │
//! │  COMMIT ───────────────────────────────────────────────────────┘       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SaleReceipt { bill_id, total, remaining_stock, ... }                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//! - On success exactly one medicine row loses `quantity` units and
//!   exactly one bill is appended with `total = price * quantity`.
//! - On any failure the database is unchanged.
//! - The connection always leaves transaction mode before it goes back
//!   to the pool. Dropping an uncommitted `sqlx::Transaction` rolls it
//!   back, which covers early returns and panics too.

use chrono::{DateTime, Utc};
use sqlx::{Connection, Sqlite, SqliteConnection, Transaction};
use tracing::{debug, info, warn};

use crate::provider::ConnectionProvider;
use medstore_core::{Money, SaleError, SaleReceipt, SaleRequest, SaleResult};

/// Snapshot of the matched medicine row taken before the transaction.
#[derive(Debug, sqlx::FromRow)]
struct StockRow {
    id: i64,
    price_cents: i64,
    stock: i64,
}

/// Runs sales against the store supplied by a [`ConnectionProvider`].
///
/// ## Usage
/// ```rust,ignore
/// let processor = SaleProcessor::new(provider);
///
/// match processor.process_sale("Paracetamol", "10").await {
///     Ok(receipt) => println!("Total: {}", receipt.total),
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SaleProcessor {
    provider: ConnectionProvider,
}

impl SaleProcessor {
    /// Creates a processor over `provider`.
    pub fn new(provider: ConnectionProvider) -> Self {
        SaleProcessor { provider }
    }

    /// Validates raw form input, then processes the sale.
    pub async fn process_sale(&self, name: &str, quantity: &str) -> SaleResult<SaleReceipt> {
        let request = SaleRequest::parse(name, quantity)?;
        self.process(request).await
    }

    /// Processes an already validated sale request.
    pub async fn process(&self, request: SaleRequest) -> SaleResult<SaleReceipt> {
        debug!(name = %request.name, quantity = request.quantity, "Processing sale");

        let mut conn = self
            .provider
            .acquire()
            .await
            .map_err(|e| SaleError::DbUnavailable(e.to_string()))?;

        let row = sqlx::query_as::<_, StockRow>(
            "SELECT id, price_cents, stock FROM medicine WHERE name = ?1 ORDER BY id LIMIT 1",
        )
        .bind(&request.name)
        .fetch_optional(&mut *conn)
        .await
        .map_err(database_error)?
        .ok_or_else(|| SaleError::not_found(&request.name))?;

        if row.stock < request.quantity {
            warn!(
                name = %request.name,
                available = row.stock,
                requested = request.quantity,
                "Insufficient stock"
            );
            return Err(SaleError::insufficient_stock(
                &request.name,
                row.stock,
                request.quantity,
            ));
        }

        let unit_price = Money::from_cents(row.price_cents);
        let total = request.total_at(unit_price)?;
        let sold_at = Utc::now();

        let mut tx = conn.begin().await.map_err(database_error)?;

        match apply_sale(&mut tx, &request, row.id, total, sold_at).await {
            Ok((bill_id, remaining_stock)) => {
                tx.commit().await.map_err(database_error)?;

                info!(
                    bill_id = bill_id,
                    name = %request.name,
                    quantity = request.quantity,
                    total = %total,
                    "Sale committed"
                );

                Ok(SaleReceipt {
                    bill_id,
                    medicine_id: row.id,
                    medicine_name: request.name,
                    quantity: request.quantity,
                    unit_price,
                    total,
                    remaining_stock,
                    sold_at,
                })
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed");
                }
                warn!(name = %request.name, error = %err, "Sale rolled back");
                Err(err)
            }
        }
    }
}

/// The transactional half of a sale. Returns `(bill_id, remaining_stock)`.
async fn apply_sale(
    tx: &mut Transaction<'_, Sqlite>,
    request: &SaleRequest,
    medicine_id: i64,
    total: Money,
    sold_at: DateTime<Utc>,
) -> SaleResult<(i64, i64)> {
    let conn: &mut SqliteConnection = tx;

    // Conditional decrement: stock can never go negative even if another
    // writer sold units between the lookup and this statement.
    let updated = sqlx::query(
        r#"
        UPDATE medicine
        SET stock = stock - ?1, updated_at = ?3
        WHERE id = ?2 AND stock >= ?1
        "#,
    )
    .bind(request.quantity)
    .bind(medicine_id)
    .bind(sold_at)
    .execute(&mut *conn)
    .await
    .map_err(database_error)?;

    if updated.rows_affected() == 0 {
        let current: Option<i64> = sqlx::query_scalar("SELECT stock FROM medicine WHERE id = ?1")
            .bind(medicine_id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(database_error)?;

        return Err(match current {
            Some(available) if available < request.quantity => {
                SaleError::insufficient_stock(&request.name, available, request.quantity)
            }
            _ => SaleError::TransactionFailed,
        });
    }

    let inserted = sqlx::query(
        r#"
        INSERT INTO bills (medicine_name, quantity, total_cents, created_at)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&request.name)
    .bind(request.quantity)
    .bind(total.cents())
    .bind(sold_at)
    .execute(&mut *conn)
    .await
    .map_err(database_error)?;

    if inserted.rows_affected() == 0 {
        return Err(SaleError::TransactionFailed);
    }

    let remaining: i64 = sqlx::query_scalar("SELECT stock FROM medicine WHERE id = ?1")
        .bind(medicine_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(database_error)?;

    Ok((inserted.last_insert_rowid(), remaining))
}

fn database_error(err: sqlx::Error) -> SaleError {
    match err {
        sqlx::Error::Database(db_err) => SaleError::Database(db_err.message().to_string()),
        other => SaleError::Database(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use medstore_core::{NewMedicine, SaleErrorKind};
    use rstest::rstest;

    async fn setup(stock: &str) -> (Database, SaleProcessor) {
        let config = DbConfig::in_memory();
        let db = Database::new(config.clone()).await.unwrap();
        db.medicines()
            .insert(&NewMedicine::parse("Paracetamol", "GSK", "2.50", stock).unwrap())
            .await
            .unwrap();

        let processor = SaleProcessor::new(ConnectionProvider::from_database(config, db.clone()));
        (db, processor)
    }

    #[tokio::test]
    async fn test_sale_decrements_stock_and_records_bill() {
        let (db, processor) = setup("100").await;

        let receipt = processor.process_sale("Paracetamol", "10").await.unwrap();

        assert_eq!(receipt.total, Money::from_cents(2500));
        assert_eq!(receipt.unit_price, Money::from_cents(250));
        assert_eq!(receipt.remaining_stock, 90);

        let med = db.medicines().get_by_name("Paracetamol").await.unwrap().unwrap();
        assert_eq!(med.stock, 90);

        let bills = db.bills().recent(10).await.unwrap();
        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].id, receipt.bill_id);
        assert_eq!(bills[0].medicine_name, "Paracetamol");
        assert_eq!(bills[0].quantity, 10);
        assert_eq!(bills[0].total_cents, 2500);
    }

    #[tokio::test]
    async fn test_selling_entire_stock() {
        let (db, processor) = setup("5").await;

        let receipt = processor.process_sale("Paracetamol", "5").await.unwrap();
        assert_eq!(receipt.remaining_stock, 0);

        let err = processor.process_sale("Paracetamol", "1").await.unwrap_err();
        assert_eq!(err, SaleError::insufficient_stock("Paracetamol", 0, 1));
        assert_eq!(db.bills().count().await.unwrap(), 1);
    }

    #[rstest]
    #[case("", "10", SaleErrorKind::Validation)]
    #[case("Paracetamol", "", SaleErrorKind::Validation)]
    #[case("Paracetamol", "0", SaleErrorKind::Validation)]
    #[case("Paracetamol", "-3", SaleErrorKind::Validation)]
    #[case("Paracetamol", "ten", SaleErrorKind::Validation)]
    #[case("Paracetamol", "3000000000", SaleErrorKind::Validation)]
    #[case("Ibuprofen", "1", SaleErrorKind::NotFound)]
    #[case("Paracetamol", "101", SaleErrorKind::BusinessRule)]
    #[tokio::test]
    async fn test_failures_leave_store_unchanged(
        #[case] name: &str,
        #[case] quantity: &str,
        #[case] expected: SaleErrorKind,
    ) {
        let (db, processor) = setup("100").await;

        let err = processor.process_sale(name, quantity).await.unwrap_err();
        assert_eq!(err.kind(), expected);

        let med = db.medicines().get_by_name("Paracetamol").await.unwrap().unwrap();
        assert_eq!(med.stock, 100);
        assert_eq!(db.bills().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_bill_insert_failure_rolls_back_stock() {
        let (db, processor) = setup("100").await;
        sqlx::query(
            "CREATE TRIGGER fail_bill BEFORE INSERT ON bills BEGIN SELECT RAISE(ABORT, 'injected failure'); END",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let err = processor.process_sale("Paracetamol", "10").await.unwrap_err();
        assert_eq!(err, SaleError::Database("injected failure".to_string()));
        assert!(err.rolled_back());

        let med = db.medicines().get_by_name("Paracetamol").await.unwrap().unwrap();
        assert_eq!(med.stock, 100);
        assert_eq!(db.bills().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_silently_skipped_insert_is_transaction_failure() {
        let (db, processor) = setup("100").await;
        sqlx::query(
            "CREATE TRIGGER skip_bill BEFORE INSERT ON bills BEGIN SELECT RAISE(IGNORE); END",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let err = processor.process_sale("Paracetamol", "10").await.unwrap_err();
        assert_eq!(err, SaleError::TransactionFailed);
        assert_eq!(err.kind(), SaleErrorKind::Integrity);

        let med = db.medicines().get_by_name("Paracetamol").await.unwrap().unwrap();
        assert_eq!(med.stock, 100);
    }

    #[tokio::test]
    async fn test_skipped_stock_update_is_transaction_failure() {
        let (db, processor) = setup("100").await;
        sqlx::query(
            "CREATE TRIGGER skip_decrement BEFORE UPDATE ON medicine BEGIN SELECT RAISE(IGNORE); END",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let err = processor.process_sale("Paracetamol", "10").await.unwrap_err();
        assert_eq!(err, SaleError::TransactionFailed);
        assert!(err.rolled_back());

        let med = db.medicines().get_by_name("Paracetamol").await.unwrap().unwrap();
        assert_eq!(med.stock, 100);
        assert_eq!(db.bills().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_stock_drained_after_lookup_is_insufficient() {
        let (db, _processor) = setup("100").await;
        let med = db.medicines().get_by_name("Paracetamol").await.unwrap().unwrap();

        // Pre-check already passed; a concurrent sale drained the shelf.
        let request = SaleRequest::new("Paracetamol", 150).unwrap();
        let total = request.total_at(med.price()).unwrap();

        let mut tx = db.pool().begin().await.unwrap();
        let err = apply_sale(&mut tx, &request, med.id, total, Utc::now())
            .await
            .unwrap_err();
        tx.rollback().await.unwrap();

        assert_eq!(err, SaleError::insufficient_stock("Paracetamol", 100, 150));
        assert_eq!(db.bills().count().await.unwrap(), 0);
        let med = db.medicines().get_by_name("Paracetamol").await.unwrap().unwrap();
        assert_eq!(med.stock, 100);
    }

    #[tokio::test]
    async fn test_medicine_deleted_after_lookup_is_transaction_failure() {
        let (db, _processor) = setup("100").await;
        let med = db.medicines().get_by_name("Paracetamol").await.unwrap().unwrap();
        sqlx::query("DELETE FROM medicine WHERE id = ?1")
            .bind(med.id)
            .execute(db.pool())
            .await
            .unwrap();

        let request = SaleRequest::new("Paracetamol", 10).unwrap();
        let total = request.total_at(med.price()).unwrap();

        let mut tx = db.pool().begin().await.unwrap();
        let err = apply_sale(&mut tx, &request, med.id, total, Utc::now())
            .await
            .unwrap_err();
        tx.rollback().await.unwrap();

        assert_eq!(err, SaleError::TransactionFailed);
        assert_eq!(db.bills().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_connection_reusable_after_rollback() {
        let (db, processor) = setup("100").await;
        sqlx::query(
            "CREATE TRIGGER fail_bill BEFORE INSERT ON bills BEGIN SELECT RAISE(ABORT, 'injected failure'); END",
        )
        .execute(db.pool())
        .await
        .unwrap();

        assert!(processor.process_sale("Paracetamol", "10").await.is_err());

        sqlx::query("DROP TRIGGER fail_bill")
            .execute(db.pool())
            .await
            .unwrap();

        let receipt = processor.process_sale("Paracetamol", "10").await.unwrap();
        assert_eq!(receipt.remaining_stock, 90);
    }
}
