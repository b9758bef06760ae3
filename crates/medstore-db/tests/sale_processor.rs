//! End-to-end checks of the sale transaction against real SQLite files.

use medstore_core::{Money, NewMedicine, SaleError, SaleErrorKind};
use medstore_db::{ConnectionProvider, Database, DbConfig, SaleProcessor};
use tempfile::TempDir;

struct Store {
    dir: TempDir,
    db: Database,
    processor: SaleProcessor,
}

async fn store_with_paracetamol() -> Store {
    let dir = tempfile::tempdir().unwrap();
    let config = DbConfig::new(dir.path().join("medstore.db"));

    let provider = ConnectionProvider::connect(config).await.unwrap();
    let db = provider.database().await.unwrap();
    db.medicines()
        .insert(&NewMedicine::parse("Paracetamol", "GSK", "2.50", "100").unwrap())
        .await
        .unwrap();

    Store {
        dir,
        db,
        processor: SaleProcessor::new(provider),
    }
}

async fn stock_of(db: &Database, name: &str) -> i64 {
    db.medicines().get_by_name(name).await.unwrap().unwrap().stock
}

#[tokio::test]
async fn paracetamol_sale_succeeds() {
    let store = store_with_paracetamol().await;

    let receipt = store
        .processor
        .process_sale("Paracetamol", "10")
        .await
        .unwrap();

    assert_eq!(receipt.total, Money::from_cents(2500));
    assert_eq!(receipt.total.to_string(), "25.00");
    assert_eq!(stock_of(&store.db, "Paracetamol").await, 90);

    let bills = store.db.bills().for_medicine("Paracetamol").await.unwrap();
    assert_eq!(bills.len(), 1);
    assert_eq!(bills[0].quantity, 10);
    assert_eq!(bills[0].total(), Money::from_cents(2500));
}

#[tokio::test]
async fn oversized_sale_reports_available_stock() {
    let store = store_with_paracetamol().await;

    let err = store
        .processor
        .process_sale("Paracetamol", "200")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        SaleError::InsufficientStock {
            name: "Paracetamol".to_string(),
            available: 100,
            requested: 200,
        }
    );
    assert_eq!(stock_of(&store.db, "Paracetamol").await, 100);
    assert_eq!(store.db.bills().count().await.unwrap(), 0);
}

#[tokio::test]
async fn unknown_medicine_is_not_found() {
    let store = store_with_paracetamol().await;

    let err = store
        .processor
        .process_sale("Ibuprofen", "5")
        .await
        .unwrap_err();

    assert_eq!(err, SaleError::not_found("Ibuprofen"));
    assert_eq!(store.db.bills().count().await.unwrap(), 0);
}

#[tokio::test]
async fn negative_quantity_is_rejected() {
    let store = store_with_paracetamol().await;

    let err = store
        .processor
        .process_sale("Paracetamol", "-3")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), SaleErrorKind::Validation);
    assert_eq!(err.to_string(), "quantity must be a positive integer");
    assert_eq!(stock_of(&store.db, "Paracetamol").await, 100);
}

#[tokio::test]
async fn repeated_failures_are_stable() {
    let store = store_with_paracetamol().await;

    for _ in 0..3 {
        let err = store
            .processor
            .process_sale("Paracetamol", "101")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), SaleErrorKind::BusinessRule);
    }

    assert_eq!(stock_of(&store.db, "Paracetamol").await, 100);
    assert_eq!(store.db.bills().count().await.unwrap(), 0);
}

#[tokio::test]
async fn ledger_matches_inventory_after_mixed_sales() {
    let store = store_with_paracetamol().await;

    for quantity in ["10", "0", "25", "500", "abc", "65"] {
        let _ = store.processor.process_sale("Paracetamol", quantity).await;
    }

    let sold: i64 = store
        .db
        .bills()
        .for_medicine("Paracetamol")
        .await
        .unwrap()
        .iter()
        .map(|b| b.quantity)
        .sum();

    assert_eq!(sold, 100);
    assert_eq!(stock_of(&store.db, "Paracetamol").await, 0);
    assert_eq!(
        store.db.bills().total_revenue().await.unwrap(),
        Money::from_cents(25_000)
    );
}

#[tokio::test]
async fn concurrent_sales_never_oversell() {
    let store = store_with_paracetamol().await;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let processor = store.processor.clone();
            tokio::spawn(async move { processor.process_sale("Paracetamol", "20").await })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(err) => assert!(
                matches!(
                    err.kind(),
                    SaleErrorKind::BusinessRule | SaleErrorKind::Infrastructure
                ),
                "unexpected failure: {err:?}"
            ),
        }
    }

    assert!(successes <= 5);
    assert_eq!(
        stock_of(&store.db, "Paracetamol").await,
        100 - 20 * successes
    );
    assert_eq!(store.db.bills().count().await.unwrap(), successes);
}

#[tokio::test]
async fn unreachable_database_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let config = DbConfig::new(dir.path().join("missing").join("db.sqlite"))
        .connect_timeout(std::time::Duration::from_secs(1));
    let processor = SaleProcessor::new(ConnectionProvider::new(config));

    let err = processor
        .process_sale("Paracetamol", "10")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), SaleErrorKind::Availability);
    assert!(err.to_string().starts_with("Cannot connect to database"));
}

#[tokio::test]
async fn reconfigured_provider_sells_from_new_store() {
    let store = store_with_paracetamol().await;
    let provider = ConnectionProvider::new(DbConfig::in_memory());
    let processor = SaleProcessor::new(provider.clone());

    let err = processor.process_sale("Paracetamol", "1").await.unwrap_err();
    assert_eq!(err.kind(), SaleErrorKind::NotFound);

    let file_config = DbConfig::new(store.dir.path().join("medstore.db"));
    provider.reconfigure(file_config).await;

    let receipt = processor.process_sale("Paracetamol", "1").await.unwrap();
    assert_eq!(receipt.remaining_stock, 99);
}
