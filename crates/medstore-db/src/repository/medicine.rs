//! # Medicine Repository
//!
//! Database operations for the inventory store.
//!
//! ## Key Operations
//! - Add a medicine (unique name)
//! - Restock by name (additive delta update)
//! - Browse stock with an optional substring filter

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use medstore_core::validation::{validate_quantity, validate_search_filter};
use medstore_core::{Medicine, NewMedicine, ValidationError};

const SELECT_MEDICINE: &str = r#"
    SELECT id, name, company, price_cents, stock, created_at, updated_at
    FROM medicine
"#;

/// Repository for medicine database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = MedicineRepository::new(pool);
///
/// let med = repo.insert(&NewMedicine::parse("Paracetamol", "GSK", "2.50", "100")?).await?;
/// let med = repo.add_stock("Paracetamol", 20).await?;
/// let shelf = repo.list(Some("para")).await?;
/// ```
#[derive(Debug, Clone)]
pub struct MedicineRepository {
    pool: SqlitePool,
}

impl MedicineRepository {
    /// Creates a new MedicineRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MedicineRepository { pool }
    }

    /// Inserts a new medicine.
    ///
    /// ## Returns
    /// * `Ok(Medicine)` - Stored row with its assigned id
    /// * `Err(DbError::UniqueViolation)` - Name already exists
    pub async fn insert(&self, medicine: &NewMedicine) -> DbResult<Medicine> {
        debug!(name = %medicine.name, "Inserting medicine");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO medicine (name, company, price_cents, stock, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            "#,
        )
        .bind(&medicine.name)
        .bind(&medicine.company)
        .bind(medicine.price.cents())
        .bind(medicine.stock)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate("medicine.name", &medicine.name),
            other => other,
        })?;

        Ok(Medicine {
            id: result.last_insert_rowid(),
            name: medicine.name.clone(),
            company: medicine.company.clone(),
            price_cents: medicine.price.cents(),
            stock: medicine.stock,
            created_at: now,
            updated_at: now,
        })
    }

    /// Adds `quantity` units to the named medicine.
    ///
    /// Restocking is a delta update (`stock = stock + ?`), never an
    /// absolute overwrite, so it composes with concurrent sales.
    ///
    /// ## Returns
    /// * `Ok(Medicine)` - Row after restocking
    /// * `Err(DbError::Validation)` - Quantity not strictly positive, or
    ///   the new stock would not fit in an `i64`
    /// * `Err(DbError::NotFound)` - No medicine with that name
    pub async fn add_stock(&self, name: &str, quantity: i64) -> DbResult<Medicine> {
        let quantity = validate_quantity(quantity)?;
        let name = name.trim();

        debug!(name = %name, quantity = quantity, "Adding stock");

        // SQLite silently promotes an overflowing INTEGER sum to REAL.
        let result = sqlx::query(
            r#"
            UPDATE medicine
            SET stock = stock + ?2, updated_at = ?3
            WHERE name = ?1 AND stock <= 9223372036854775807 - ?2
            "#,
        )
        .bind(name)
        .bind(quantity)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return match self.get_by_name(name).await? {
                Some(medicine) => Err(DbError::Validation(ValidationError::OutOfRange {
                    field: "quantity".to_string(),
                    min: 1,
                    max: i64::MAX - medicine.stock,
                })),
                None => Err(DbError::not_found("Medicine", name)),
            };
        }

        self.get_by_name(name)
            .await?
            .ok_or_else(|| DbError::not_found("Medicine", name))
    }

    /// Lists medicines ordered by name.
    ///
    /// A missing or blank filter lists everything; otherwise rows whose
    /// name contains the filter (SQL `LIKE '%filter%'`).
    pub async fn list(&self, filter: Option<&str>) -> DbResult<Vec<Medicine>> {
        let filter = match filter {
            Some(text) => validate_search_filter(text)?,
            None => None,
        };

        debug!(filter = ?filter, "Listing medicines");

        let rows = match filter {
            Some(filter) => {
                sqlx::query_as::<_, Medicine>(&format!(
                    "{SELECT_MEDICINE} WHERE name LIKE '%' || ?1 || '%' ORDER BY name"
                ))
                .bind(filter)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Medicine>(&format!("{SELECT_MEDICINE} ORDER BY name"))
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(rows)
    }

    /// Gets a medicine by exact name. First row by id wins.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Medicine>> {
        let medicine = sqlx::query_as::<_, Medicine>(&format!(
            "{SELECT_MEDICINE} WHERE name = ?1 ORDER BY id LIMIT 1"
        ))
        .bind(name.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(medicine)
    }

    /// Gets a medicine by its id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Medicine>> {
        let medicine =
            sqlx::query_as::<_, Medicine>(&format!("{SELECT_MEDICINE} WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(medicine)
    }

    /// Counts medicines (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM medicine")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
