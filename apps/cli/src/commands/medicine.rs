//! # Medicine Commands
//!
//! Adding medicines to the catalogue.

use serde::Serialize;
use tracing::info;

use super::Reply;
use crate::cli::AddMedicineArgs;
use crate::error::AppError;
use crate::state::{ConfigState, DbState};
use medstore_core::{Medicine, NewMedicine};

/// Medicine as printed by the CLI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineDto {
    pub id: i64,
    pub name: String,
    pub company: String,
    pub price_cents: i64,
    /// Price formatted with the configured currency symbol
    pub price: String,
    pub stock: i64,
}

impl MedicineDto {
    pub fn new(medicine: &Medicine, config: &ConfigState) -> Self {
        MedicineDto {
            id: medicine.id,
            name: medicine.name.clone(),
            company: medicine.company.clone(),
            price_cents: medicine.price_cents,
            price: config.format_currency(medicine.price()),
            stock: medicine.stock,
        }
    }
}

/// Adds a medicine from the raw form fields.
pub async fn add_medicine(
    db: &DbState,
    config: &ConfigState,
    args: &AddMedicineArgs,
) -> Result<Reply, AppError> {
    let new_medicine = NewMedicine::parse(&args.name, &args.company, &args.price, &args.stock)?;

    let medicine = db.database().await?.medicines().insert(&new_medicine).await?;

    info!(id = medicine.id, name = %medicine.name, "Medicine added");

    let dto = MedicineDto::new(&medicine, config);
    Reply::new(
        format!(
            "Medicine added: {} at {} ({} in stock)",
            dto.name, dto.price, dto.stock
        ),
        &dto,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use medstore_db::DbConfig;
    use rstest::rstest;

    fn args(name: &str, price: &str, stock: &str) -> AddMedicineArgs {
        AddMedicineArgs {
            name: name.to_string(),
            company: "GSK".to_string(),
            price: price.to_string(),
            stock: stock.to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_medicine() {
        let db = DbState::new(DbConfig::in_memory());
        let config = ConfigState::default();

        let reply = add_medicine(&db, &config, &args("Paracetamol", "2.50", "100"))
            .await
            .unwrap();

        assert_eq!(reply.text, "Medicine added: Paracetamol at $2.50 (100 in stock)");
        assert_eq!(reply.json["priceCents"], 250);
        assert_eq!(reply.json["stock"], 100);
    }

    #[rstest]
    #[case::blank_name("", "2.50", "1", "name is required")]
    #[case::blank_price("Paracetamol", "", "1", "price is required")]
    #[case::negative_price("Paracetamol", "-1", "1", "price must not be negative")]
    #[tokio::test]
    async fn test_add_medicine_validation(
        #[case] name: &str,
        #[case] price: &str,
        #[case] stock: &str,
        #[case] message: &str,
    ) {
        let db = DbState::new(DbConfig::in_memory());

        let err = add_medicine(&db, &ConfigState::default(), &args(name, price, stock))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, message);
    }

    #[tokio::test]
    async fn test_duplicate_medicine() {
        let db = DbState::new(DbConfig::in_memory());
        let config = ConfigState::default();
        add_medicine(&db, &config, &args("Paracetamol", "2.50", ""))
            .await
            .unwrap();

        let err = add_medicine(&db, &config, &args("Paracetamol", "3.00", ""))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Duplicate);
    }
}
