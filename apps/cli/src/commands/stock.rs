//! # Stock Commands
//!
//! Restocking and the stock browser.

use tracing::info;

use super::medicine::MedicineDto;
use super::Reply;
use crate::cli::QuantityArgs;
use crate::error::AppError;
use crate::state::{ConfigState, DbState};
use medstore_core::validation::parse_quantity;

/// Adds units to an existing medicine.
pub async fn add_stock(
    db: &DbState,
    config: &ConfigState,
    args: &QuantityArgs,
) -> Result<Reply, AppError> {
    let quantity = parse_quantity(&args.quantity)?;

    let medicine = db
        .database()
        .await?
        .medicines()
        .add_stock(&args.name, quantity)
        .await?;

    info!(name = %medicine.name, added = quantity, stock = medicine.stock, "Stock added");

    let dto = MedicineDto::new(&medicine, config);
    Reply::new(
        format!("Stock updated: {} now has {} units", dto.name, dto.stock),
        &dto,
    )
}

/// Lists medicines, optionally filtered by a name substring.
pub async fn list_stock(
    db: &DbState,
    config: &ConfigState,
    filter: Option<&str>,
) -> Result<Reply, AppError> {
    let medicines = db.database().await?.medicines().list(filter).await?;

    let rows: Vec<MedicineDto> = medicines
        .iter()
        .map(|m| MedicineDto::new(m, config))
        .collect();

    Reply::new(render_table(&rows), &rows)
}

fn render_table(rows: &[MedicineDto]) -> String {
    if rows.is_empty() {
        return "No medicines found".to_string();
    }

    let mut out = format!(
        "{:>4}  {:<28} {:<20} {:>10} {:>7}",
        "ID", "NAME", "COMPANY", "PRICE", "STOCK"
    );
    for row in rows {
        out.push('\n');
        out.push_str(&format!(
            "{:>4}  {:<28} {:<20} {:>10} {:>7}",
            row.id, row.name, row.company, row.price, row.stock
        ));
    }
    out
}
