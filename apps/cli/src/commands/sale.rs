//! # Sale Command
//!
//! The billing screen: sell N units of one medicine.
//!
//! All stock and ledger work happens inside
//! [`medstore_db::SaleProcessor`]; this command only formats the outcome.

use serde::Serialize;

use super::Reply;
use crate::cli::SellArgs;
use crate::error::AppError;
use crate::state::{ConfigState, DbState};
use medstore_core::SaleReceipt;

/// Receipt as printed by the CLI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDto {
    pub bill_id: i64,
    pub medicine_id: i64,
    pub medicine_name: String,
    pub quantity: i64,
    pub unit_price: String,
    pub total_cents: i64,
    pub total: String,
    pub remaining_stock: i64,
    pub sold_at: String,
}

impl SaleDto {
    fn new(receipt: &SaleReceipt, config: &ConfigState) -> Self {
        SaleDto {
            bill_id: receipt.bill_id,
            medicine_id: receipt.medicine_id,
            medicine_name: receipt.medicine_name.clone(),
            quantity: receipt.quantity,
            unit_price: config.format_currency(receipt.unit_price),
            total_cents: receipt.total.cents(),
            total: config.format_currency(receipt.total),
            remaining_stock: receipt.remaining_stock,
            sold_at: receipt.sold_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Processes a sale and prints the receipt.
pub async fn sell(db: &DbState, config: &ConfigState, args: &SellArgs) -> Result<Reply, AppError> {
    let receipt = db
        .sale_processor()
        .process_sale(&args.name, &args.quantity)
        .await?;

    let text = format!(
        "{}\nSale successful! Total: {}\nBill #{}: {} x {} @ {}\nRemaining stock: {}",
        config.store_name,
        config.format_currency(receipt.total),
        receipt.bill_id,
        receipt.quantity,
        receipt.medicine_name,
        config.format_currency(receipt.unit_price),
        receipt.remaining_stock,
    );

    Reply::new(text, &SaleDto::new(&receipt, config))
}
