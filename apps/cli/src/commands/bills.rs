//! # Bill Commands
//!
//! Read-only view of the bill ledger.

use serde::Serialize;

use super::Reply;
use crate::cli::BillsArgs;
use crate::error::AppError;
use crate::state::{ConfigState, DbState};
use medstore_core::{Bill, Money};

/// Bill as printed by the CLI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillDto {
    pub id: i64,
    pub medicine_name: String,
    pub quantity: i64,
    pub total_cents: i64,
    pub total: String,
    pub created_at: String,
}

impl BillDto {
    fn new(bill: &Bill, config: &ConfigState) -> Self {
        BillDto {
            id: bill.id,
            medicine_name: bill.medicine_name.clone(),
            quantity: bill.quantity,
            total_cents: bill.total_cents,
            total: config.format_currency(bill.total()),
            created_at: bill.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Lists recent bills, or every bill for one medicine.
pub async fn list_bills(
    db: &DbState,
    config: &ConfigState,
    args: &BillsArgs,
) -> Result<Reply, AppError> {
    let repo = db.database().await?.bills();

    let bills = match args.medicine.as_deref() {
        Some(name) => repo.for_medicine(name).await?,
        None => repo.recent(args.limit).await?,
    };

    let rows: Vec<BillDto> = bills.iter().map(|b| BillDto::new(b, config)).collect();
    let shown_total: Money = bills.iter().map(Bill::total).fold(Money::zero(), |a, b| a + b);

    Reply::new(render_table(&rows, config, shown_total), &rows)
}

fn render_table(rows: &[BillDto], config: &ConfigState, total: Money) -> String {
    if rows.is_empty() {
        return "No bills found".to_string();
    }

    let mut out = format!(
        "{:>5}  {:<19}  {:<28} {:>6} {:>12}",
        "BILL", "DATE (UTC)", "MEDICINE", "QTY", "TOTAL"
    );
    for row in rows {
        out.push('\n');
        out.push_str(&format!(
            "{:>5}  {:<19}  {:<28} {:>6} {:>12}",
            row.id, row.created_at, row.medicine_name, row.quantity, row.total
        ));
    }
    out.push_str(&format!(
        "\n{} bill(s), total {}",
        rows.len(),
        config.format_currency(total)
    ));
    out
}
