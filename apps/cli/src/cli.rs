//! # Command-Line Arguments
//!
//! ```text
//! medstore [--db PATH] [--json] <command>
//!   login      --username U --password P
//!   user add   --username U --password P
//!   medicine add --name N [--company C] --price P [--stock S]
//!   stock add  --name N --quantity Q
//!   stock list [--filter F]
//!   sell       --name N --quantity Q
//!   bills      [--limit N] [--medicine NAME]
//!   db test    [--path PATH]
//!   db status
//! ```
//!
//! Quantities and prices are taken as text and validated by
//! `medstore-core`, so the operator sees the same messages as the
//! library reports.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Medical store inventory and billing
#[derive(Parser, Debug)]
#[command(name = "medstore")]
#[command(about = "Medical store inventory and billing", long_about = None)]
pub struct Cli {
    /// Database file (overrides MEDSTORE_DB_PATH)
    #[arg(long = "db", value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    /// Print replies as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check operator credentials
    Login(Credentials),

    /// Manage operator accounts
    #[command(subcommand)]
    User(UserCommand),

    /// Manage the medicine catalogue
    #[command(subcommand)]
    Medicine(MedicineCommand),

    /// Restock or browse inventory
    #[command(subcommand)]
    Stock(StockCommand),

    /// Sell a quantity of one medicine
    Sell(SellArgs),

    /// Show the bill ledger
    Bills(BillsArgs),

    /// Database settings and diagnostics
    #[command(subcommand)]
    Db(DbCommand),
}

#[derive(Args, Debug)]
pub struct Credentials {
    #[arg(long, short = 'u')]
    pub username: String,

    #[arg(long, short = 'p')]
    pub password: String,
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Create an operator account
    Add(Credentials),
}

#[derive(Subcommand, Debug)]
pub enum MedicineCommand {
    /// Add a new medicine
    Add(AddMedicineArgs),
}

#[derive(Args, Debug)]
pub struct AddMedicineArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub company: String,

    /// Unit price, e.g. 2.50
    #[arg(long, allow_hyphen_values = true)]
    pub price: String,

    /// Opening stock (blank means 0)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub stock: String,
}

#[derive(Subcommand, Debug)]
pub enum StockCommand {
    /// Add units to an existing medicine
    Add(QuantityArgs),

    /// List medicines, optionally filtered by name
    List {
        #[arg(long)]
        filter: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct QuantityArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long, allow_hyphen_values = true)]
    pub quantity: String,
}

#[derive(Args, Debug)]
pub struct SellArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long, allow_hyphen_values = true)]
    pub quantity: String,
}

#[derive(Args, Debug)]
pub struct BillsArgs {
    /// Number of most recent bills to show
    #[arg(long, default_value_t = 20)]
    pub limit: u32,

    /// Only bills for this medicine
    #[arg(long)]
    pub medicine: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum DbCommand {
    /// Try to connect without changing the saved settings
    Test {
        /// Database file to test (defaults to the configured one)
        #[arg(long, value_name = "PATH")]
        path: Option<PathBuf>,
    },

    /// Show schema and row counts
    Status,
}
