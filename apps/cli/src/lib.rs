//! # MedStore CLI Library
//!
//! Front end for the MedStore system: one subcommand per store screen.
//!
//! ## Module Organization
//! ```text
//! medstore_cli/
//! ├── lib.rs          ◄─── You are here (setup, dispatch, printing)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── state/
//! │   ├── db.rs       ◄─── ConnectionProvider wrapper
//! │   └── config.rs   ◄─── Display configuration
//! ├── commands/
//! │   ├── auth.rs     ◄─── login, user add
//! │   ├── medicine.rs ◄─── medicine add
//! │   ├── stock.rs    ◄─── stock add, stock list
//! │   ├── sale.rs     ◄─── sell
//! │   ├── bills.rs    ◄─── bills
//! │   └── settings.rs ◄─── db test, db status
//! └── error.rs        ◄─── AppError for commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, DbCommand, MedicineCommand, StockCommand, UserCommand};
use commands::Reply;
use error::AppError;
use medstore_db::DbConfig;
use state::{ConfigState, DbState};

/// Parses arguments, runs one command and prints its outcome.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging                                                  │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: warn, medstore crates at info; RUST_LOG overrides        │
/// │                                                                         │
/// │  2. Determine Database Path                                             │
/// │     • --db PATH, else MEDSTORE_DB_PATH, else platform data dir          │
/// │                                                                         │
/// │  3. Initialize State Objects                                            │
/// │     • DbState: ConnectionProvider (opened on first use)                 │
/// │     • ConfigState: from MEDSTORE_* environment                          │
/// │                                                                         │
/// │  4. Execute the command, print text or JSON                             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    let outcome = match get_database_path(cli.db.clone()) {
        Ok(db_path) => {
            info!(?db_path, "Database path determined");
            let db = DbState::new(DbConfig::new(db_path));
            let config = ConfigState::from_env();
            execute(&cli.command, &db, &config).await
        }
        Err(err) => Err(err),
    };

    match outcome {
        Ok(reply) => {
            if cli.json {
                println!("{}", reply.json);
            } else {
                println!("{}", reply.text);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            if cli.json {
                match serde_json::to_string(&err) {
                    Ok(json) => println!("{}", json),
                    Err(_) => eprintln!("ERROR: {}", err),
                }
            } else {
                eprintln!("ERROR: {}", err);
            }
            ExitCode::FAILURE
        }
    }
}

/// Runs one parsed command against the given state.
pub async fn execute(
    command: &Command,
    db: &DbState,
    config: &ConfigState,
) -> Result<Reply, AppError> {
    match command {
        Command::Login(creds) => commands::auth::login(db, creds).await,
        Command::User(UserCommand::Add(creds)) => commands::auth::add_user(db, creds).await,
        Command::Medicine(MedicineCommand::Add(args)) => {
            commands::medicine::add_medicine(db, config, args).await
        }
        Command::Stock(StockCommand::Add(args)) => {
            commands::stock::add_stock(db, config, args).await
        }
        Command::Stock(StockCommand::List { filter }) => {
            commands::stock::list_stock(db, config, filter.as_deref()).await
        }
        Command::Sell(args) => commands::sale::sell(db, config, args).await,
        Command::Bills(args) => commands::bills::list_bills(db, config, args).await,
        Command::Db(DbCommand::Test { path }) => {
            commands::settings::test_db(db, path.clone()).await
        }
        Command::Db(DbCommand::Status) => commands::settings::db_status(db, config).await,
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=medstore_db=trace` - Trace the database layer only
/// - Default: warnings, plus info from the medstore crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("warn,medstore_core=info,medstore_db=info,medstore_cli=info,sqlx=warn")
    });

    // stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Determines the database file path.
///
/// ## Resolution Order
/// 1. `--db PATH`
/// 2. `MEDSTORE_DB_PATH` environment variable
/// 3. Platform data directory:
///    - **macOS**: `~/Library/Application Support/com.medstore.medstore/medstore.db`
///    - **Windows**: `%APPDATA%\medstore\medstore\data\medstore.db`
///    - **Linux**: `~/.local/share/medstore/medstore.db`
fn get_database_path(cli_override: Option<PathBuf>) -> Result<PathBuf, AppError> {
    if let Some(path) = cli_override {
        return Ok(path);
    }

    if let Ok(path) = std::env::var("MEDSTORE_DB_PATH") {
        return Ok(PathBuf::from(path));
    }

    let proj_dirs = ProjectDirs::from("com", "medstore", "medstore")
        .ok_or_else(|| AppError::internal("Could not determine app data directory"))?;

    let data_dir = proj_dirs.data_dir();

    std::fs::create_dir_all(data_dir)
        .map_err(|e| AppError::internal(format!("Cannot create {}: {}", data_dir.display(), e)))?;

    Ok(data_dir.join("medstore.db"))
}
