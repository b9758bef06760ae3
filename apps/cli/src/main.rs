//! # MedStore CLI Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging, stderr)
//! 2. Parse arguments
//! 3. Determine database path (`--db`, `MEDSTORE_DB_PATH`, app data dir)
//! 4. Build state objects (DbState, ConfigState)
//! 5. Run the command and print its reply

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    medstore_cli::run().await
}
