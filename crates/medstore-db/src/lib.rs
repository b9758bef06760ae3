//! # medstore-db: Database Layer for MedStore
//!
//! This crate provides database access for the MedStore system.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        MedStore Data Flow                               │
//! │                                                                         │
//! │  CLI command (medstore sell --name ... --quantity ...)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    medstore-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  Connection   │    │ SaleProcessor │    │  Migrations  │  │   │
//! │  │   │  Provider     │◄───│  (billing.rs) │    │  (embedded)  │  │   │
//! │  │   │  (pool.rs)    │    ├───────────────┤    │              │  │   │
//! │  │   │               │◄───│ Repositories  │    │ 001_init.sql │  │   │
//! │  │   │ SqlitePool    │    │ Medicine/Bill │    │              │  │   │
//! │  │   │               │    │ User          │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ~/.local/share/medstore/medstore.db (platform data dir)       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`provider`] - Lazily opened, reconfigurable connection source
//! - [`billing`] - The atomic sale transaction
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Medicine, bill and user repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use medstore_db::{ConnectionProvider, DbConfig, SaleProcessor};
//!
//! let provider = ConnectionProvider::new(DbConfig::new("path/to/medstore.db"));
//! let processor = SaleProcessor::new(provider.clone());
//!
//! let receipt = processor.process_sale("Paracetamol", "10").await?;
//! let shelf = provider.database().await?.medicines().list(None).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod provider;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use billing::SaleProcessor;
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use provider::{test_connection, ConnectionProvider};

// Repository re-exports for convenience
pub use repository::bill::BillRepository;
pub use repository::medicine::MedicineRepository;
pub use repository::user::{User, UserRepository};
