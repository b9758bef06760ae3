//! # Repository Module
//!
//! Database repository implementations for MedStore.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  CLI command                                                           │
//! │       │                                                                 │
//! │       │  db.medicines().list(Some("para"))                             │
//! │       ▼                                                                 │
//! │  MedicineRepository                                                    │
//! │  ├── insert(&self, new_medicine)                                       │
//! │  ├── add_stock(&self, name, quantity)                                  │
//! │  ├── list(&self, filter)                                               │
//! │  └── get_by_name(&self, name)                                          │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The subtractive stock path is not here: selling goes through
//! [`crate::billing::SaleProcessor`], which owns its transaction.
//!
//! ## Available Repositories
//!
//! - [`MedicineRepository`] - Inventory CRUD, restocking and filtering
//! - [`BillRepository`] - Read-only views of the bill ledger
//! - [`UserRepository`] - Operator accounts and credential checks

pub mod bill;
pub mod medicine;
pub mod user;

pub use bill::BillRepository;
pub use medicine::MedicineRepository;
pub use user::{User, UserRepository};
