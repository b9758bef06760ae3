//! # medstore-core: Pure Business Logic for MedStore
//!
//! This crate holds the domain model of the medical store as pure types
//! and functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        MedStore Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front End (apps/cli)                         │   │
//! │  │   login • medicine add • stock add • sell • stock list • bills  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ medstore-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   error   │  │ validation│  │   │
//! │  │   │ Medicine  │  │   Money   │  │ SaleError │  │  parsers  │  │   │
//! │  │   │   Bill    │  │           │  │ Validation│  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               medstore-db (Database Layer)                      │   │
//! │  │     SQLite, migrations, repositories, Sale Processor            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Medicine, Bill, SaleRequest, SaleReceipt)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Validation errors and the sale outcome union
//! - [`validation`] - Parsers for the store's form inputs
//!
//! ## Example Usage
//!
//! ```rust
//! use medstore_core::money::Money;
//! use medstore_core::types::SaleRequest;
//!
//! let request = SaleRequest::parse("Paracetamol", "10").unwrap();
//! let price = Money::parse("2.50").unwrap();
//!
//! let total = price.checked_multiply_quantity(request.quantity).unwrap();
//! assert_eq!(total.cents(), 2500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{SaleError, SaleErrorKind, SaleResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a medicine name.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of a company name.
pub const MAX_COMPANY_LEN: usize = 200;

/// Maximum length of a stock-browser search filter.
pub const MAX_FILTER_LEN: usize = 100;
