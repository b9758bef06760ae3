//! # Error Types
//!
//! Domain-specific error types for medstore-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  medstore-core errors (this file)                                      │
//! │  ├── ValidationError  - Form input failures                            │
//! │  └── SaleError        - Every terminal failure of a sale               │
//! │                                                                         │
//! │  medstore-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── AppError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → SaleError / DbError → AppError → Terminal     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// They are raised before any database work starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be a positive integer")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., "ten" for a quantity).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates an InvalidFormat error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Sale Error
// =============================================================================

/// Every way a sale can fail.
///
/// The Sale Processor never lets a fault escape as anything else: callers
/// branch on the variant (or on [`SaleError::kind`]) instead of catching
/// heterogeneous error types.
///
/// ## Outcome Map
/// ```text
/// ┌───────────────────────┬──────────────────┬──────────────────────────┐
/// │ Variant               │ Kind             │ Database touched?        │
/// ├───────────────────────┼──────────────────┼──────────────────────────┤
/// │ Validation            │ Validation       │ never                    │
/// │ DbUnavailable         │ Availability     │ never                    │
/// │ NotFound              │ NotFound         │ read only                │
/// │ InsufficientStock     │ BusinessRule     │ read only / rolled back  │
/// │ TransactionFailed     │ Integrity        │ rolled back              │
/// │ Database              │ Infrastructure   │ rolled back              │
/// └───────────────────────┴──────────────────┴──────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaleError {
    /// Name or quantity rejected before the database was touched.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The connection provider could not supply a connection.
    #[error("Cannot connect to database: {0}")]
    DbUnavailable(String),

    /// No medicine with that exact name exists.
    #[error("Medicine not found: {name}")]
    NotFound { name: String },

    /// Not enough inventory to cover the requested quantity.
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// The stock update or bill insert wrote zero rows; rolled back.
    #[error("Failed to process sale: no rows were written, changes rolled back")]
    TransactionFailed,

    /// Any SQL-level failure, surfaced verbatim; rolled back.
    #[error("Database error: {0}")]
    Database(String),
}

/// Error taxonomy for sale failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleErrorKind {
    /// Caller input malformed.
    Validation,
    /// Cannot reach the store.
    Availability,
    /// Referential lookup miss.
    NotFound,
    /// Insufficient stock.
    BusinessRule,
    /// Transaction wrote zero rows unexpectedly.
    Integrity,
    /// Underlying database error.
    Infrastructure,
}

impl SaleError {
    /// Returns the taxonomy bucket of this failure.
    pub fn kind(&self) -> SaleErrorKind {
        match self {
            SaleError::Validation(_) => SaleErrorKind::Validation,
            SaleError::DbUnavailable(_) => SaleErrorKind::Availability,
            SaleError::NotFound { .. } => SaleErrorKind::NotFound,
            SaleError::InsufficientStock { .. } => SaleErrorKind::BusinessRule,
            SaleError::TransactionFailed => SaleErrorKind::Integrity,
            SaleError::Database(_) => SaleErrorKind::Infrastructure,
        }
    }

    /// Whether this failure happened after the transaction was opened.
    ///
    /// Integrity and infrastructure failures are always rolled back
    /// before being reported.
    pub fn rolled_back(&self) -> bool {
        matches!(
            self.kind(),
            SaleErrorKind::Integrity | SaleErrorKind::Infrastructure
        )
    }

    /// Creates a NotFound error.
    pub fn not_found(name: impl Into<String>) -> Self {
        SaleError::NotFound { name: name.into() }
    }

    /// Creates an InsufficientStock error.
    pub fn insufficient_stock(name: impl Into<String>, available: i64, requested: i64) -> Self {
        SaleError::InsufficientStock {
            name: name.into(),
            available,
            requested,
        }
    }
}

/// Result type for the Sale Processor.
pub type SaleResult<T> = Result<T, SaleError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("name");
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be a positive integer");
    }

    #[rstest]
    #[case::validation(SaleError::from(ValidationError::required("name")), SaleErrorKind::Validation)]
    #[case::unavailable(SaleError::DbUnavailable("closed".to_string()), SaleErrorKind::Availability)]
    #[case::not_found(SaleError::not_found("Ibuprofen"), SaleErrorKind::NotFound)]
    #[case::insufficient(SaleError::insufficient_stock("Paracetamol", 100, 200), SaleErrorKind::BusinessRule)]
    #[case::transaction(SaleError::TransactionFailed, SaleErrorKind::Integrity)]
    #[case::database(SaleError::Database("disk I/O error".to_string()), SaleErrorKind::Infrastructure)]
    fn test_sale_error_kind(#[case] err: SaleError, #[case] expected: SaleErrorKind) {
        assert_eq!(err.kind(), expected);
    }

    #[test]
    fn test_only_post_transaction_failures_roll_back() {
        assert!(SaleError::TransactionFailed.rolled_back());
        assert!(SaleError::Database("locked".to_string()).rolled_back());
        assert!(!SaleError::not_found("x").rolled_back());
        assert!(!SaleError::insufficient_stock("x", 1, 2).rolled_back());
    }

    #[test]
    fn test_insufficient_stock_message() {
        let err = SaleError::insufficient_stock("Paracetamol", 100, 200);
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Paracetamol: available 100, requested 200"
        );
    }
}
