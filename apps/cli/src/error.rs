//! # CLI Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command Function: Result<Reply, AppError>                              │
//! │         │                                                               │
//! │         ├── ValidationError ──────────────┐                            │
//! │         ├── SaleError (sale outcome) ─────┼──► AppError { code, msg }  │
//! │         └── DbError ──────────────────────┘           │                │
//! │                                                        ▼                │
//! │                                 stderr: "ERROR: <message>"  exit 1     │
//! │                                 --json:  {"code": "...", "message": ..}│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use medstore_core::{SaleError, ValidationError};
use medstore_db::DbError;

/// Error printed by the CLI when a command fails.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INSUFFICIENT_STOCK",
///   "message": "Insufficient stock for Paracetamol: available 100, requested 200"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// Name or username already taken
    Duplicate,

    /// Medicine (or other record) not found
    NotFound,

    /// Not enough stock for the sale
    InsufficientStock,

    /// Login rejected
    Unauthorized,

    /// The database could not be reached
    DatabaseUnavailable,

    /// Sale transaction wrote zero rows and was rolled back
    TransactionFailed,

    /// Database operation failed
    DatabaseError,

    /// Anything else
    Internal,
}

impl AppError {
    /// Creates a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an unauthorized error.
    pub fn unauthorized() -> Self {
        AppError::new(ErrorCode::Unauthorized, "Invalid username or password")
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

/// Sale outcomes keep their own wording; only the code is mapped.
impl From<SaleError> for AppError {
    fn from(err: SaleError) -> Self {
        let code = match &err {
            SaleError::Validation(_) => ErrorCode::ValidationError,
            SaleError::DbUnavailable(_) => ErrorCode::DatabaseUnavailable,
            SaleError::NotFound { .. } => ErrorCode::NotFound,
            SaleError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            SaleError::TransactionFailed => ErrorCode::TransactionFailed,
            SaleError::Database(_) => ErrorCode::DatabaseError,
        };
        AppError::new(code, err.to_string())
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => {
                AppError::new(ErrorCode::NotFound, format!("{} not found: {}", entity, id))
            }
            DbError::UniqueViolation { field, value } => AppError::new(
                ErrorCode::Duplicate,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::Validation(e) => AppError::validation(e.to_string()),
            DbError::CheckViolation(e) => AppError::validation(e),
            DbError::ConnectionFailed(e) => AppError::new(
                ErrorCode::DatabaseUnavailable,
                format!("Cannot connect to database: {}", e),
            ),
            DbError::PoolExhausted => {
                AppError::new(ErrorCode::DatabaseUnavailable, "Database pool exhausted")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Migration failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, format!("Database migration failed: {}", e))
            }
            DbError::QueryFailed(e) | DbError::Internal(e) => {
                tracing::error!("Database operation failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, format!("Database error: {}", e))
            }
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}
