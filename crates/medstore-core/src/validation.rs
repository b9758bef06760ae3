//! # Validation Module
//!
//! Parsers and checks for everything an operator types into the store.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end (clap)                                             │
//! │  └── Flags present, values captured as text                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Trim, required-field checks                                       │
//! │  └── Text → integer / Money with range rules                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK (stock >= 0, price_cents >= 0)                   │
//! │  └── UNIQUE (medicine.name, users.username)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Quantities and prices arrive as raw text so a non-numeric entry is a
//! validation failure rather than a front-end crash.

use crate::error::{ValidationError, ValidationResult};
use crate::money::{Money, ParseMoneyError};
use crate::{MAX_COMPANY_LEN, MAX_FILTER_LEN, MAX_NAME_LEN};

// =============================================================================
// String Validators
// =============================================================================

/// Validates a medicine name and returns it trimmed.
///
/// ## Example
/// ```rust
/// use medstore_core::validation::validate_medicine_name;
///
/// assert_eq!(validate_medicine_name("  Paracetamol ").unwrap(), "Paracetamol");
/// assert!(validate_medicine_name("   ").is_err());
/// ```
pub fn validate_medicine_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates the free-text company field. Empty is allowed.
pub fn validate_company(company: &str) -> ValidationResult<String> {
    let company = company.trim();

    if company.chars().count() > MAX_COMPANY_LEN {
        return Err(ValidationError::TooLong {
            field: "company".to_string(),
            max: MAX_COMPANY_LEN,
        });
    }

    Ok(company.to_string())
}

/// Validates a stock-browser filter.
///
/// ## Returns
/// `None` when the filter is blank (show everything), otherwise the
/// trimmed filter.
pub fn validate_search_filter(filter: &str) -> ValidationResult<Option<String>> {
    let filter = filter.trim();

    if filter.is_empty() {
        return Ok(None);
    }

    if filter.chars().count() > MAX_FILTER_LEN {
        return Err(ValidationError::TooLong {
            field: "filter".to_string(),
            max: MAX_FILTER_LEN,
        });
    }

    Ok(Some(filter.to_string()))
}

/// Checks that both login fields were filled in.
///
/// The username is trimmed, the password is taken verbatim.
pub fn validate_credentials(username: &str, password: &str) -> ValidationResult<()> {
    if username.trim().is_empty() {
        return Err(ValidationError::required("username"));
    }
    if password.is_empty() {
        return Err(ValidationError::required("password"));
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be strictly positive (> 0)
pub fn validate_quantity(qty: i64) -> ValidationResult<i64> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(qty)
}

/// Parses a quantity typed by the operator.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Sell / Add Stock                                                       │
/// │                                                                         │
/// │  Operator enters quantity text                                         │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  parse_quantity(text) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── blank?        → Error: "quantity is required"                │
/// │       ├── not an i32?   → Error: "quantity has invalid format"         │
/// │       ├── <= 0?         → Error: "quantity must be a positive integer" │
/// │       │                                                                 │
/// │       └── OK → Proceed                                                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn parse_quantity(text: &str) -> ValidationResult<i64> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::required("quantity"));
    }

    let qty: i32 = text
        .parse()
        .map_err(|_| ValidationError::invalid_format("quantity", "must be an integer"))?;

    validate_quantity(i64::from(qty))
}

/// Parses a unit price typed by the operator.
///
/// ## Rules
/// - Required
/// - Decimal with at most two fraction digits
/// - Must be non-negative (zero is allowed: free samples)
///
/// ## Example
/// ```rust
/// use medstore_core::validation::parse_price;
///
/// assert_eq!(parse_price("2.50").unwrap().cents(), 250);
/// assert!(parse_price("-1").is_err());
/// assert!(parse_price("two").is_err());
/// ```
pub fn parse_price(text: &str) -> ValidationResult<Money> {
    let price = Money::parse(text).map_err(|e| match e {
        ParseMoneyError::Empty => ValidationError::required("price"),
        other => ValidationError::invalid_format("price", other.to_string()),
    })?;

    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(price)
}

/// Parses the opening stock of a new medicine.
///
/// ## Rules
/// - Blank means 0
/// - Otherwise a non-negative integer that fits in an `i32`
pub fn parse_opening_stock(text: &str) -> ValidationResult<i64> {
    let text = text.trim();

    if text.is_empty() {
        return Ok(0);
    }

    let stock: i32 = text
        .parse()
        .map_err(|_| ValidationError::invalid_format("stock", "must be an integer"))?;

    if stock < 0 {
        return Err(ValidationError::Negative {
            field: "stock".to_string(),
        });
    }

    Ok(i64::from(stock))
}

// =============================================================================
// Unit Tests
// =============================================================================
