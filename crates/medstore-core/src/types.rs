//! # Domain Types
//!
//! Core domain types used throughout MedStore.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Medicine     │   │      Bill       │   │   SaleRequest   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (integer)   │   │  id (integer)   │   │  name           │       │
//! │  │  name (lookup)  │   │  medicine_name  │   │  quantity > 0   │       │
//! │  │  company        │   │  quantity       │   └────────┬────────┘       │
//! │  │  price_cents    │   │  total_cents    │            │ processed      │
//! │  │  stock >= 0     │   │  created_at     │            ▼                │
//! │  └─────────────────┘   └─────────────────┘   ┌─────────────────┐       │
//! │                                              │   SaleReceipt   │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A bill copies the medicine name and the computed total at sale time.
//! Later price changes or renames never rewrite history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::validation;

// =============================================================================
// Medicine
// =============================================================================

/// One stocked product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Medicine {
    /// Store-assigned identifier, immutable.
    pub id: i64,

    /// Human-facing lookup key used by sales and restocking.
    pub name: String,

    /// Manufacturer, free text.
    pub company: String,

    /// Unit price in minor units.
    pub price_cents: i64,

    /// Quantity on hand. Never negative.
    pub stock: i64,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Medicine {
    /// Returns the unit price as Money.
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// A medicine about to be inserted (no id yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMedicine {
    pub name: String,
    pub company: String,
    pub price: Money,
    pub stock: i64,
}

impl NewMedicine {
    /// Builds a new medicine from the raw Add-Medicine form fields.
    ///
    /// ## Rules
    /// - `name` and `price` are required
    /// - `company` may be blank
    /// - `stock` may be blank (opening stock 0)
    ///
    /// ## Example
    /// ```rust
    /// use medstore_core::types::NewMedicine;
    ///
    /// let med = NewMedicine::parse("Paracetamol", "GSK", "2.50", "").unwrap();
    /// assert_eq!(med.price.cents(), 250);
    /// assert_eq!(med.stock, 0);
    /// ```
    pub fn parse(
        name: &str,
        company: &str,
        price_text: &str,
        stock_text: &str,
    ) -> ValidationResult<Self> {
        Ok(NewMedicine {
            name: validation::validate_medicine_name(name)?,
            company: validation::validate_company(company)?,
            price: validation::parse_price(price_text)?,
            stock: validation::parse_opening_stock(stock_text)?,
        })
    }
}

// =============================================================================
// Bill
// =============================================================================

/// Immutable record of one completed sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Bill {
    pub id: i64,

    /// Name looked up at sale time (denormalized copy, not a foreign key).
    pub medicine_name: String,

    /// Units sold, always positive.
    pub quantity: i64,

    /// `price * quantity` at the time of sale, in minor units.
    pub total_cents: i64,

    pub created_at: DateTime<Utc>,
}

impl Bill {
    /// Returns the bill total as Money.
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A validated "sell N units of medicine X" request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRequest {
    /// Trimmed medicine name, never empty.
    pub name: String,

    /// Strictly positive quantity.
    pub quantity: i64,
}

impl SaleRequest {
    /// Validates a request whose quantity is already an integer.
    pub fn new(name: &str, quantity: i64) -> ValidationResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::required("name"));
        }

        Ok(SaleRequest {
            name: name.to_string(),
            quantity: validation::validate_quantity(quantity)?,
        })
    }

    /// Validates a request straight from the billing form's text fields.
    ///
    /// ## Example
    /// ```rust
    /// use medstore_core::types::SaleRequest;
    ///
    /// assert!(SaleRequest::parse("Paracetamol", "10").is_ok());
    /// assert!(SaleRequest::parse("Paracetamol", "-3").is_err());
    /// assert!(SaleRequest::parse("", "10").is_err());
    /// ```
    pub fn parse(name: &str, quantity: &str) -> ValidationResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::required("name"));
        }

        Ok(SaleRequest {
            name: name.to_string(),
            quantity: validation::parse_quantity(quantity)?,
        })
    }

    /// Computes the bill total for this request at `unit_price`.
    pub fn total_at(&self, unit_price: Money) -> ValidationResult<Money> {
        unit_price
            .checked_multiply_quantity(self.quantity)
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "total".to_string(),
                min: 0,
                max: i64::MAX,
            })
    }
}

/// What a successful sale hands back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleReceipt {
    /// Id of the appended bill row.
    pub bill_id: i64,

    pub medicine_id: i64,

    pub medicine_name: String,

    pub quantity: i64,

    /// Price snapshot read before the transaction opened.
    pub unit_price: Money,

    /// `unit_price * quantity`.
    pub total: Money,

    /// Stock left after the deduction.
    pub remaining_stock: i64,

    pub sold_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn paracetamol() -> Medicine {
        let now = Utc::now();
        Medicine {
            id: 1,
            name: "Paracetamol".to_string(),
            company: "GSK".to_string(),
            price_cents: 250,
            stock: 100,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_medicine_price() {
        let med = paracetamol();
        assert_eq!(med.price(), Money::from_cents(250));
    }

    #[test]
    fn test_new_medicine_parse() {
        let med = NewMedicine::parse(" Ibuprofen ", "", "1.2", "40").unwrap();
        assert_eq!(med.name, "Ibuprofen");
        assert_eq!(med.company, "");
        assert_eq!(med.price, Money::from_cents(120));
        assert_eq!(med.stock, 40);

        assert_eq!(
            NewMedicine::parse("", "x", "1", "1"),
            Err(ValidationError::required("name"))
        );
        assert_eq!(
            NewMedicine::parse("Ibuprofen", "x", "", "1"),
            Err(ValidationError::required("price"))
        );
        assert!(NewMedicine::parse("Ibuprofen", "x", "1", "-5").is_err());
    }

    #[test]
    fn test_sale_request_parse() {
        let req = SaleRequest::parse("  Paracetamol ", " 10 ").unwrap();
        assert_eq!(req.name, "Paracetamol");
        assert_eq!(req.quantity, 10);

        assert_eq!(
            SaleRequest::parse(" ", "10"),
            Err(ValidationError::required("name"))
        );
        assert_eq!(
            SaleRequest::parse("Paracetamol", ""),
            Err(ValidationError::required("quantity"))
        );
        assert_eq!(
            SaleRequest::parse("Paracetamol", "-3"),
            Err(ValidationError::MustBePositive {
                field: "quantity".to_string()
            })
        );
    }

    #[test]
    fn test_sale_request_new_rejects_non_positive() {
        assert!(SaleRequest::new("Paracetamol", 0).is_err());
        assert!(SaleRequest::new("Paracetamol", -1).is_err());
        assert!(SaleRequest::new("Paracetamol", 1).is_ok());
    }

    #[test]
    fn test_total_at() {
        let req = SaleRequest::new("Paracetamol", 10).unwrap();
        assert_eq!(req.total_at(Money::from_cents(250)), Ok(Money::from_cents(2500)));

        let req = SaleRequest::new("Paracetamol", i64::MAX).unwrap();
        assert!(req.total_at(Money::from_cents(250)).is_err());
    }

    #[test]
    fn test_bill_total() {
        let bill = Bill {
            id: 1,
            medicine_name: "Paracetamol".to_string(),
            quantity: 10,
            total_cents: 2500,
            created_at: Utc::now(),
        };
        assert_eq!(bill.total().to_string(), "25.00");
    }
}
