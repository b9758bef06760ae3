//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With doubles:                                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    2.55 * 3  = 7.6499999999999995   ❌ WRONG on a bill!                 │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units                                      │
//! │    255 * 3 = 765  → printed as 7.65                                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices typed into the store forms ("2.50") are parsed straight into
//! minor units; no float ever sits between the keyboard and the ledger.
//!
//! ## Usage
//! ```rust
//! use medstore_core::money::Money;
//!
//! let price: Money = "2.50".parse().unwrap();
//! assert_eq!(price.cents(), 250);
//!
//! let total = price.checked_multiply_quantity(10).unwrap();
//! assert_eq!(total.to_string(), "25.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents, paise, ...).
///
/// ## Design Decisions
/// - **i64 (signed)**: totals and differences may go negative in reports
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serializes as a plain integer** of minor units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use medstore_core::money::Money;
    ///
    /// let price = Money::from_cents(250); // 2.50
    /// assert_eq!(price.cents(), 250);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity, `None` on overflow.
    ///
    /// ## User Workflow
    /// ```text
    /// Medicine: Paracetamol 2.50
    /// Quantity: 10
    ///      │
    ///      ▼
    /// checked_multiply_quantity(10) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Bill total: 25.00
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Error returned when a decimal amount cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoneyError {
    #[error("amount is empty")]
    Empty,

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("at most 2 decimal places are allowed")]
    TooPrecise,

    #[error("amount is too large")]
    Overflow,
}

/// Parses decimal text like `"2.5"`, `"2.50"`, `"12"` or `"-0.75"`.
impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseMoneyError::Empty);
        }

        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };

        let (whole, frac) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };

        let is_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !is_digits(whole) || !is_digits(frac) {
            return Err(ParseMoneyError::NotANumber(s.to_string()));
        }
        if frac.len() > 2 {
            return Err(ParseMoneyError::TooPrecise);
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| ParseMoneyError::Overflow)?
        };
        // "2.5" means 50 minor units, not 5
        let minor: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| ParseMoneyError::Overflow)? * 10,
            _ => frac.parse().map_err(|_| ParseMoneyError::Overflow)?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or(ParseMoneyError::Overflow)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

impl Money {
    /// Convenience wrapper around [`FromStr`].
    pub fn parse(s: &str) -> Result<Self, ParseMoneyError> {
        s.parse()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount with two decimals and no currency symbol.
///
/// The front end prefixes the configured symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
