//! # Configuration State
//!
//! Display settings loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`MEDSTORE_*`)
//! 2. Defaults (this file)
//!
//! Read-only after initialization.

use medstore_core::Money;
use serde::{Deserialize, Serialize};

/// Front-end configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name (printed above receipts)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            store_name: "MedStore".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `MEDSTORE_STORE_NAME`: Override store name
    /// - `MEDSTORE_CURRENCY_SYMBOL`: Override currency symbol (e.g. "Rs ")
    pub fn from_env() -> Self {
        let mut config = ConfigState::default();

        if let Ok(store_name) = std::env::var("MEDSTORE_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(symbol) = std::env::var("MEDSTORE_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        config
    }

    /// Formats an amount with the configured symbol.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        if amount.is_negative() {
            format!("-{}{}", self.currency_symbol, Money::from_cents(-amount.cents()))
        } else {
            format!("{}{}", self.currency_symbol, amount)
        }
    }
}
