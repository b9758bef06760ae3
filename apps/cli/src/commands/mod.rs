//! # Commands Module
//!
//! One module per screen of the store front end.
//!
//! ## Command Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  pub async fn sell(                                                     │
//! │      db: &DbState,            ◄── only the state it needs              │
//! │      config: &ConfigState,                                              │
//! │      args: &SellArgs,         ◄── parsed by clap, validated by core    │
//! │  ) -> Result<Reply, AppError>                                           │
//! │                                                                         │
//! │  Reply { text, json }  ──► lib.rs prints one of them (--json)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Commands
//! - [`auth`] - login, user add
//! - [`medicine`] - medicine add
//! - [`stock`] - stock add, stock list
//! - [`sale`] - sell
//! - [`bills`] - bill ledger
//! - [`settings`] - db test, db status

pub mod auth;
pub mod bills;
pub mod medicine;
pub mod sale;
pub mod settings;
pub mod stock;

use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;

/// What a successful command hands back for printing.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// Human-readable output
    pub text: String,

    /// Machine-readable output for `--json`
    pub json: Value,
}

impl Reply {
    /// Builds a reply from display text and any serializable payload.
    pub fn new(text: impl Into<String>, data: &impl Serialize) -> Result<Self, AppError> {
        let json = serde_json::to_value(data)
            .map_err(|e| AppError::internal(format!("Failed to serialize reply: {}", e)))?;

        Ok(Reply {
            text: text.into(),
            json,
        })
    }
}
