//! # State Module
//!
//! State handed to every command.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────────────────────┐      ┌──────────────────────────┐        │
//! │  │        DbState           │      │       ConfigState        │        │
//! │  │                          │      │                          │        │
//! │  │  ConnectionProvider      │      │  store_name              │        │
//! │  │  (lazy pool, settings)   │      │  currency_symbol         │        │
//! │  └──────────────────────────┘      └──────────────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands take only the state they need.

pub mod config;
pub mod db;

pub use config::ConfigState;
pub use db::DbState;
