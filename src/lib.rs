//! Expense Tracker - a small personal expense ledger for the terminal
//!
//! This library provides the core functionality behind the `expenses`
//! binary: an append-only list of dated, categorised expenses persisted to
//! a single JSON file, with listing, filtering and summary views.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, money)
//! - `storage`: The `LedgerStore` seam and its JSON file implementation
//! - `services`: The ledger itself and CSV import
//! - `reports`: Summary totals
//! - `audit`: Append-only audit log
//! - `export`: CSV, JSON and YAML export
//! - `display`: Text formatting for terminal output
//! - `cli`: Command handlers and the interactive menu
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::models::NewExpense;
//! use expense_tracker::services::Ledger;
//! use expense_tracker::storage::JsonLedgerStore;
//!
//! let mut ledger = Ledger::open(JsonLedgerStore::new("expenses.json"))?;
//! ledger.add(&NewExpense::new("2024-03-01", "12.50", "Food", "lunch"))?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::TrackerError;
