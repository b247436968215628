//! Service layer for the expense tracker
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, persist-or-fail mutation, and queries.

pub mod import;
pub mod ledger;

pub use import::{parse_csv, ColumnMapping, ImportResult, ImportService, RowError};
pub use ledger::{ExpenseFilter, Ledger, Listing};
