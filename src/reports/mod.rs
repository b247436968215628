//! Reports module for the expense tracker
//!
//! Aggregations computed over the ledger. Reports only read records; they
//! never touch storage.

pub mod summary;

pub use summary::{CategoryTotal, Summary};
