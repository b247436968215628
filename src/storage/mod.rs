//! Storage layer for the expense tracker
//!
//! The ledger is always loaded and saved whole. Business logic only sees the
//! `LedgerStore` trait; the JSON file store is one implementation of it.

pub mod expenses;
pub mod file_io;

pub use expenses::{JsonLedgerStore, MemoryLedgerStore};
pub use file_io::{read_json, write_json_atomic};

use crate::error::TrackerResult;
use crate::models::Expense;

/// Whole-ledger persistence
pub trait LedgerStore {
    /// Load every record; an absent ledger is empty, not an error
    fn load(&self) -> TrackerResult<Vec<Expense>>;

    /// Replace the persisted ledger with `records`
    fn save(&self, records: &[Expense]) -> TrackerResult<()>;

    /// Human-readable location, for messages
    fn describe(&self) -> String;
}

impl<S: LedgerStore + ?Sized> LedgerStore for &S {
    fn load(&self) -> TrackerResult<Vec<Expense>> {
        (**self).load()
    }

    fn save(&self, records: &[Expense]) -> TrackerResult<()> {
        (**self).save(records)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
