//! Expense repositories
//!
//! `JsonLedgerStore` keeps the ledger in a single JSON file holding an array
//! of expense objects. `MemoryLedgerStore` keeps it in memory and can be told
//! to fail its saves.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

use crate::error::{TrackerError, TrackerResult};
use crate::models::Expense;

use super::file_io::{read_json, write_json_atomic};
use super::LedgerStore;

/// File-backed ledger storage
///
/// Unknown fields on stored records are accepted on load and dropped on the
/// next save.
#[derive(Debug, Clone)]
pub struct JsonLedgerStore {
    path: PathBuf,
}

impl JsonLedgerStore {
    /// Create a store for the given ledger file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the ledger file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for JsonLedgerStore {
    fn load(&self) -> TrackerResult<Vec<Expense>> {
        let records: Vec<Expense> = read_json(&self.path)?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "loaded ledger");
        Ok(records)
    }

    fn save(&self, records: &[Expense]) -> TrackerResult<()> {
        write_json_atomic(&self.path, records)?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "saved ledger");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory ledger storage
#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    records: RefCell<Vec<Expense>>,
    fail_saves: Cell<bool>,
    save_count: Cell<usize>,
}

impl MemoryLedgerStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `records`
    pub fn with_records(records: Vec<Expense>) -> Self {
        Self {
            records: RefCell::new(records),
            ..Self::default()
        }
    }

    /// Make every following save fail with `StorageWrite`
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.save_count.get()
    }

    /// Snapshot of what is currently "persisted"
    pub fn stored(&self) -> Vec<Expense> {
        self.records.borrow().clone()
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn load(&self) -> TrackerResult<Vec<Expense>> {
        Ok(self.records.borrow().clone())
    }

    fn save(&self, records: &[Expense]) -> TrackerResult<()> {
        if self.fail_saves.get() {
            return Err(TrackerError::storage_write(
                Path::new(":memory:"),
                "simulated write failure",
            ));
        }
        *self.records.borrow_mut() = records.to_vec();
        self.save_count.set(self.save_count.get() + 1);
        Ok(())
    }

    fn describe(&self) -> String {
        ":memory:".to_string()
    }
}
