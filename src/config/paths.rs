//! Path management for the expense tracker
//!
//! ## Path Resolution Order
//!
//! 1. An explicit path (the `--file` option)
//! 2. `EXPENSE_TRACKER_FILE` environment variable (if set)
//! 3. `expenses.json` in the working directory
//!
//! The settings file and audit log live next to the ledger file and share
//! its stem: `expenses.json` -> `expenses.config.json`, `expenses.audit.log`.

use std::path::{Path, PathBuf};

/// Environment variable overriding the ledger file location
pub const LEDGER_FILE_ENV: &str = "EXPENSE_TRACKER_FILE";

/// Ledger file used when nothing else is configured
pub const DEFAULT_LEDGER_FILE: &str = "expenses.json";

/// Manages all paths used by the expense tracker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerPaths {
    ledger_file: PathBuf,
}

impl TrackerPaths {
    /// Resolve paths from the environment, falling back to the default file
    pub fn new() -> Self {
        Self::resolve(None)
    }

    /// Resolve paths, preferring an explicit ledger file when given
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        let ledger_file = explicit
            .or_else(|| {
                std::env::var_os(LEDGER_FILE_ENV)
                    .filter(|v| !v.is_empty())
                    .map(PathBuf::from)
            })
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LEDGER_FILE));

        Self { ledger_file }
    }

    /// Use a specific ledger file (useful for testing)
    pub fn with_ledger_file(ledger_file: impl Into<PathBuf>) -> Self {
        Self {
            ledger_file: ledger_file.into(),
        }
    }

    /// Get the path to the ledger file
    pub fn ledger_file(&self) -> &Path {
        &self.ledger_file
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.sibling("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.sibling("audit.log")
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let stem = self
            .ledger_file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "expenses".to_string());
        self.ledger_file
            .with_file_name(format!("{}.{}", stem, suffix))
    }
}

impl Default for TrackerPaths {
    fn default() -> Self {
        Self::new()
    }
}
