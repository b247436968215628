//! Export module for the expense tracker
//!
//! Provides ledger export in multiple formats:
//! - CSV: spreadsheet-compatible, and readable by the CSV importer
//! - JSON: machine-readable export with metadata
//! - YAML: human-readable export with metadata

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_expenses_csv;
pub use self::json::{export_full_json, LedgerExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::export_full_yaml;
