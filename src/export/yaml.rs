//! YAML Export functionality
//!
//! Exports the ledger to YAML format for a human-readable backup.

use crate::error::{TrackerError, TrackerResult};
use crate::export::json::LedgerExport;
use crate::models::Expense;
use std::io::Write;

/// Export the ledger to YAML format
pub fn export_full_yaml<W: Write>(expenses: &[Expense], writer: &mut W) -> TrackerResult<()> {
    let export = LedgerExport::new(expenses);

    write!(
        writer,
        "# Expense ledger export\n# Generated: {}\n# App Version: {}\n\n",
        export.exported_at, export.app_version
    )
    .map_err(|e| TrackerError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| TrackerError::Export(e.to_string()))?;

    Ok(())
}
