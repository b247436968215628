//! CLI command handler for CSV import

use std::path::Path;

use crate::error::TrackerResult;
use crate::services::{ImportService, Ledger};
use crate::storage::LedgerStore;

/// Handle the `import` command
pub fn handle_import_command<S: LedgerStore>(
    ledger: &mut Ledger<S>,
    file: &Path,
) -> TrackerResult<()> {
    let result = ImportService::new(ledger).import_file(file)?;

    println!("Imported {} expenses from {}", result.imported, file.display());

    if !result.errors.is_empty() {
        println!("Skipped {} rows:", result.errors.len());
        for error in &result.errors {
            println!("  line {}: {}", error.line, error.message);
        }
    }

    Ok(())
}
