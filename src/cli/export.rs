//! CLI command for data export
//!
//! Writes the ledger to a file as CSV, JSON or YAML.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;

use crate::error::{TrackerError, TrackerResult};
use crate::export::{export_expenses_csv, export_full_json, export_full_yaml};
use crate::models::Expense;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV format, readable by `import`
    Csv,
    /// JSON format with export metadata
    Json,
    /// YAML format with export metadata, human-readable
    Yaml,
}

/// Handle the `export` command
pub fn handle_export_command(
    expenses: &[Expense],
    output: &Path,
    format: ExportFormat,
    pretty: bool,
) -> TrackerResult<()> {
    let file = File::create(output).map_err(|e| {
        TrackerError::Export(format!(
            "Failed to create file {}: {}",
            output.display(),
            e
        ))
    })?;
    let mut writer = BufWriter::new(file);

    match format {
        ExportFormat::Csv => {
            export_expenses_csv(&mut writer, expenses)?;
        }
        ExportFormat::Json => export_full_json(expenses, &mut writer, pretty)?,
        ExportFormat::Yaml => export_full_yaml(expenses, &mut writer)?,
    }

    writer
        .flush()
        .map_err(|e| TrackerError::Export(e.to_string()))?;

    tracing::info!(path = %output.display(), ?format, count = expenses.len(), "exported ledger");
    println!(
        "Exported {} expenses to: {}",
        expenses.len(),
        output.display()
    );

    Ok(())
}
