//! JSON Export functionality
//!
//! Exports the ledger wrapped in a document that carries schema and app
//! versions plus a few metadata fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Expense, Money, DATE_FORMAT};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Export metadata
    pub metadata: ExportMetadata,

    /// All expenses, in ledger order
    pub expenses: Vec<Expense>,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// Number of expenses
    pub expense_count: usize,

    /// Sum of every amount
    pub overall_total: Money,

    /// Earliest expense date
    pub earliest_expense: Option<String>,

    /// Latest expense date
    pub latest_expense: Option<String>,
}

impl LedgerExport {
    /// Build an export of `expenses`
    pub fn new(expenses: &[Expense]) -> Self {
        let earliest_expense = expenses
            .iter()
            .map(|e| e.date)
            .min()
            .map(|d| d.format(DATE_FORMAT).to_string());

        let latest_expense = expenses
            .iter()
            .map(|e| e.date)
            .max()
            .map(|d| d.format(DATE_FORMAT).to_string());

        let metadata = ExportMetadata {
            expense_count: expenses.len(),
            overall_total: expenses.iter().map(|e| e.amount).sum(),
            earliest_expense,
            latest_expense,
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            metadata,
            expenses: expenses.to_vec(),
        }
    }
}

/// Export the ledger to JSON
pub fn export_full_json<W: Write>(
    expenses: &[Expense],
    writer: &mut W,
    pretty: bool,
) -> TrackerResult<()> {
    let export = LedgerExport::new(expenses);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| TrackerError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewExpense;

    fn sample() -> Vec<Expense> {
        vec![
            NewExpense::new("2024-03-05", "7.25", "Food", "coffee")
                .validate()
                .unwrap(),
            NewExpense::new("2024-03-01", "12.50", "Food", "lunch")
                .validate()
                .unwrap(),
        ]
    }

    #[test]
    fn test_metadata() {
        let export = LedgerExport::new(&sample());

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.expense_count, 2);
        assert_eq!(export.metadata.overall_total, Money::from_cents(1975));
        assert_eq!(export.metadata.earliest_expense.as_deref(), Some("2024-03-01"));
        assert_eq!(export.metadata.latest_expense.as_deref(), Some("2024-03-05"));
    }

    #[test]
    fn test_empty_metadata() {
        let export = LedgerExport::new(&[]);
        assert_eq!(export.metadata.expense_count, 0);
        assert!(export.metadata.earliest_expense.is_none());
    }

    #[test]
    fn test_json_roundtrip() {
        let expenses = sample();
        let mut output = Vec::new();
        export_full_json(&expenses, &mut output, true).unwrap();

        let imported: LedgerExport = serde_json::from_slice(&output).unwrap();
        assert_eq!(imported.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(imported.metadata.expense_count, 2);
        assert_eq!(imported.expenses, expenses);
    }
}
