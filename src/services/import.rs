//! CSV Import service
//!
//! Reads expenses from a CSV file with a header row. The `date` and `amount`
//! columns are required; `category` and `description` are optional. Header
//! names are matched case-insensitively after trimming, so files written by
//! older tools with a `date, amount, category, description ` header import
//! fine. Field values are not trimmed here: date and amount are trimmed by
//! validation, category and description are kept as written. Every row is
//! validated like a manual add; valid rows go into the ledger with a single
//! save and invalid rows are reported by line number.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Expense, NewExpense};
use crate::services::Ledger;
use crate::storage::LedgerStore;

/// Column positions found in the CSV header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub date_column: usize,
    pub amount_column: usize,
    pub category_column: Option<usize>,
    pub description_column: Option<usize>,
}

impl ColumnMapping {
    /// Detect column mapping from the CSV header record
    pub fn from_headers(headers: &StringRecord) -> TrackerResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        let date_column = find("date")
            .ok_or_else(|| TrackerError::Import("CSV header has no 'date' column".into()))?;
        let amount_column = find("amount")
            .ok_or_else(|| TrackerError::Import("CSV header has no 'amount' column".into()))?;

        Ok(Self {
            date_column,
            amount_column,
            category_column: find("category"),
            description_column: find("description"),
        })
    }

    fn new_expense(&self, record: &StringRecord) -> NewExpense {
        let field = |column: Option<usize>| {
            column
                .and_then(|c| record.get(c))
                .unwrap_or_default()
                .to_string()
        };

        NewExpense::new(
            field(Some(self.date_column)),
            field(Some(self.amount_column)),
            field(self.category_column),
            field(self.description_column),
        )
    }
}

/// A CSV row that could not be imported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// Line number in the file (the header is line 1)
    pub line: u64,
    pub message: String,
}

/// Result of a completed import
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// Number of expenses imported
    pub imported: usize,
    /// Rows that were skipped, in file order
    pub errors: Vec<RowError>,
}

/// Parse CSV content into validated expenses and per-row errors
pub fn parse_csv<R: Read>(reader: R) -> TrackerResult<(Vec<Expense>, Vec<RowError>)> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| TrackerError::Import(format!("Failed to read CSV header: {}", e)))?
        .clone();
    let mapping = ColumnMapping::from_headers(&headers)?;

    let mut expenses = Vec::new();
    let mut errors = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let fallback_line = idx as u64 + 2;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(fallback_line);
                errors.push(RowError {
                    line,
                    message: format!("Error reading CSV record: {}", e),
                });
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(fallback_line);

        match mapping.new_expense(&record).validate() {
            Ok(expense) => expenses.push(expense),
            Err(e) => errors.push(RowError {
                line,
                message: e.to_string(),
            }),
        }
    }

    Ok((expenses, errors))
}

/// Service for CSV import
pub struct ImportService<'a, S: LedgerStore> {
    ledger: &'a mut Ledger<S>,
}

impl<'a, S: LedgerStore> ImportService<'a, S> {
    /// Create a new import service
    pub fn new(ledger: &'a mut Ledger<S>) -> Self {
        Self { ledger }
    }

    /// Import CSV content into the ledger
    pub fn import<R: Read>(&mut self, reader: R) -> TrackerResult<ImportResult> {
        let (expenses, errors) = parse_csv(reader)?;

        for error in &errors {
            tracing::warn!(line = error.line, error = %error.message, "skipped CSV row");
        }

        let imported = self.ledger.append_many(expenses)?;
        tracing::info!(imported, skipped = errors.len(), "CSV import finished");

        Ok(ImportResult { imported, errors })
    }

    /// Import a CSV file into the ledger
    pub fn import_file(&mut self, path: &Path) -> TrackerResult<ImportResult> {
        let file = File::open(path).map_err(|e| {
            TrackerError::Import(format!("Failed to open {}: {}", path.display(), e))
        })?;
        self.import(file)
    }
}
