//! CSV Export functionality
//!
//! Writes the ledger as `date,amount,category,description` rows with
//! two-decimal amounts. The output can be read back by the CSV importer.

use std::io::Write;

use serde::Serialize;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Expense, DATE_FORMAT};

#[derive(Serialize)]
struct CsvRow<'a> {
    date: String,
    amount: String,
    category: &'a str,
    description: &'a str,
}

/// Export expenses to CSV
pub fn export_expenses_csv<'a, W, I>(writer: W, expenses: I) -> TrackerResult<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Expense>,
{
    let mut csv_writer = ::csv::Writer::from_writer(writer);
    let mut count = 0;

    for expense in expenses {
        csv_writer
            .serialize(CsvRow {
                date: expense.date.format(DATE_FORMAT).to_string(),
                amount: expense.amount.to_decimal_string(),
                category: &expense.category,
                description: &expense.description,
            })
            .map_err(|e| TrackerError::Export(e.to_string()))?;
        count += 1;
    }

    // serialize() only emits the header with the first row
    if count == 0 {
        csv_writer
            .write_record(["date", "amount", "category", "description"])
            .map_err(|e| TrackerError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| TrackerError::Export(e.to_string()))?;

    Ok(count)
}
