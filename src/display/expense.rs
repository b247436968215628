//! Expense display formatting

use crate::models::{Expense, DATE_FORMAT};
use crate::services::Listing;

/// Message shown for an empty listing
pub const EMPTY_LISTING: &str = "No expenses recorded.";

/// Format one expense as a numbered list row
///
/// `1. 2024-03-01 - $12.50 - Food - lunch`
pub fn format_expense_row(position: usize, expense: &Expense, symbol: &str) -> String {
    format!(
        "{}. {} - {} - {} - {}",
        position,
        expense.date.format(DATE_FORMAT),
        expense.amount.format_with_symbol(symbol),
        expense.category,
        expense.description
    )
}

/// Format a listing, one row per line
pub fn format_expense_list(listing: &Listing<'_>, symbol: &str) -> String {
    if listing.is_empty() {
        return format!("{}\n", EMPTY_LISTING);
    }

    let mut output = String::new();
    for (position, expense) in listing.iter() {
        output.push_str(&format_expense_row(position, expense, symbol));
        output.push('\n');
    }
    output
}
