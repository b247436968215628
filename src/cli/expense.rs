//! Expense CLI commands
//!
//! Implements the non-interactive `add`, `list`, `filter` and `summary`
//! commands.

use clap::Args;

use crate::config::Settings;
use crate::display::{format_expense_list, format_summary};
use crate::error::{TrackerError, TrackerResult};
use crate::models::NewExpense;
use crate::services::{ExpenseFilter, Ledger};
use crate::storage::LedgerStore;

/// Filter options; either a category or a complete date range
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Category to match, ignoring case
    #[arg(
        short,
        long,
        conflicts_with_all = ["from", "to"],
        required_unless_present_any = ["from", "to"]
    )]
    pub category: Option<String>,

    /// First date of the range (YYYY-MM-DD)
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// Last date of the range (YYYY-MM-DD)
    #[arg(long, requires = "from")]
    pub to: Option<String>,
}

impl FilterArgs {
    /// Convert the parsed options into a filter, validating the dates
    pub fn to_filter(&self) -> TrackerResult<ExpenseFilter> {
        match (&self.category, &self.from, &self.to) {
            (Some(category), None, None) => Ok(ExpenseFilter::category(category.clone())),
            (None, Some(from), Some(to)) => ExpenseFilter::date_range(from, to),
            _ => Err(TrackerError::Config(
                "filter needs either --category or both --from and --to".into(),
            )),
        }
    }
}

/// Handle the `add` command
pub fn handle_add<S: LedgerStore>(
    ledger: &mut Ledger<S>,
    settings: &Settings,
    input: NewExpense,
) -> TrackerResult<()> {
    let expense = ledger.add(&input)?;

    println!(
        "Added expense: {} - {} - {}",
        expense.date,
        expense.amount.format_with_symbol(&settings.currency_symbol),
        expense.category
    );

    Ok(())
}

/// Handle the `list` command
pub fn handle_list<S: LedgerStore>(ledger: &Ledger<S>, settings: &Settings) -> TrackerResult<()> {
    print!(
        "{}",
        format_expense_list(&ledger.list(), &settings.currency_symbol)
    );
    Ok(())
}

/// Handle the `filter` command
pub fn handle_filter<S: LedgerStore>(
    ledger: &Ledger<S>,
    settings: &Settings,
    args: &FilterArgs,
) -> TrackerResult<()> {
    let filter = args.to_filter()?;
    print!(
        "{}",
        format_expense_list(&ledger.filter(&filter), &settings.currency_symbol)
    );
    Ok(())
}

/// Handle the `summary` command
pub fn handle_summary<S: LedgerStore>(
    ledger: &Ledger<S>,
    settings: &Settings,
) -> TrackerResult<()> {
    let summary = ledger.summary(settings.category_case);
    print!("{}", format_summary(&summary, &settings.currency_symbol));
    Ok(())
}
