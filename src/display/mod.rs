//! Display formatting for terminal output
//!
//! Turns listings and summaries into the text shown by the menu and the
//! subcommands. Nothing here prints; callers decide where the text goes.

pub mod expense;
pub mod report;

pub use expense::{format_expense_list, format_expense_row};
pub use report::{format_summary, separator};
