//! Core data models for the expense tracker
//!
//! This module contains the data structures of the ledger: the expense record
//! itself and the money amount it carries.

pub mod expense;
pub mod money;

pub use expense::{parse_amount, parse_date, Expense, NewExpense, DATE_FORMAT};
pub use money::{Money, MoneyParseError};
