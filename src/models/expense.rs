//! Expense model
//!
//! An expense is one dated, categorized amount. Records are immutable once
//! appended to the ledger; `NewExpense` carries raw user input until it has
//! been validated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::{Money, MoneyParseError};
use crate::error::{TrackerError, TrackerResult};

/// The only accepted date layout, on input and on disk
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single expense record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Day the money was spent
    #[serde(with = "iso_date")]
    pub date: NaiveDate,

    /// Amount spent
    pub amount: Money,

    /// Free-text category label, kept exactly as entered
    pub category: String,

    /// Free-text description
    pub description: String,
}

impl Expense {
    /// Create an expense from already-validated parts
    pub fn new(
        date: NaiveDate,
        amount: Money,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date,
            amount,
            category: category.into(),
            description: description.into(),
        }
    }

    /// Case-insensitive exact category match
    pub fn matches_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }

    /// Whether the date falls within `start..=end`
    pub fn in_range(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.date && self.date <= end
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - {} - {}",
            self.date.format(DATE_FORMAT),
            self.amount,
            self.category,
            self.description
        )
    }
}

/// Raw input for a new expense, as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewExpense {
    pub date: String,
    pub amount: String,
    pub category: String,
    pub description: String,
}

impl NewExpense {
    pub fn new(
        date: impl Into<String>,
        amount: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            amount: amount.into(),
            category: category.into(),
            description: description.into(),
        }
    }

    /// Validate the input and build the record
    ///
    /// Negative amounts are rejected; zero is allowed.
    pub fn validate(&self) -> TrackerResult<Expense> {
        let date = parse_date(&self.date)?;
        let amount = parse_amount(&self.amount)?;

        Ok(Expense::new(
            date,
            amount,
            self.category.clone(),
            self.description.clone(),
        ))
    }
}

/// Parse a strict `YYYY-MM-DD` date
///
/// Requires a four-digit year and two-digit month and day, and rejects
/// impossible dates such as `2024-02-30`.
pub fn parse_date(input: &str) -> TrackerResult<NaiveDate> {
    let input = input.trim();
    parse_date_strict(input).ok_or_else(|| {
        TrackerError::invalid_date(format!("'{}' is not a valid YYYY-MM-DD date", input))
    })
}

fn parse_date_strict(input: &str) -> Option<NaiveDate> {
    let bytes = input.as_bytes();
    if bytes.len() != 10 {
        return None;
    }
    let shape_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT).ok()
}

/// Parse a non-negative amount
pub fn parse_amount(input: &str) -> TrackerResult<Money> {
    let amount = Money::parse(input).map_err(|e| match e {
        MoneyParseError::InvalidFormat(_) => TrackerError::invalid_amount(format!(
            "{}. Use a number like '12.50'",
            e
        )),
        MoneyParseError::TooPrecise(_) | MoneyParseError::OutOfRange(_) => {
            TrackerError::invalid_amount(e.to_string())
        }
    })?;

    if amount.is_negative() {
        return Err(TrackerError::invalid_amount(format!(
            "'{}' is negative; expenses must be zero or more",
            input.trim()
        )));
    }

    Ok(amount)
}

mod iso_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::{parse_date_strict, DATE_FORMAT};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_date_strict(&raw).ok_or_else(|| {
            de::Error::custom(format!("invalid date '{}', expected YYYY-MM-DD", raw))
        })
    }
}
