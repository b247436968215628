//! Ledger service
//!
//! Owns the in-memory ledger for the process lifetime and provides the
//! append, list, filter and summary operations on top of a `LedgerStore`.
//! Mutations are persist-or-fail: the store is written first and the
//! in-memory ledger is only updated once that write has succeeded.

use chrono::NaiveDate;

use crate::audit::{AuditEntry, AuditLogger, Operation};
use crate::config::CategoryCase;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{parse_date, Expense, Money, NewExpense};
use crate::reports::Summary;
use crate::storage::LedgerStore;

/// Selection criteria for a filter query; one mode per query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseFilter {
    /// Case-insensitive exact match on the category
    Category(String),
    /// Inclusive date range; empty when `start > end`
    DateRange { start: NaiveDate, end: NaiveDate },
}

impl ExpenseFilter {
    /// Filter by category
    pub fn category(name: impl Into<String>) -> Self {
        Self::Category(name.into())
    }

    /// Filter by date range, validating both bounds
    pub fn date_range(start: &str, end: &str) -> TrackerResult<Self> {
        Ok(Self::DateRange {
            start: parse_date(start)?,
            end: parse_date(end)?,
        })
    }

    /// Check whether a record is selected by this filter
    pub fn matches(&self, expense: &Expense) -> bool {
        match self {
            Self::Category(name) => expense.matches_category(name),
            Self::DateRange { start, end } => expense.in_range(*start, *end),
        }
    }
}

/// A read-only view over a selection of ledger records, in ledger order
///
/// `iter` can be called any number of times; each call starts over.
#[derive(Debug, Clone)]
pub struct Listing<'a> {
    records: Vec<&'a Expense>,
}

impl<'a> Listing<'a> {
    fn new(records: Vec<&'a Expense>) -> Self {
        Self { records }
    }

    /// Records with their 1-based display position
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'a Expense)> + '_ {
        self.records.iter().enumerate().map(|(i, e)| (i + 1, *e))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The selected records, without positions
    pub fn records(&self) -> &[&'a Expense] {
        &self.records
    }
}

/// The expense ledger
pub struct Ledger<S: LedgerStore> {
    store: S,
    records: Vec<Expense>,
    audit: Option<AuditLogger>,
}

impl<S: LedgerStore> Ledger<S> {
    /// Load the ledger from its store
    pub fn open(store: S) -> TrackerResult<Self> {
        let records = store.load()?;
        tracing::info!(
            store = %store.describe(),
            count = records.len(),
            "opened ledger"
        );
        Ok(Self {
            store,
            records,
            audit: None,
        })
    }

    /// Record every successful append in `logger`
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// The backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// All records in insertion order
    pub fn records(&self) -> &[Expense] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Validate and append one expense, persisting the whole ledger
    ///
    /// On a validation or write error the ledger is left unchanged.
    pub fn add(&mut self, input: &NewExpense) -> TrackerResult<&Expense> {
        let expense = input.validate().map_err(|e| {
            tracing::warn!(error = %e, "rejected expense");
            e
        })?;

        self.commit(vec![expense], Operation::Create)?;

        let last = self.records.len() - 1;
        Ok(&self.records[last])
    }

    /// Append already-validated expenses with a single save
    ///
    /// Returns the number of records appended.
    pub fn append_many(&mut self, expenses: Vec<Expense>) -> TrackerResult<usize> {
        if expenses.is_empty() {
            return Ok(0);
        }
        let count = expenses.len();
        self.commit(expenses, Operation::Import)?;
        Ok(count)
    }

    fn commit(&mut self, new_records: Vec<Expense>, operation: Operation) -> TrackerResult<()> {
        let total = self
            .records
            .iter()
            .chain(&new_records)
            .try_fold(Money::zero(), |total, e| total.checked_add(e.amount));
        if total.is_none() {
            let err = TrackerError::invalid_amount(format!(
                "the ledger total would exceed {}",
                Money::max()
            ));
            tracing::warn!(error = %err, "rejected expense");
            return Err(err);
        }

        let first_position = self.records.len() + 1;

        let mut candidate = Vec::with_capacity(self.records.len() + new_records.len());
        candidate.extend_from_slice(&self.records);
        candidate.extend(new_records);

        self.store.save(&candidate).map_err(|e| {
            tracing::warn!(error = %e, "ledger not updated");
            e
        })?;
        self.records = candidate;

        self.write_audit(operation, first_position);
        Ok(())
    }

    fn write_audit(&self, operation: Operation, first_position: usize) {
        let Some(logger) = &self.audit else {
            return;
        };

        let entries: Vec<AuditEntry> = self.records[first_position - 1..]
            .iter()
            .enumerate()
            .map(|(i, e)| AuditEntry::new(operation, first_position + i, e))
            .collect();

        if let Err(e) = logger.log_batch(&entries) {
            tracing::warn!(
                path = %logger.path().display(),
                error = %e,
                "failed to write audit log"
            );
        }
    }

    /// View every record in ledger order
    pub fn list(&self) -> Listing<'_> {
        Listing::new(self.records.iter().collect())
    }

    /// View the records selected by `filter`, in ledger order
    pub fn filter(&self, filter: &ExpenseFilter) -> Listing<'_> {
        Listing::new(self.records.iter().filter(|e| filter.matches(e)).collect())
    }

    /// Records whose category matches `category`, ignoring case
    pub fn filter_by_category(&self, category: &str) -> Listing<'_> {
        self.filter(&ExpenseFilter::category(category))
    }

    /// Records dated within `start..=end`
    ///
    /// Both bounds must be valid `YYYY-MM-DD` dates.
    pub fn filter_by_date_range(&self, start: &str, end: &str) -> TrackerResult<Listing<'_>> {
        let filter = ExpenseFilter::date_range(start, end)?;
        Ok(self.filter(&filter))
    }

    /// Overall and per-category totals
    pub fn summary(&self, case: CategoryCase) -> Summary {
        Summary::compute(&self.records, case)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{TrackerError, ValidationKind};
    use crate::models::Money;
    use crate::storage::{JsonLedgerStore, MemoryLedgerStore};
    use tempfile::TempDir;

    fn empty_ledger() -> Ledger<MemoryLedgerStore> {
        Ledger::open(MemoryLedgerStore::new()).unwrap()
    }

    fn add(
        ledger: &mut Ledger<impl LedgerStore>,
        date: &str,
        amount: &str,
        category: &str,
        description: &str,
    ) {
        ledger
            .add(&NewExpense::new(date, amount, category, description))
            .unwrap();
    }

    fn descriptions(listing: &Listing<'_>) -> Vec<String> {
        listing.iter().map(|(_, e)| e.description.clone()).collect()
    }

    #[test]
    fn test_add_persists_whole_ledger() {
        let mut ledger = empty_ledger();
        add(&mut ledger, "2024-03-01", "12.50", "Food", "lunch");
        add(&mut ledger, "2024-03-05", "7.25", "Food", "coffee");

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.store().save_count(), 2);
        assert_eq!(ledger.store().stored(), ledger.records());
    }

    #[test]
    fn test_add_returns_new_record() {
        let mut ledger = empty_ledger();
        let added = ledger
            .add(&NewExpense::new("2024-03-01", "12.50", "Food", "lunch"))
            .unwrap();
        assert_eq!(added.amount, Money::from_cents(1250));
    }

    #[test]
    fn test_add_invalid_date_leaves_ledger_untouched() {
        let mut ledger = empty_ledger();
        add(&mut ledger, "2024-03-01", "1", "Food", "");

        let err = ledger
            .add(&NewExpense::new("2024-13-40", "5", "Food", "bad"))
            .unwrap_err();

        assert_eq!(err.validation_kind(), Some(ValidationKind::InvalidDate));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.store().save_count(), 1);
    }

    #[test]
    fn test_add_invalid_amount() {
        let mut ledger = empty_ledger();
        for amount in ["abc", "-1", ""] {
            let err = ledger
                .add(&NewExpense::new("2024-03-01", amount, "Food", ""))
                .unwrap_err();
            assert_eq!(err.validation_kind(), Some(ValidationKind::InvalidAmount));
        }
        assert!(ledger.is_empty());
        assert_eq!(ledger.store().save_count(), 0);
    }

    #[test]
    fn test_add_zero_amount_allowed() {
        let mut ledger = empty_ledger();
        add(&mut ledger, "2024-03-01", "0", "Gift", "free sample");
        assert_eq!(ledger.records()[0].amount, Money::zero());
    }

    #[test]
    fn test_failed_save_does_not_commit() {
        let mut ledger = empty_ledger();
        add(&mut ledger, "2024-03-01", "1", "Food", "kept");

        ledger.store().set_fail_saves(true);
        let err = ledger
            .add(&NewExpense::new("2024-03-02", "2", "Food", "lost"))
            .unwrap_err();

        assert!(matches!(err, TrackerError::StorageWrite { .. }));
        assert_eq!(ledger.len(), 1);
        assert_eq!(descriptions(&ledger.list()), vec!["kept"]);

        ledger.store().set_fail_saves(false);
        add(&mut ledger, "2024-03-02", "2", "Food", "retried");
        assert_eq!(ledger.store().stored().len(), 2);
    }

    #[test]
    fn test_open_existing_records() {
        let existing = NewExpense::new("2024-01-01", "3", "Rent", "jan")
            .validate()
            .unwrap();
        let ledger = Ledger::open(MemoryLedgerStore::with_records(vec![existing.clone()])).unwrap();
        assert_eq!(ledger.records(), &[existing]);
    }

    #[test]
    fn test_list_is_ordered_and_restartable() {
        let mut ledger = empty_ledger();
        add(&mut ledger, "2024-03-05", "1", "A", "first");
        add(&mut ledger, "2024-03-01", "2", "B", "second");

        let listing = ledger.list();
        let positions: Vec<usize> = listing.iter().map(|(i, _)| i).collect();
        assert_eq!(positions, vec![1, 2]);
        assert_eq!(descriptions(&listing), vec!["first", "second"]);
        assert_eq!(descriptions(&listing), vec!["first", "second"]);
    }

    #[test]
    fn test_empty_list() {
        let ledger = empty_ledger();
        assert!(ledger.list().is_empty());
        assert_eq!(ledger.list().iter().count(), 0);
    }

    #[test]
    fn test_filter_by_category_ignores_case() {
        let mut ledger = empty_ledger();
        add(&mut ledger, "2024-03-01", "1", "Food", "a");
        add(&mut ledger, "2024-03-02", "1", "Travel", "b");
        add(&mut ledger, "2024-03-03", "1", "food", "c");
        add(&mut ledger, "2024-03-04", "1", "Foods", "d");

        let upper = descriptions(&ledger.filter_by_category("Food"));
        let lower = descriptions(&ledger.filter_by_category("food"));
        assert_eq!(upper, vec!["a", "c"]);
        assert_eq!(upper, lower);

        assert!(ledger.filter_by_category("Fo").is_empty());
    }

    #[test]
    fn test_filter_by_date_range() {
        let mut ledger = empty_ledger();
        add(&mut ledger, "2024-01-10", "1", "A", "jan");
        add(&mut ledger, "2024-02-10", "1", "A", "feb");

        let listing = ledger.filter_by_date_range("2024-01-01", "2024-01-31").unwrap();
        assert_eq!(descriptions(&listing), vec!["jan"]);

        let inclusive = ledger.filter_by_date_range("2024-01-10", "2024-02-10").unwrap();
        assert_eq!(inclusive.len(), 2);
    }

    #[test]
    fn test_filter_preserves_ledger_order() {
        let mut ledger = empty_ledger();
        add(&mut ledger, "2024-01-20", "1", "A", "later");
        add(&mut ledger, "2024-01-05", "1", "A", "earlier");

        let listing = ledger.filter_by_date_range("2024-01-01", "2024-01-31").unwrap();
        assert_eq!(descriptions(&listing), vec!["later", "earlier"]);
    }

    #[test]
    fn test_reversed_range_is_empty_not_error() {
        let mut ledger = empty_ledger();
        add(&mut ledger, "2024-01-10", "1", "A", "jan");

        let listing = ledger.filter_by_date_range("2024-12-31", "2024-01-01").unwrap();
        assert!(listing.is_empty());
    }

    #[test]
    fn test_invalid_range_bound() {
        let ledger = empty_ledger();
        let err = ledger.filter_by_date_range("2024-01-01", "2024-01-32").unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::InvalidDate));

        let err = ExpenseFilter::date_range("yesterday", "2024-01-01").unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::InvalidDate));
    }

    #[test]
    fn test_append_many_single_save() {
        let mut ledger = empty_ledger();
        let batch = vec![
            NewExpense::new("2024-01-01", "1", "A", "").validate().unwrap(),
            NewExpense::new("2024-01-02", "2", "B", "").validate().unwrap(),
        ];

        assert_eq!(ledger.append_many(batch).unwrap(), 2);
        assert_eq!(ledger.store().save_count(), 1);
        assert_eq!(ledger.append_many(Vec::new()).unwrap(), 0);
        assert_eq!(ledger.store().save_count(), 1);
    }

    #[test]
    fn test_summary_scenario() {
        let mut ledger = empty_ledger();
        add(&mut ledger, "2024-03-01", "12.50", "Food", "lunch");
        add(&mut ledger, "2024-03-05", "7.25", "Food", "coffee");

        let summary = ledger.summary(CategoryCase::AsStored);
        assert_eq!(summary.overall_total, Money::from_cents(1975));
        assert_eq!(summary.categories.len(), 1);
        assert_eq!(summary.categories[0].category, "Food");
        assert_eq!(summary.categories[0].total, Money::from_cents(1975));
    }

    #[test]
    fn test_audit_entries_written() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("expenses.audit.log"));
        let store = JsonLedgerStore::new(temp_dir.path().join("expenses.json"));
        let mut ledger = Ledger::open(store).unwrap().with_audit(logger.clone());

        add(&mut ledger, "2024-03-01", "1", "A", "one");
        let _ = ledger.add(&NewExpense::new("bad", "1", "A", "rejected"));
        ledger
            .append_many(vec![
                NewExpense::new("2024-03-02", "2", "B", "two").validate().unwrap(),
                NewExpense::new("2024-03-03", "3", "C", "three").validate().unwrap(),
            ])
            .unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].position, 1);
        assert_eq!(entries[2].operation, Operation::Import);
        assert_eq!(entries[2].position, 3);
    }

    #[test]
    fn test_audit_failure_does_not_undo_append() {
        let temp_dir = TempDir::new().unwrap();
        // The audit "file" is a directory, so every audit write fails
        let logger = AuditLogger::new(temp_dir.path().to_path_buf());
        let mut ledger = empty_ledger().with_audit(logger);

        add(&mut ledger, "2024-03-01", "1", "A", "kept");
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.store().save_count(), 1);
    }

    #[test]
    fn test_largest_amount_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        let mut ledger = Ledger::open(JsonLedgerStore::new(&path)).unwrap();

        add(&mut ledger, "2024-03-01", "999999999999.93", "Big", "x");
        let err = ledger
            .add(&NewExpense::new("2024-03-02", "1000000000000.01", "Big", "y"))
            .unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::InvalidAmount));

        let reopened = Ledger::open(JsonLedgerStore::new(&path)).unwrap();
        assert_eq!(reopened.records(), ledger.records());
        assert_eq!(reopened.records()[0].amount, Money::from_cents(99_999_999_999_993));
    }

    #[test]
    fn test_total_stays_in_range() {
        let mut ledger = empty_ledger();
        add(&mut ledger, "2024-03-01", "1000000000000", "Big", "max");

        let err = ledger
            .add(&NewExpense::new("2024-03-02", "0.01", "Small", "over"))
            .unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::InvalidAmount));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.store().save_count(), 1);

        let batch = vec![NewExpense::new("2024-03-03", "5", "A", "").validate().unwrap()];
        assert!(ledger.append_many(batch).is_err());

        add(&mut ledger, "2024-03-04", "0", "Zero", "still fits");
        let summary = ledger.summary(CategoryCase::AsStored);
        assert_eq!(summary.overall_total, Money::max());
    }
}
