//! Expense summary
//!
//! Overall total plus one total per category, in the order categories are
//! first seen in the ledger.

use std::collections::HashMap;

use crate::config::CategoryCase;
use crate::models::{Expense, Money};

/// Total for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    /// Category label (the first spelling seen when folding case)
    pub category: String,
    /// Sum of the amounts in this category
    pub total: Money,
    /// Number of records in this category
    pub count: usize,
}

/// Summary of the whole ledger
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Summary {
    /// Sum of every amount in the ledger
    pub overall_total: Money,
    /// Per-category totals, first-seen order
    pub categories: Vec<CategoryTotal>,
}

impl Summary {
    /// Compute totals over `records`
    ///
    /// With `CategoryCase::AsStored`, "Food" and "food" are separate
    /// categories. With `CategoryCase::Folded` they share one line.
    pub fn compute(records: &[Expense], case: CategoryCase) -> Self {
        let mut categories: Vec<CategoryTotal> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut overall_total = Money::zero();

        for expense in records {
            overall_total += expense.amount;

            let key = match case {
                CategoryCase::AsStored => expense.category.clone(),
                CategoryCase::Folded => expense.category.to_lowercase(),
            };

            let slot = *index.entry(key).or_insert_with(|| {
                categories.push(CategoryTotal {
                    category: expense.category.clone(),
                    total: Money::zero(),
                    count: 0,
                });
                categories.len() - 1
            });

            let entry = &mut categories[slot];
            entry.total += expense.amount;
            entry.count += 1;
        }

        Self {
            overall_total,
            categories,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
