//! Full copies of ledger state and the timeline entries that wrap them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{category::Category, deposit::Deposit, expense::Expense};

/// Complete, independent copy of ledger state at one instant.
///
/// Expenses and deposits are kept most-recent-first.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub deposits: Vec<Deposit>,
}

impl LedgerSnapshot {
    pub fn new(categories: Vec<Category>, expenses: Vec<Expense>, deposits: Vec<Deposit>) -> Self {
        Self {
            categories,
            expenses,
            deposits,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.expenses.is_empty() && self.deposits.is_empty()
    }

    /// Sum of the spendable balance across all categories.
    pub fn total_balance(&self) -> f64 {
        self.categories.iter().map(|category| category.balance).sum()
    }

    /// Detects duplicate identifiers and impossible amounts in loaded state.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        duplicate_ids("category", self.categories.iter().map(|c| c.id.as_str()), &mut warnings);
        duplicate_ids("expense", self.expenses.iter().map(|e| e.id.as_str()), &mut warnings);
        duplicate_ids("deposit", self.deposits.iter().map(|d| d.id.as_str()), &mut warnings);

        for category in &self.categories {
            if !category.deposit.is_finite() || !category.balance.is_finite() {
                warnings.push(format!("category {} has a non-finite amount", category.id));
            } else if category.balance < 0.0 {
                warnings.push(format!(
                    "category {} has a negative balance {}",
                    category.id, category.balance
                ));
            }
        }
        for expense in &self.expenses {
            if !crate::is_valid_amount(expense.amount) {
                warnings.push(format!(
                    "expense {} has invalid amount {}",
                    expense.id, expense.amount
                ));
            }
        }
        for deposit in &self.deposits {
            if !crate::is_valid_amount(deposit.amount) {
                warnings.push(format!(
                    "deposit {} has invalid amount {}",
                    deposit.id, deposit.amount
                ));
            }
        }
        warnings
    }
}

fn duplicate_ids<'a>(
    kind: &str,
    ids: impl Iterator<Item = &'a str>,
    warnings: &mut Vec<String>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            warnings.push(format!("duplicate {kind} id {id}"));
        }
    }
}

/// One point on the undo/redo timeline.
///
/// The snapshot is flattened so a persisted entry reads as
/// `{ categories, expenses, deposits, timestamp }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub snapshot: LedgerSnapshot,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl HistoryEntry {
    pub fn new(snapshot: LedgerSnapshot, timestamp: i64) -> Self {
        Self {
            snapshot,
            timestamp,
        }
    }
}
