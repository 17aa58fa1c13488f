//! Authoritative in-memory budget state and the operations that mutate it.

use std::{fmt, sync::Arc};

use tracing::debug;

use purse_domain::{
    is_valid_amount, merge_activity, Activity, Category, Deposit, Expense, LedgerSnapshot,
};

use crate::{time::SystemClock, Clock, CoreError, CoreResult};

/// Owns categories plus the most-recent-first expense and deposit lists.
///
/// Every operation validates before touching state, so a failed call leaves the
/// ledger exactly as it was.
pub struct Ledger {
    state: LedgerSnapshot,
    clock: Arc<dyn Clock>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::from_snapshot(LedgerSnapshot::default(), clock)
    }

    pub fn from_snapshot(snapshot: LedgerSnapshot, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: snapshot,
            clock,
        }
    }

    /// Deep copy of the current state.
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.state.clone()
    }

    /// Replaces the whole state, e.g. with a snapshot returned by undo/redo.
    pub fn restore(&mut self, snapshot: LedgerSnapshot) {
        self.state = snapshot;
    }

    pub fn state(&self) -> &LedgerSnapshot {
        &self.state
    }

    /// Creates a category funded with `deposit` and logs the initial deposit.
    pub fn create_category(&mut self, name: &str, deposit: f64) -> CoreResult<Category> {
        let name = require_name("category name", name)?;
        require_amount("deposit", deposit)?;

        let category = Category::new(name, deposit);
        let record = Deposit::new(category.name.clone(), deposit, self.clock.today());
        self.state.categories.push(category.clone());
        self.state.deposits.insert(0, record);
        debug!(category = %category.name, deposit, "category created");
        Ok(category)
    }

    /// Charges `amount` to the category, refusing to overdraw it.
    pub fn add_expense(
        &mut self,
        category_id: &str,
        name: &str,
        amount: f64,
    ) -> CoreResult<Expense> {
        let index = self.category_index(category_id).ok_or_else(|| {
            CoreError::Validation(format!("category {category_id} does not exist"))
        })?;
        let name = require_name("expense name", name)?;
        require_amount("expense amount", amount)?;

        let category = &mut self.state.categories[index];
        if !category.can_cover(amount) {
            return Err(CoreError::InsufficientFunds {
                category: category.name.clone(),
                requested: amount,
                available: category.balance,
            });
        }
        category.balance -= amount;
        let expense = Expense::new(name, amount, category.name.clone(), self.clock.today());
        self.state.expenses.insert(0, expense.clone());
        debug!(category = %expense.category_name, amount, "expense recorded");
        Ok(expense)
    }

    /// Renames the category and adds `additional` to both deposit and balance.
    ///
    /// A zero top-up only renames; no deposit record is written for it.
    pub fn top_up_category(
        &mut self,
        category_id: &str,
        new_name: &str,
        additional: f64,
    ) -> CoreResult<Category> {
        let index = self.category_index(category_id).ok_or_else(|| {
            CoreError::Validation(format!("category {category_id} does not exist"))
        })?;
        if !additional.is_finite() || additional < 0.0 {
            return Err(CoreError::Validation(format!(
                "top-up must be a non-negative number, got {additional}"
            )));
        }
        let new_name = require_name("category name", new_name)?;

        let today = self.clock.today();
        let category = &mut self.state.categories[index];
        category.name = new_name;
        category.deposit += additional;
        category.balance += additional;
        let updated = category.clone();
        if additional > 0.0 {
            self.state
                .deposits
                .insert(0, Deposit::new(updated.name.clone(), additional, today));
        }
        debug!(category = %updated.name, additional, "category topped up");
        Ok(updated)
    }

    /// Removes the category. Expense and deposit records that name it stay.
    pub fn delete_category(&mut self, category_id: &str) -> CoreResult<()> {
        let index = self
            .category_index(category_id)
            .ok_or_else(|| CoreError::NotFound(format!("category {category_id}")))?;
        let removed = self.state.categories.remove(index);
        debug!(category = %removed.name, "category deleted");
        Ok(())
    }

    /// Sum of category balances, recomputed on every call.
    pub fn total_balance(&self) -> f64 {
        self.state.total_balance()
    }

    /// Sum of every deposit ever recorded, including those of deleted categories.
    pub fn total_deposited(&self) -> f64 {
        self.state.deposits.iter().map(|deposit| deposit.amount).sum()
    }

    /// Sum of every expense ever recorded, including those of deleted categories.
    pub fn total_spent(&self) -> f64 {
        self.state.expenses.iter().map(|expense| expense.amount).sum()
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.state.categories.iter().find(|category| category.id == id)
    }

    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        let name = name.trim();
        self.state
            .categories
            .iter()
            .find(|category| category.name == name)
    }

    pub fn categories(&self) -> &[Category] {
        &self.state.categories
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.state.expenses
    }

    pub fn deposits(&self) -> &[Deposit] {
        &self.state.deposits
    }

    /// Expenses recorded under `category_name`, most recent first.
    pub fn expenses_for<'a>(&'a self, category_name: &'a str) -> impl Iterator<Item = &'a Expense> {
        self.state
            .expenses
            .iter()
            .filter(move |expense| expense.category_name == category_name)
    }

    /// Expenses and deposits interleaved, most recent first.
    pub fn activity(&self) -> Vec<Activity<'_>> {
        merge_activity(&self.state.expenses, &self.state.deposits)
    }

    fn category_index(&self, id: &str) -> Option<usize> {
        self.state
            .categories
            .iter()
            .position(|category| category.id == id)
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger").field("state", &self.state).finish()
    }
}

fn require_name(label: &str, value: &str) -> CoreResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(CoreError::Validation(format!("{label} must not be empty")))
    } else {
        Ok(trimmed.to_string())
    }
}

fn require_amount(label: &str, amount: f64) -> CoreResult<()> {
    if is_valid_amount(amount) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "{label} must be a positive number, got {amount}"
        )))
    }
}
