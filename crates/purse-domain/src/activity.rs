//! Combined view over expense and deposit records.

use crate::{common::*, deposit::Deposit, expense::Expense};

/// A single line of the transaction history, borrowed from ledger state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activity<'a> {
    Expense(&'a Expense),
    Deposit(&'a Deposit),
}

impl Activity<'_> {
    pub fn date(&self) -> &RecordDate {
        match self {
            Activity::Expense(expense) => &expense.date,
            Activity::Deposit(deposit) => &deposit.date,
        }
    }

    pub fn category_name(&self) -> &str {
        match self {
            Activity::Expense(expense) => &expense.category_name,
            Activity::Deposit(deposit) => &deposit.category_name,
        }
    }

    /// Effect on the total balance: negative for expenses, positive for deposits.
    pub fn signed_amount(&self) -> f64 {
        match self {
            Activity::Expense(expense) => -expense.amount,
            Activity::Deposit(deposit) => deposit.amount,
        }
    }

    pub fn is_expense(&self) -> bool {
        matches!(self, Activity::Expense(_))
    }
}

impl Identifiable for Activity<'_> {
    fn id(&self) -> &str {
        match self {
            Activity::Expense(expense) => &expense.id,
            Activity::Deposit(deposit) => &deposit.id,
        }
    }
}

impl Displayable for Activity<'_> {
    fn display_label(&self) -> String {
        match self {
            Activity::Expense(expense) => expense.display_label(),
            Activity::Deposit(deposit) => deposit.display_label(),
        }
    }
}

/// Merges two most-recent-first lists into one most-recent-first feed.
///
/// Records sharing a date keep their list order, expenses ahead of deposits.
/// A date that cannot be parsed sorts after every readable one.
pub fn merge_activity<'a>(expenses: &'a [Expense], deposits: &'a [Deposit]) -> Vec<Activity<'a>> {
    let mut feed = Vec::with_capacity(expenses.len() + deposits.len());
    let mut expenses = expenses.iter().peekable();
    let mut deposits = deposits.iter().peekable();

    loop {
        let take_expense = match (expenses.peek(), deposits.peek()) {
            (Some(expense), Some(deposit)) => {
                expense.date.to_naive() >= deposit.date.to_naive()
            }
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        if take_expense {
            if let Some(expense) = expenses.next() {
                feed.push(Activity::Expense(expense));
            }
        } else if let Some(deposit) = deposits.next() {
            feed.push(Activity::Deposit(deposit));
        }
    }
    feed
}
