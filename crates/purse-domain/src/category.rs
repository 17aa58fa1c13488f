//! Domain types representing budget categories.

use serde::{Deserialize, Serialize};
use crate::common::*;

/// A named budget bucket with cumulative deposits and a spendable balance.
///
/// `deposit` only ever grows (creation and top-ups). `balance` moves with it on
/// top-ups and shrinks with every expense charged to the category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub deposit: f64,
    pub balance: f64,
}

impl Category {
    pub fn new(name: impl Into<String>, deposit: f64) -> Self {
        Self {
            id: new_record_id(),
            name: name.into(),
            deposit,
            balance: deposit,
        }
    }

    /// Amount charged against the category so far.
    pub fn spent(&self) -> f64 {
        self.deposit - self.balance
    }

    /// Returns `true` when an expense of `amount` fits in the remaining balance.
    pub fn can_cover(&self, amount: f64) -> bool {
        amount <= self.balance
    }
}

impl Identifiable for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for Category {
    fn amount(&self) -> f64 {
        self.balance
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        format!(
            "{} ({} of {})",
            self.name,
            format_amount(self.balance),
            format_amount(self.deposit)
        )
    }
}
