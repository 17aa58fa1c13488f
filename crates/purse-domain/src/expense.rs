use serde::{Deserialize, Serialize};

use crate::common::*;

/// A single spend charged against a category.
///
/// `category_name` is copied from the category at the time of the expense, so
/// renaming or deleting the category later does not relabel the record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub category_name: String,
    pub date: RecordDate,
}

impl Expense {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        category_name: impl Into<String>,
        date: impl Into<RecordDate>,
    ) -> Self {
        Self {
            id: new_record_id(),
            name: name.into(),
            amount,
            category_name: category_name.into(),
            date: date.into(),
        }
    }
}

impl Identifiable for Expense {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Expense {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for Expense {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        format!(
            "{} - {} {} ({})",
            self.date,
            self.category_name,
            self.name,
            format_amount(self.amount)
        )
    }
}
