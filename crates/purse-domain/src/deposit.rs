use serde::{Deserialize, Serialize};

use crate::common::*;

/// Money added to a category, either when it is created or on a top-up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Deposit {
    pub id: String,
    pub category_name: String,
    pub amount: f64,
    pub date: RecordDate,
}

impl Deposit {
    pub fn new(
        category_name: impl Into<String>,
        amount: f64,
        date: impl Into<RecordDate>,
    ) -> Self {
        Self {
            id: new_record_id(),
            category_name: category_name.into(),
            amount,
            date: date.into(),
        }
    }
}

impl Identifiable for Deposit {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Amounted for Deposit {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for Deposit {
    fn display_label(&self) -> String {
        format!(
            "{} + {} ({})",
            self.date,
            self.category_name,
            format_amount(self.amount)
        )
    }
}
