//! Shared traits and helpers for budgeting primitives.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exposes a stable identifier for entities stored in the ledger.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Fresh opaque identifier for a new record.
///
/// Identifiers read back from storage are kept verbatim whatever their shape.
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

/// Calendar date of a record, stored exactly as it was written.
///
/// New records use ISO `YYYY-MM-DD`; older data may carry locale formatted
/// dates such as `10/18/2025`, which still load and round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordDate(String);

impl RecordDate {
    const FORMATS: [&'static str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y"];

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the stored text, or `None` when it matches no known format.
    pub fn to_naive(&self) -> Option<NaiveDate> {
        let raw = self.0.trim();
        Self::FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
    }
}

impl From<NaiveDate> for RecordDate {
    fn from(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }
}

impl fmt::Display for RecordDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns `true` for amounts a ledger may move: finite and strictly positive.
pub fn is_valid_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}

/// Renders an amount with two decimals, the precision every label uses.
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}
