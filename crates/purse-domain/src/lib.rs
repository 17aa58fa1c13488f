//! purse-domain
//!
//! Pure domain models (Category, Expense, Deposit, LedgerSnapshot, HistoryEntry).
//! No I/O, no storage. Only data types and the traits they share.

pub mod activity;
pub mod category;
pub mod common;
pub mod deposit;
pub mod expense;
pub mod snapshot;

pub use activity::*;
pub use category::*;
pub use common::*;
pub use deposit::*;
pub use expense::*;
pub use snapshot::*;
