#![doc(test(attr(deny(warnings))))]

//! Purse keeps spending categories, the expenses and deposits recorded against
//! them, and an undo/redo history of every edit, persisted through a key-value
//! store.

pub mod book;
pub mod errors;
pub mod utils;

pub use book::BudgetBook;
pub use errors::{PurseError, Result};
pub use purse_config::{Config, ConfigManager};
pub use purse_core::{CoreError, KeyValueStore, Ledger, MemoryStore, Timeline};
pub use purse_domain::{
    Activity, Category, Deposit, Expense, HistoryEntry, LedgerSnapshot, RecordDate,
};
pub use purse_storage_json::JsonFileStore;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default filter and emits a startup info log.
pub fn init() {
    init_with_filter(&Config::default_log_filter());
}

/// Initializes global tracing with `filter` unless `RUST_LOG` overrides it.
pub fn init_with_filter(filter: &str) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(filter);
        tracing::info!("Purse tracing initialized.");
    });
}

/// Loads the user's config from the default location and opens their budget book.
pub fn open_default() -> Result<BudgetBook> {
    let manager = ConfigManager::with_base_dir(Config::default_base_dir())?;
    let config = manager.load()?;
    init_with_filter(&config.log_filter);
    BudgetBook::from_config(&config)
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init_with_filter("purse=debug");
    }
}
