//! purse-core
//!
//! Budget ledger, undo/redo timeline, and the key-value storage contract they persist through.
//! Depends on purse-domain. No terminal I/O, no concrete file storage.

pub mod error;
pub mod history;
pub mod ledger;
pub mod storage;
pub mod time;

pub use error::{CoreError, CoreResult};
pub use history::{HistoryService, Timeline, DEFAULT_HISTORY_CAPACITY};
pub use ledger::Ledger;
pub use storage::{KeyValueStore, MemoryStore};
pub use time::{Clock, FixedClock, SystemClock};
