#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use chrono::{TimeZone, Utc};
use once_cell::sync::Lazy;
use purse::{BudgetBook, JsonFileStore, KeyValueStore, MemoryStore};
use purse_core::{CoreError, FixedClock};
use serde_json::Value;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
    ))
}

/// Creates a fresh data directory that outlives the calling test.
pub fn temp_data_dir() -> std::path::PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

/// Opens a book backed by JSON files in `dir`.
pub fn open_json_book(dir: &std::path::Path) -> BudgetBook {
    let store = JsonFileStore::new(dir.to_path_buf()).expect("create json store");
    BudgetBook::open_with_clock(Box::new(store), 50, fixed_clock()).expect("open book")
}

pub fn open_memory_book(capacity: usize) -> BudgetBook {
    BudgetBook::open_with_clock(Box::new(MemoryStore::new()), capacity, fixed_clock())
        .expect("open book")
}

/// Memory store with a switch that makes every write fail.
#[derive(Clone, Default)]
pub struct FlakyStore {
    inner: Arc<MemoryStore>,
    failing: Arc<AtomicBool>,
}

impl FlakyStore {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), CoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(CoreError::Storage("simulated write failure".into()))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<Value>, CoreError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: Value) -> Result<(), CoreError> {
        self.check()?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        self.check()?;
        self.inner.remove(key)
    }

    fn clear(&self) -> Result<(), CoreError> {
        self.check()?;
        self.inner.clear()
    }

    fn keys(&self) -> Result<Vec<String>, CoreError> {
        self.inner.keys()
    }
}
