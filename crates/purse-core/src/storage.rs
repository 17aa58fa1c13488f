//! Key-value persistence contract and typed helpers over it.

use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard},
};

use purse_domain::LedgerSnapshot;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::CoreError;

pub const CATEGORIES_KEY: &str = "categories";
pub const EXPENSES_KEY: &str = "expenses";
pub const DEPOSITS_KEY: &str = "deposits";
pub const HISTORY_KEY: &str = "transaction_history";
pub const HISTORY_INDEX_KEY: &str = "history_current_index";

/// Abstraction over durable string-keyed storage holding JSON values.
///
/// Every call is atomic from the caller's point of view. Failures surface as
/// [`CoreError::Storage`] and are never retried here.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>, CoreError>;
    fn set(&self, key: &str, value: Value) -> Result<(), CoreError>;
    fn remove(&self, key: &str) -> Result<(), CoreError>;
    fn clear(&self) -> Result<(), CoreError>;
    fn keys(&self) -> Result<Vec<String>, CoreError>;

    fn get_many(&self, keys: &[&str]) -> Result<Vec<(String, Option<Value>)>, CoreError> {
        keys.iter()
            .map(|key| self.get(key).map(|value| (key.to_string(), value)))
            .collect()
    }

    fn set_many(&self, pairs: Vec<(String, Value)>) -> Result<(), CoreError> {
        for (key, value) in pairs {
            self.set(&key, value)?;
        }
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> Result<(), CoreError> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}

/// Reads and decodes the value stored under `key`.
pub fn load<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, CoreError> {
    store
        .get(key)?
        .map(|value| {
            serde_json::from_value(value)
                .map_err(|err| CoreError::Storage(format!("corrupt value under `{key}`: {err}")))
        })
        .transpose()
}

/// Encodes `value` and stores it under `key`.
pub fn save<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), CoreError> {
    store.set(key, serde_json::to_value(value)?)
}

/// Loads the three ledger lists, treating absent keys as empty.
pub fn load_ledger_state(store: &dyn KeyValueStore) -> Result<LedgerSnapshot, CoreError> {
    let snapshot = LedgerSnapshot::new(
        load(store, CATEGORIES_KEY)?.unwrap_or_default(),
        load(store, EXPENSES_KEY)?.unwrap_or_default(),
        load(store, DEPOSITS_KEY)?.unwrap_or_default(),
    );
    for warning in snapshot.warnings() {
        warn!(%warning, "persisted ledger state looks inconsistent");
    }
    Ok(snapshot)
}

/// Writes the three ledger lists in one bulk call.
pub fn save_ledger_state(
    store: &dyn KeyValueStore,
    snapshot: &LedgerSnapshot,
) -> Result<(), CoreError> {
    store.set_many(vec![
        (
            CATEGORIES_KEY.to_string(),
            serde_json::to_value(&snapshot.categories)?,
        ),
        (
            EXPENSES_KEY.to_string(),
            serde_json::to_value(&snapshot.expenses)?,
        ),
        (
            DEPOSITS_KEY.to_string(),
            serde_json::to_value(&snapshot.deposits)?,
        ),
    ])
}

pub fn clear_ledger_state(store: &dyn KeyValueStore) -> Result<(), CoreError> {
    store.remove_many(&[CATEGORIES_KEY, EXPENSES_KEY, DEPOSITS_KEY])
}

/// Volatile store backed by an ordered map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<MutexGuard<'_, BTreeMap<String, Value>>, CoreError> {
        self.entries
            .lock()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, CoreError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), CoreError> {
        self.entries()?.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        self.entries()?.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        self.entries()?.clear();
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CoreError> {
        Ok(self.entries()?.keys().cloned().collect())
    }
}
