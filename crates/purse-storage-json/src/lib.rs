//! purse-storage-json
//!
//! Filesystem-backed [`KeyValueStore`]: one pretty-printed JSON file per key.

pub mod atomic;

use std::{
    fs,
    path::{Path, PathBuf},
};

use purse_core::{CoreError, KeyValueStore};
use serde_json::Value;
use tracing::debug;

const FILE_EXTENSION: &str = "json";

/// Stores each key as `<root>/<key>.json`, written atomically.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn key_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), FILE_EXTENSION))
    }

    fn data_files(&self) -> Result<Vec<PathBuf>, CoreError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.is_file()
                && path.extension().and_then(|ext| ext.to_str()) == Some(FILE_EXTENSION)
            {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, CoreError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)?;
        serde_json::from_str(&data).map(Some).map_err(|err| {
            CoreError::Storage(format!("corrupt data in `{}`: {err}", path.display()))
        })
    }

    fn set(&self, key: &str, value: Value) -> Result<(), CoreError> {
        let path = self.key_path(key);
        let json = serde_json::to_string_pretty(&value)?;
        atomic::write_atomic(&path, &json)?;
        debug!(key, path = %path.display(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        for path in self.data_files()? {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CoreError> {
        Ok(self
            .data_files()?
            .iter()
            .filter_map(|path| path.file_stem().and_then(|stem| stem.to_str()))
            .map(str::to_string)
            .collect())
    }
}

/// Maps an arbitrary key onto a safe file stem.
fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '_' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "key".into()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_key_replaces_unsafe_characters() {
        assert_eq!(canonical_key("transaction_history"), "transaction_history");
        assert_eq!(canonical_key("../Secret Key"), "___secret_key");
        assert_eq!(canonical_key("///"), "key");
    }
}
