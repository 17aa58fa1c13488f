use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Stores user-configurable settings for a budget book.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for budget data. Defaults to `<data dir>/purse`.
    pub data_dir: Option<PathBuf>,
    #[serde(default = "Config::default_history_capacity")]
    pub history_capacity: usize,
    #[serde(default = "Config::default_log_filter")]
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            history_capacity: Self::default_history_capacity(),
            log_filter: Self::default_log_filter(),
        }
    }
}

impl Config {
    pub fn default_history_capacity() -> usize {
        50
    }

    pub fn default_log_filter() -> String {
        "purse=info".into()
    }

    /// Base directory for application files (config and data).
    pub fn default_base_dir() -> PathBuf {
        dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("purse")
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }

        Self::default_base_dir().join("data")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::Invalid(
                "history_capacity must be at least 1".into(),
            ));
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Invalid("log_filter must not be empty".into()));
        }
        Ok(())
    }
}
