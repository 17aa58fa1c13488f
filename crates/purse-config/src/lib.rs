//! purse-config
//!
//! Persistent settings for a budget book: where data lives, how much history to keep,
//! and the default log filter. Owns the Config data structure plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::Config;
