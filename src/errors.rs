use purse_config::ConfigError;
use purse_core::CoreError;
use thiserror::Error;

/// Unified error type for the budget book facade.
#[derive(Debug, Error)]
pub enum PurseError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The edit is applied in memory but some writes did not reach the store.
    /// Call `BudgetBook::retry_persist` rather than repeating the edit.
    #[error("change applied but not saved: {0}")]
    Unsynced(#[source] CoreError),
}

pub type Result<T> = std::result::Result<T, PurseError>;

impl PurseError {
    pub fn is_unsynced(&self) -> bool {
        matches!(self, PurseError::Unsynced(_))
    }
}
