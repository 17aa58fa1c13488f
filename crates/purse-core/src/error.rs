use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Insufficient funds in `{category}`: requested {requested:.2}, available {available:.2}")]
    InsufficientFunds {
        category: String,
        requested: f64,
        available: f64,
    },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Storage failures are the only ones worth retrying; the rest are caller mistakes.
    pub fn is_storage(&self) -> bool {
        matches!(self, CoreError::Storage(_))
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Storage(err.to_string())
    }
}
