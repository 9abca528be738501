/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// Blob key cannot be mapped onto the backend
    #[error("Invalid blob key: {0:?}")]
    InvalidKey(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for StorageError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<StorageError> for vidlist_core::VidlistError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(e) => vidlist_core::VidlistError::Io(e),
            other => vidlist_core::VidlistError::storage(other.to_string()),
        }
    }
}
