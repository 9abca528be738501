/// Core error types for Vidlist
use thiserror::Error;

/// Result type alias using `VidlistError`
pub type Result<T> = std::result::Result<T, VidlistError>;

/// Core error type for Vidlist
#[derive(Error, Debug)]
pub enum VidlistError {
    /// Caller supplied an argument the operation cannot accept
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Durable blob exists but cannot be decoded
    #[error("Codec error: {0}")]
    Codec(String),

    /// Storage backend errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Search API errors
    #[error("Network error: {0}")]
    Network(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl VidlistError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a codec error
    pub fn codec(msg: impl Into<String>) -> Self {
        Self::Codec(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Whether the error was caused by the caller's input rather than the environment.
    ///
    /// Callers use this to decide between a plain user-facing message and an
    /// infrastructure failure that deserves an error log.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::InvalidArgument(_) | Self::NotFound { .. })
    }
}
