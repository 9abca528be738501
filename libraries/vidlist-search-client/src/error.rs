//! Error types for the search client.

use thiserror::Error;
use vidlist_core::VidlistError;

/// Errors that can occur when talking to the video search API.
#[derive(Error, Debug)]
pub enum SearchClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Caller supplied an unusable query or id
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No API key configured
    #[error("YouTube API key is not configured")]
    MissingApiKey,

    /// Invalid base URL
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to parse API response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Requested video does not exist
    #[error("Video not found: {0}")]
    NotFound(String),
}

/// Result type for search client operations.
pub type Result<T> = std::result::Result<T, SearchClientError>;

impl From<SearchClientError> for VidlistError {
    fn from(err: SearchClientError) -> Self {
        match err {
            SearchClientError::InvalidArgument(msg) => VidlistError::InvalidArgument(msg),
            SearchClientError::NotFound(id) => VidlistError::not_found("Video", id),
            SearchClientError::MissingApiKey
            | SearchClientError::InvalidUrl(_)
            | SearchClientError::InvalidConfig(_) => VidlistError::Other(err.to_string()),
            other => VidlistError::network(other.to_string()),
        }
    }
}
