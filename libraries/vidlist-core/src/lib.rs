//! Vidlist Core
//!
//! Platform-agnostic types, traits, and error handling for Vidlist.
//!
//! This crate provides the foundational building blocks shared by the
//! playlist store, the mutation coordinator, and the search client.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Playlist`, `PlaylistVideo`, `VideoSummary`, `VideoDetails`
//! - **Core Traits**: `BlobStore` (durable text storage), `VideoSearch` (search API)
//! - **Error Handling**: Unified `VidlistError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use vidlist_core::types::{Playlist, PlaylistVideo, VideoSummary};
//!
//! // Create an empty playlist
//! let mut playlist = Playlist::new("Favorites");
//!
//! // Capture a search result as a playlist entry
//! let summary = VideoSummary::new("abc", "T1", "u1", "C1");
//! playlist.videos.push(PlaylistVideo::from_summary(&summary));
//!
//! assert_eq!(playlist.videos.len(), 1);
//! assert_eq!(playlist.created_at, playlist.updated_at);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Result, VidlistError};
pub use traits::{BlobStore, VideoSearch};

pub use types::{
    Playlist, PlaylistId, PlaylistVideo, RemovedVideo, SearchResults, VideoDetails, VideoId,
    VideoSummary,
};
