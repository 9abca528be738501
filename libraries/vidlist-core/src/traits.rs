//! Seam traits for Vidlist
//!
//! These traits abstract the two outside collaborators of the core: the
//! durable text storage that holds the playlist blob, and the remote video
//! search API.

use crate::error::Result;
use crate::types::{SearchResults, VideoDetails};
use async_trait::async_trait;

/// Durable key/value text storage
///
/// Implementers hold opaque text blobs by key. The playlist store keeps its
/// whole collection under a single key.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Read the blob stored under `key`
    ///
    /// Returns `Ok(None)` if nothing is stored; absence is not an error.
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`
    ///
    /// A concurrent reader must observe either the previous or the new value,
    /// never a partially written one.
    async fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// Video platform search API
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Search videos matching a free-text query
    async fn search_videos(&self, query: &str) -> Result<SearchResults>;

    /// Get details (statistics, description) for a single video
    ///
    /// # Errors
    /// Returns `NotFound` if the platform knows no video with this id
    async fn get_video_details(&self, id: &str) -> Result<VideoDetails>;
}
