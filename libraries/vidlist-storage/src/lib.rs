//! Vidlist Storage
//!
//! Durable playlist storage for Vidlist.
//!
//! The whole playlist collection lives in a single JSON blob under one key
//! of a pluggable [`BlobStore`](vidlist_core::BlobStore) backend.
//!
//! # Architecture
//!
//! - **Backends**: in-memory and file-backed blob storage
//! - **Codec**: JSON encoding of the collection, lenient on unreadable data
//! - **Store**: serialized read-modify-write CRUD over the collection
//!
//! # Example
//!
//! ```rust,no_run
//! use vidlist_storage::{open_store, StorageConfig};
//! use vidlist_core::VideoSummary;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = open_store(&StorageConfig::load()?)?;
//!
//! let favorites = store.create_playlist("Favorites").await?;
//! let video = VideoSummary::new("abc", "T1", "https://i.ytimg.com/vi/abc/mqdefault.jpg", "C1");
//! store.add_video_to_playlist(&favorites.id, &video).await?;
//!
//! let playlists = store.list_playlists().await?;
//! # Ok(())
//! # }
//! ```

mod codec;
mod config;
mod error;

pub mod backends;
pub mod playlists;

pub use crate::config::{BackendKind, StorageConfig, CONFIG_FILE};
pub use backends::{FileBlobStore, MemoryBlobStore};
pub use codec::{EntityCodec, DEFAULT_KEY};
pub use error::StorageError;
pub use playlists::{DeletedPlaylist, PlaylistStore, RenamedPlaylist, VideoRemoval};

use std::sync::Arc;
use tracing::info;
use vidlist_core::BlobStore;

/// Build the configured backend and a store on top of it
///
/// # Errors
///
/// Returns an error if the configuration is invalid
pub fn open_store(config: &StorageConfig) -> Result<PlaylistStore, StorageError> {
    config.validate()?;

    let backend: Arc<dyn BlobStore> = match config.backend {
        BackendKind::Memory => Arc::new(MemoryBlobStore::new()),
        BackendKind::File => Arc::new(FileBlobStore::new(&config.data_dir)),
    };

    info!(
        backend = ?config.backend,
        data_dir = %config.data_dir.display(),
        key = %config.key,
        "Opened playlist store"
    );

    Ok(PlaylistStore::with_key(backend, config.key.clone()))
}
