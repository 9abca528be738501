//! Entity codec
//!
//! Converts between the durable text blob and the in-memory playlist
//! collection. The blob is a JSON array of playlists stored under one key.

use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};
use vidlist_core::{BlobStore, Playlist, Result, VidlistError};

/// Key the playlist collection is stored under
pub const DEFAULT_KEY: &str = "youtube_playlists";

/// Reads and writes the playlist collection through a `BlobStore`
#[derive(Clone)]
pub struct EntityCodec {
    backend: Arc<dyn BlobStore>,
    key: String,
}

impl EntityCodec {
    pub fn new(backend: Arc<dyn BlobStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Key the collection is stored under
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Serialize a collection to blob text
    pub fn encode(playlists: &[Playlist]) -> Result<String> {
        Ok(serde_json::to_string(playlists)?)
    }

    /// Parse blob text into a collection
    ///
    /// Blank text decodes to an empty collection. Text that is not a JSON
    /// array is a `Codec` error. Entries that do not decode as a playlist, or
    /// that repeat an id already seen, are dropped individually so the rest
    /// of the collection survives.
    pub fn decode(text: &str) -> Result<Vec<Playlist>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let entries: Vec<Value> =
            serde_json::from_str(text).map_err(|e| VidlistError::codec(e.to_string()))?;

        let total = entries.len();
        let mut seen = HashSet::with_capacity(total);
        let mut playlists = Vec::with_capacity(total);
        let mut malformed = 0usize;
        let mut duplicates = 0usize;

        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<Playlist>(entry) {
                Ok(playlist) if seen.insert(playlist.id.clone()) => playlists.push(playlist),
                Ok(playlist) => {
                    duplicates += 1;
                    debug!(playlist_id = %playlist.id, index, "Skipping repeated playlist id");
                }
                Err(e) => {
                    malformed += 1;
                    warn!(index, error = %e, "Skipping undecodable playlist entry");
                }
            }
        }

        if malformed + duplicates > 0 {
            warn!(
                total,
                kept = playlists.len(),
                malformed,
                duplicates,
                "Dropped playlist entries while decoding"
            );
        }

        Ok(playlists)
    }

    /// Load the collection, reporting an unreadable blob as `Codec` error
    pub async fn load_strict(&self) -> Result<Vec<Playlist>> {
        match self.backend.read(&self.key).await? {
            None => Ok(Vec::new()),
            Some(text) => Self::decode(&text),
        }
    }

    /// Load the collection
    ///
    /// An absent or unparsable blob yields an empty collection; only backend
    /// failures are returned as errors.
    pub async fn load(&self) -> Result<Vec<Playlist>> {
        match self.load_strict().await {
            Err(VidlistError::Codec(reason)) => {
                warn!(key = %self.key, %reason, "Unreadable playlist blob, treating as empty");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Overwrite the blob with the full collection
    pub async fn save(&self, playlists: &[Playlist]) -> Result<()> {
        let text = Self::encode(playlists)?;
        self.backend.write(&self.key, &text).await?;
        debug!(key = %self.key, playlists = playlists.len(), "Saved playlists");
        Ok(())
    }
}

impl std::fmt::Debug for EntityCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityCodec").field("key", &self.key).finish()
    }
}
