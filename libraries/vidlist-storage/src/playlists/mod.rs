//! Playlist store
//!
//! The store is the only writer of durable playlist state. Every operation
//! runs a full read → transform → write cycle through the [`EntityCodec`]
//! while holding the store's mutation queue, so an operation always reads the
//! result of every operation that started before it.

use crate::codec::{EntityCodec, DEFAULT_KEY};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;
use vidlist_core::{
    BlobStore, Playlist, PlaylistId, PlaylistVideo, RemovedVideo, Result, VideoId, VideoSummary,
    VidlistError,
};

/// A playlist removed from the collection, with its former position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedPlaylist {
    pub index: usize,
    pub playlist: Playlist,
}

/// A renamed playlist with the name it had just before the rename
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenamedPlaylist {
    pub previous_name: String,
    pub playlist: Playlist,
}

/// Result of removing a video from a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRemoval {
    /// Playlist after the removal, `None` if it does not exist
    pub playlist: Option<Playlist>,

    /// Removed entries with their former indices, ascending
    pub removed: Vec<RemovedVideo>,
}

impl VideoRemoval {
    /// Whether nothing was removed
    pub fn is_noop(&self) -> bool {
        self.removed.is_empty()
    }
}

/// Durable, serialized playlist CRUD
#[derive(Debug)]
pub struct PlaylistStore {
    codec: EntityCodec,
    queue: Mutex<()>,
}

impl PlaylistStore {
    /// Create a store persisting under the default key
    pub fn new(backend: Arc<dyn BlobStore>) -> Self {
        Self::with_key(backend, DEFAULT_KEY)
    }

    /// Create a store persisting under a custom key
    pub fn with_key(backend: Arc<dyn BlobStore>, key: impl Into<String>) -> Self {
        Self {
            codec: EntityCodec::new(backend, key),
            queue: Mutex::new(()),
        }
    }

    /// Codec used by this store
    pub fn codec(&self) -> &EntityCodec {
        &self.codec
    }

    /// Get all playlists in stored order
    ///
    /// An unreadable blob is treated as an empty collection.
    pub async fn list_playlists(&self) -> Result<Vec<Playlist>> {
        let _turn = self.queue.lock().await;
        self.codec.load().await
    }

    /// Get all playlists, reporting an unreadable blob as `Codec` error
    pub async fn list_playlists_strict(&self) -> Result<Vec<Playlist>> {
        let _turn = self.queue.lock().await;
        self.codec.load_strict().await
    }

    /// Get playlist by ID
    pub async fn get_playlist(&self, id: &PlaylistId) -> Result<Option<Playlist>> {
        let playlists = self.list_playlists().await?;
        Ok(playlists.into_iter().find(|p| &p.id == id))
    }

    /// Create new empty playlist
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `name` is empty after trimming
    pub async fn create_playlist(&self, name: &str) -> Result<Playlist> {
        let name = normalize_name(name)?;

        self.transact(|playlists| {
            let playlist = Playlist::with_id(PlaylistId::generate(), name, Utc::now());
            playlists.push(playlist.clone());
            debug!(playlist_id = %playlist.id, name = %playlist.name, "Created playlist");
            Ok((playlist, true))
        })
        .await
    }

    /// Rename playlist
    ///
    /// The previous name is read in the same cycle as the rename.
    ///
    /// # Errors
    /// Returns `InvalidArgument` for an empty name, `NotFound` if the playlist is absent
    pub async fn rename_playlist(&self, id: &PlaylistId, name: &str) -> Result<RenamedPlaylist> {
        let name = normalize_name(name)?;

        self.transact(|playlists| {
            let playlist = find_mut(playlists, id)
                .ok_or_else(|| VidlistError::not_found("Playlist", id.as_str()))?;

            let previous_name = std::mem::replace(&mut playlist.name, name);
            playlist.touch(Utc::now());
            debug!(
                playlist_id = %id,
                from = %previous_name,
                to = %playlist.name,
                "Renamed playlist"
            );

            let renamed = RenamedPlaylist {
                previous_name,
                playlist: playlist.clone(),
            };
            Ok((renamed, true))
        })
        .await
    }

    /// Rename playlist only while it is still called `expected_current`
    ///
    /// Returns the updated playlist, or `None` without changes if the
    /// playlist is absent or has another name.
    ///
    /// # Errors
    /// Returns `InvalidArgument` for an empty name
    pub async fn rename_playlist_if(
        &self,
        id: &PlaylistId,
        expected_current: &str,
        name: &str,
    ) -> Result<Option<Playlist>> {
        let name = normalize_name(name)?;

        self.transact(|playlists| {
            let Some(playlist) = find_mut(playlists, id) else {
                return Ok((None, false));
            };
            if playlist.name != expected_current {
                debug!(
                    playlist_id = %id,
                    expected = %expected_current,
                    actual = %playlist.name,
                    "Conditional rename skipped"
                );
                return Ok((None, false));
            }

            playlist.name = name;
            playlist.touch(Utc::now());
            debug!(playlist_id = %id, name = %playlist.name, "Renamed playlist");
            Ok((Some(playlist.clone()), true))
        })
        .await
    }

    /// Delete playlist
    ///
    /// Deleting an unknown id is a no-op. Returns the removed playlist so the
    /// caller can restore it.
    pub async fn delete_playlist(&self, id: &PlaylistId) -> Result<Option<DeletedPlaylist>> {
        self.transact(|playlists| {
            let Some(index) = playlists.iter().position(|p| &p.id == id) else {
                debug!(playlist_id = %id, "Delete of unknown playlist ignored");
                return Ok((None, false));
            };

            let playlist = playlists.remove(index);
            debug!(playlist_id = %id, index, "Deleted playlist");
            Ok((Some(DeletedPlaylist { index, playlist }), true))
        })
        .await
    }

    /// Delete playlist only while its `updated_at` equals `expected_updated_at`
    ///
    /// A playlist mutated since that snapshot, or an unknown id, is left
    /// alone and yields `None`.
    pub async fn delete_playlist_if_unchanged(
        &self,
        id: &PlaylistId,
        expected_updated_at: DateTime<Utc>,
    ) -> Result<Option<DeletedPlaylist>> {
        self.transact(|playlists| {
            let Some(index) = playlists.iter().position(|p| &p.id == id) else {
                return Ok((None, false));
            };
            if playlists[index].updated_at != expected_updated_at {
                debug!(
                    playlist_id = %id,
                    expected = %expected_updated_at,
                    actual = %playlists[index].updated_at,
                    "Conditional delete skipped, playlist changed"
                );
                return Ok((None, false));
            }

            let playlist = playlists.remove(index);
            debug!(playlist_id = %id, index, "Deleted playlist");
            Ok((Some(DeletedPlaylist { index, playlist }), true))
        })
        .await
    }

    /// Append a video to a playlist
    ///
    /// Returns the updated playlist; the new entry is its last video.
    ///
    /// # Errors
    /// Returns `NotFound` if the playlist is absent
    pub async fn add_video_to_playlist(
        &self,
        playlist_id: &PlaylistId,
        video: &VideoSummary,
    ) -> Result<Playlist> {
        self.transact(|playlists| {
            let playlist = find_mut(playlists, playlist_id)
                .ok_or_else(|| VidlistError::not_found("Playlist", playlist_id.as_str()))?;

            playlist.videos.push(PlaylistVideo::from_summary(video));
            playlist.touch(Utc::now());
            debug!(
                playlist_id = %playlist_id,
                video_id = %video.id,
                videos = playlist.videos.len(),
                "Added video to playlist"
            );
            Ok((playlist.clone(), true))
        })
        .await
    }

    /// Remove every entry of a video from a playlist
    ///
    /// Unknown playlist or video is a no-op with nothing removed;
    /// `updated_at` only changes when something was removed.
    pub async fn remove_video_from_playlist(
        &self,
        playlist_id: &PlaylistId,
        video_id: &VideoId,
    ) -> Result<VideoRemoval> {
        self.transact(|playlists| {
            let Some(playlist) = find_mut(playlists, playlist_id) else {
                let removal = VideoRemoval {
                    playlist: None,
                    removed: Vec::new(),
                };
                return Ok((removal, false));
            };

            let mut removed = Vec::new();
            let mut kept = Vec::with_capacity(playlist.videos.len());
            for (index, video) in playlist.videos.drain(..).enumerate() {
                if &video.id == video_id {
                    removed.push(RemovedVideo { index, video });
                } else {
                    kept.push(video);
                }
            }
            playlist.videos = kept;

            let changed = !removed.is_empty();
            if changed {
                playlist.touch(Utc::now());
                debug!(
                    playlist_id = %playlist_id,
                    video_id = %video_id,
                    removed = removed.len(),
                    "Removed video from playlist"
                );
            }

            let removal = VideoRemoval {
                playlist: Some(playlist.clone()),
                removed,
            };
            Ok((removal, changed))
        })
        .await
    }

    /// Reinsert a previously deleted playlist, keeping its id and timestamps
    ///
    /// Returns `false` without changes if a playlist with that id exists.
    pub async fn restore_playlist(&self, playlist: Playlist, index: usize) -> Result<bool> {
        self.transact(|playlists| {
            if playlists.iter().any(|p| p.id == playlist.id) {
                return Ok((false, false));
            }

            let index = index.min(playlists.len());
            debug!(playlist_id = %playlist.id, index, "Restored playlist");
            playlists.insert(index, playlist);
            Ok((true, true))
        })
        .await
    }

    /// Reinsert removed entries at their former positions
    ///
    /// Returns the updated playlist, or `None` without changes if the
    /// playlist no longer exists.
    pub async fn restore_videos(
        &self,
        playlist_id: &PlaylistId,
        removed: &[RemovedVideo],
    ) -> Result<Option<Playlist>> {
        self.transact(|playlists| {
            let Some(playlist) = find_mut(playlists, playlist_id) else {
                return Ok((None, false));
            };
            if removed.is_empty() {
                return Ok((Some(playlist.clone()), false));
            }

            let mut ordered: Vec<&RemovedVideo> = removed.iter().collect();
            ordered.sort_by_key(|r| r.index);
            for entry in ordered {
                let index = entry.index.min(playlist.videos.len());
                playlist.videos.insert(index, entry.video.clone());
            }

            playlist.touch(Utc::now());
            debug!(playlist_id = %playlist_id, restored = removed.len(), "Restored videos");
            Ok((Some(playlist.clone()), true))
        })
        .await
    }

    /// Remove the most recently appended entry of a video
    ///
    /// Earlier entries with the same id stay in place. Returns the updated
    /// playlist, or `None` if the playlist or the video is absent.
    pub async fn retract_video(
        &self,
        playlist_id: &PlaylistId,
        video_id: &VideoId,
    ) -> Result<Option<Playlist>> {
        self.transact(|playlists| {
            let Some(playlist) = find_mut(playlists, playlist_id) else {
                return Ok((None, false));
            };
            let Some(index) = playlist.videos.iter().rposition(|v| &v.id == video_id) else {
                return Ok((None, false));
            };

            playlist.videos.remove(index);
            playlist.touch(Utc::now());
            debug!(playlist_id = %playlist_id, video_id = %video_id, index, "Retracted video");
            Ok((Some(playlist.clone()), true))
        })
        .await
    }

    /// Run one read-modify-write cycle
    ///
    /// `apply` returns the operation result and whether the collection changed;
    /// unchanged collections are not written back.
    async fn transact<T, F>(&self, apply: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<Playlist>) -> Result<(T, bool)>,
    {
        let _turn = self.queue.lock().await;

        let mut playlists = self.codec.load().await?;
        let (output, changed) = apply(&mut playlists)?;
        if changed {
            self.codec.save(&playlists).await?;
        }

        Ok(output)
    }
}

fn find_mut<'a>(playlists: &'a mut [Playlist], id: &PlaylistId) -> Option<&'a mut Playlist> {
    playlists.iter_mut().find(|p| &p.id == id)
}

fn normalize_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(VidlistError::invalid_argument(
            "Playlist name cannot be empty",
        ));
    }
    Ok(trimmed.to_string())
}
