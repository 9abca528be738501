//! Inverse actions
//!
//! Plain values describing how to revert one mutation. Each carries only the
//! snapshot needed to undo it and is matched against current state by id, so
//! it can be applied at any later time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vidlist_core::{Playlist, PlaylistId, RemovedVideo, VideoId};

/// Operation reverting a prior mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InverseAction {
    /// Reverts a create
    ///
    /// Applies only while the playlist is still at the revision it was
    /// created with.
    #[serde(rename_all = "camelCase")]
    DeletePlaylist {
        playlist_id: PlaylistId,
        updated_at: DateTime<Utc>,
    },

    /// Reverts a delete
    RestorePlaylist { playlist: Playlist, index: usize },

    /// Reverts an add; removes the last entry of the video
    #[serde(rename_all = "camelCase")]
    RetractVideo {
        playlist_id: PlaylistId,
        video_id: VideoId,
    },

    /// Reverts a remove
    #[serde(rename_all = "camelCase")]
    RestoreVideos {
        playlist_id: PlaylistId,
        videos: Vec<RemovedVideo>,
    },

    /// Reverts a rename
    ///
    /// Applies only while the playlist is still called `current_name`.
    #[serde(rename_all = "camelCase")]
    RenamePlaylist {
        playlist_id: PlaylistId,
        name: String,
        current_name: String,
    },
}

impl InverseAction {
    /// Id of the playlist this action targets
    pub fn playlist_id(&self) -> &PlaylistId {
        match self {
            Self::DeletePlaylist { playlist_id, .. }
            | Self::RetractVideo { playlist_id, .. }
            | Self::RestoreVideos { playlist_id, .. }
            | Self::RenamePlaylist { playlist_id, .. } => playlist_id,
            Self::RestorePlaylist { playlist, .. } => &playlist.id,
        }
    }
}
