//! Playlist domain types
//!
//! Playlists are persisted as a single JSON array; field names are camelCase
//! so blobs written by earlier versions of the app decode unchanged.

use super::ids::{PlaylistId, VideoId};
use super::video::VideoSummary;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Named, ordered collection of videos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Unique playlist identifier, immutable
    pub id: PlaylistId,

    /// Display name, never empty
    pub name: String,

    /// Videos in insertion order; duplicate ids are allowed
    #[serde(default)]
    pub videos: Vec<PlaylistVideo>,

    /// Creation timestamp, immutable
    pub created_at: DateTime<Utc>,

    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

impl Playlist {
    /// Create a new empty playlist
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(PlaylistId::generate(), name, Utc::now())
    }

    /// Create an empty playlist with a specific ID and creation time
    pub fn with_id(id: PlaylistId, name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            videos: Vec::new(),
            created_at,
            updated_at: created_at,
        }
    }

    /// Whether any entry carries this video id
    pub fn contains_video(&self, video_id: &VideoId) -> bool {
        self.videos.iter().any(|v| &v.id == video_id)
    }

    /// Advance `updated_at` to `now`
    ///
    /// Every touch moves the timestamp strictly forward, by a single
    /// microsecond when the clock has not passed the stored value, so a
    /// snapshot's `updated_at` identifies that exact revision.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }
}

/// Denormalized snapshot of a video, captured when it was added
///
/// The display fields are never refreshed, even if the video's metadata
/// changes on the platform later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistVideo {
    /// Platform video identifier
    pub id: VideoId,

    /// Video title at add-time
    pub title: String,

    /// Thumbnail URL at add-time
    pub thumbnail: String,

    /// Channel name at add-time
    pub channel_title: String,

    /// ISO-8601 duration, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl PlaylistVideo {
    /// Capture a search result as a playlist entry
    pub fn from_summary(summary: &VideoSummary) -> Self {
        Self {
            id: summary.id.clone(),
            title: summary.title.clone(),
            thumbnail: summary.thumbnail_url.clone(),
            channel_title: summary.channel_title.clone(),
            duration: None,
        }
    }
}

/// A playlist entry removed from its playlist, with its former position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovedVideo {
    /// Index the entry occupied before removal
    pub index: usize,

    /// The removed entry
    pub video: PlaylistVideo,
}
