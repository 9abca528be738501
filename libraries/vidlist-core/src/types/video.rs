//! Search result types

use super::ids::VideoId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Video as returned by a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub id: VideoId,
    pub title: String,
    pub thumbnail_url: String,
    pub channel_title: String,
}

impl VideoSummary {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        thumbnail_url: impl Into<String>,
        channel_title: impl Into<String>,
    ) -> Self {
        Self {
            id: VideoId::new(id),
            title: title.into(),
            thumbnail_url: thumbnail_url.into(),
            channel_title: channel_title.into(),
        }
    }
}

/// Video with statistics and description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    #[serde(flatten)]
    pub summary: VideoSummary,
    pub view_count: u64,

    /// `None` when the uploader hides likes
    pub like_count: Option<u64>,
    pub description: String,
    pub published_at: DateTime<Utc>,
}

/// One page of search results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    /// Results in relevance order
    pub items: Vec<VideoSummary>,

    /// Token for fetching the next page, if any
    pub next_page_token: Option<String>,

    /// Platform's estimate of the total number of matches
    pub total_results: u64,
}
