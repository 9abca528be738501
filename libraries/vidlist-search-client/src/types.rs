//! Configuration and YouTube Data API response types.

use crate::error::{Result, SearchClientError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vidlist_core::{VideoDetails, VideoSummary};

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "YOUTUBE_API_KEY";

/// Default YouTube Data API endpoint
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Configuration for connecting to the YouTube Data API.
#[derive(Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub api_key: String,

    /// Base URL of the API, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Results per search page (1-50)
    #[serde(default = "default_max_results")]
    pub max_results: u8,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_max_results() -> u8 {
    10
}

impl SearchConfig {
    /// Create a config for the public API with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            max_results: default_max_results(),
        }
    }

    /// Read the API key from `YOUTUBE_API_KEY`.
    pub fn from_env() -> Result<Self> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key.trim())),
            _ => Err(SearchClientError::MissingApiKey),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_max_results(mut self, max_results: u8) -> Self {
        self.max_results = max_results;
        self
    }

    /// Check the key, URL scheme and page size.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(SearchClientError::MissingApiKey);
        }
        if self.base_url.is_empty() {
            return Err(SearchClientError::InvalidUrl("URL cannot be empty".into()));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(SearchClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        if !(1..=50).contains(&self.max_results) {
            return Err(SearchClientError::InvalidConfig(format!(
                "max_results must be between 1 and 50, got {}",
                self.max_results
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("max_results", &self.max_results)
            .finish()
    }
}

// =============================================================================
// Search Types
// =============================================================================

/// Response from `/search`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub page_info: PageInfo,
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageInfo {
    #[serde(default)]
    pub total_results: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchItem {
    pub id: SearchItemId,
    pub snippet: Snippet,
}

/// Search hits are resources; only videos carry `videoId`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchItemId {
    #[serde(default)]
    pub video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Snippet {
    pub published_at: DateTime<Utc>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
    #[serde(default)]
    pub channel_title: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Thumbnails {
    pub default: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
}

impl Thumbnails {
    /// Medium-size URL, falling back to the other sizes
    pub fn medium_url(&self) -> String {
        self.medium
            .as_ref()
            .or(self.high.as_ref())
            .or(self.default.as_ref())
            .map(|t| t.url.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Thumbnail {
    pub url: String,
}

impl SearchItem {
    /// Convert to a summary; `None` for non-video hits
    pub fn into_summary(self) -> Option<VideoSummary> {
        let id = self.id.video_id?;
        let thumbnail = self.snippet.thumbnails.medium_url();
        Some(VideoSummary::new(
            id,
            self.snippet.title,
            thumbnail,
            self.snippet.channel_title,
        ))
    }
}

// =============================================================================
// Video Types
// =============================================================================

/// Response from `/videos`.
#[derive(Debug, Deserialize)]
pub(crate) struct VideosResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideoItem {
    pub id: String,
    pub snippet: Snippet,
    #[serde(default)]
    pub statistics: Statistics,
}

/// Counts arrive as decimal strings; hidden counts are omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Statistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
}

impl VideoItem {
    pub fn into_details(self) -> Result<VideoDetails> {
        let view_count = parse_count("viewCount", self.statistics.view_count.as_deref())?;
        let like_count = parse_count("likeCount", self.statistics.like_count.as_deref())?;
        let thumbnail = self.snippet.thumbnails.medium_url();

        Ok(VideoDetails {
            summary: VideoSummary::new(
                self.id,
                self.snippet.title,
                thumbnail,
                self.snippet.channel_title,
            ),
            view_count: view_count.unwrap_or(0),
            like_count,
            description: self.snippet.description,
            published_at: self.snippet.published_at,
        })
    }
}

fn parse_count(field: &str, value: Option<&str>) -> Result<Option<u64>> {
    value
        .map(|v| {
            v.parse::<u64>().map_err(|e| {
                SearchClientError::ParseError(format!("Invalid {} '{}': {}", field, v, e))
            })
        })
        .transpose()
}

// =============================================================================
// Error Types
// =============================================================================

/// Error body returned by the API.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorDetail {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_match_public_api() {
        let config = SearchConfig::new("key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_results, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_rejects_out_of_range_page_size() {
        assert!(SearchConfig::new("key").with_max_results(0).validate().is_err());
        assert!(SearchConfig::new("key").with_max_results(51).validate().is_err());
        assert!(SearchConfig::new("key").with_max_results(50).validate().is_ok());
    }

    #[test]
    fn config_rejects_missing_key_and_bad_url() {
        assert!(matches!(
            SearchConfig::new("  ").validate(),
            Err(SearchClientError::MissingApiKey)
        ));
        assert!(matches!(
            SearchConfig::new("key").with_base_url("ftp://example.com").validate(),
            Err(SearchClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn debug_output_hides_key() {
        let debug = format!("{:?}", SearchConfig::new("secret-key"));
        assert!(!debug.contains("secret-key"));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: SearchConfig = serde_json::from_str(r#"{"api_key":"k"}"#).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_results, 10);
    }

    #[test]
    fn thumbnail_prefers_medium() {
        let thumbnails: Thumbnails = serde_json::from_str(
            r#"{"default":{"url":"d"},"medium":{"url":"m"},"high":{"url":"h"}}"#,
        )
        .unwrap();
        assert_eq!(thumbnails.medium_url(), "m");

        let thumbnails: Thumbnails = serde_json::from_str(r#"{"default":{"url":"d"}}"#).unwrap();
        assert_eq!(thumbnails.medium_url(), "d");
    }

    #[test]
    fn counts_parse_from_strings() {
        assert_eq!(parse_count("viewCount", Some("1234")).unwrap(), Some(1234));
        assert_eq!(parse_count("likeCount", None).unwrap(), None);
        assert!(parse_count("viewCount", Some("lots")).is_err());
    }
}
