//! YouTube Data API client.

use crate::error::{Result, SearchClientError};
use crate::types::{ApiErrorBody, SearchConfig, SearchResponse, VideosResponse};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;
use vidlist_core::{SearchResults, VideoDetails, VideoSearch};

/// Client for video search and video details.
///
/// # Example
///
/// ```no_run
/// use vidlist_search_client::{SearchConfig, YouTubeClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = YouTubeClient::new(SearchConfig::from_env()?)?;
///
/// let results = client.search("rust async").await?;
/// for video in &results.items {
///     println!("{} ({})", video.title, video.channel_title);
/// }
/// # Ok(())
/// # }
/// ```
pub struct YouTubeClient {
    http: Client,
    base_url: Url,
    api_key: String,
    max_results: u8,
}

impl YouTubeClient {
    /// Create a new client with the given configuration.
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;

        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| SearchClientError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(SearchClientError::InvalidUrl(config.base_url));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Vidlist/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key,
            max_results: config.max_results,
        })
    }

    /// Get the API base URL.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Search for videos matching a free-text query.
    pub async fn search(&self, query: &str) -> Result<SearchResults> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchClientError::InvalidArgument(
                "Search query cannot be empty".into(),
            ));
        }

        let max_results = self.max_results.to_string();
        let url = self.endpoint(
            "search",
            &[
                ("part", "snippet"),
                ("type", "video"),
                ("maxResults", &max_results),
                ("q", query),
            ],
        )?;

        debug!(query = %query, "Searching videos");
        let response: SearchResponse = self.get_json(url, "search").await?;

        let total_results = response.page_info.total_results;
        let next_page_token = response.next_page_token;
        let items: Vec<_> = response
            .items
            .into_iter()
            .filter_map(|item| item.into_summary())
            .collect();

        debug!(
            query = %query,
            results = items.len(),
            total_results,
            "Search completed"
        );

        Ok(SearchResults {
            items,
            next_page_token,
            total_results,
        })
    }

    /// Get snippet and statistics for one video.
    pub async fn video_details(&self, video_id: &str) -> Result<VideoDetails> {
        let video_id = video_id.trim();
        if video_id.is_empty() {
            return Err(SearchClientError::InvalidArgument(
                "Video id cannot be empty".into(),
            ));
        }

        let url = self.endpoint("videos", &[("part", "snippet,statistics"), ("id", video_id)])?;

        debug!(video_id = %video_id, "Fetching video details");
        let response: VideosResponse = self.get_json(url, "video details").await?;

        let item = response
            .items
            .into_iter()
            .next()
            .ok_or_else(|| SearchClientError::NotFound(video_id.to_string()))?;

        item.into_details()
    }

    /// Build an endpoint URL with query parameters and the API key.
    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| SearchClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(path);

        url.query_pairs_mut()
            .extend_pairs(params)
            .append_pair("key", &self.api_key);

        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T> {
        let endpoint = url.path().to_string();
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(|e| {
                SearchClientError::ParseError(format!("Failed to parse {} response: {}", what, e))
            })
        } else {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);

            warn!(
                endpoint = %endpoint,
                status = status.as_u16(),
                message = %message,
                "YouTube API request failed"
            );

            Err(SearchClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl VideoSearch for YouTubeClient {
    async fn search_videos(&self, query: &str) -> vidlist_core::Result<SearchResults> {
        Ok(self.search(query).await?)
    }

    async fn get_video_details(&self, video_id: &str) -> vidlist_core::Result<VideoDetails> {
        Ok(self.video_details(video_id).await?)
    }
}

impl std::fmt::Debug for YouTubeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YouTubeClient")
            .field("base_url", &self.base_url.as_str())
            .field("max_results", &self.max_results)
            .finish_non_exhaustive()
    }
}
