//! Vidlist Search Client
//!
//! HTTP client for the YouTube Data API v3.
//!
//! # Features
//!
//! - **Search**: free-text video search, one page per call
//! - **Details**: snippet and statistics for a single video
//!
//! [`YouTubeClient`] implements [`VideoSearch`](vidlist_core::VideoSearch),
//! so callers can depend on the trait and swap in a fake for tests.
//!
//! # Example
//!
//! ```no_run
//! use vidlist_search_client::{SearchConfig, YouTubeClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = YouTubeClient::new(SearchConfig::from_env()?)?;
//!
//! let results = client.search("lofi beats").await?;
//! if let Some(first) = results.items.first() {
//!     let details = client.video_details(first.id.as_str()).await?;
//!     println!("{} has {} views", details.summary.title, details.view_count);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod types;

pub use client::YouTubeClient;
pub use error::{Result, SearchClientError};
pub use types::{SearchConfig, API_KEY_ENV, DEFAULT_BASE_URL};
