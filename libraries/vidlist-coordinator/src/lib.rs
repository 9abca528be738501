//! Vidlist Coordinator
//!
//! Undoable playlist mutations for view adapters.
//!
//! Each mutation goes through the [`MutationCoordinator`], which persists it
//! via the [`PlaylistStore`](vidlist_storage::PlaylistStore), updates the
//! rendered [`ViewState`] and emits a [`Notification`] whose
//! [`InverseAction`] reverts the change when passed to
//! [`MutationCoordinator::undo`].
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vidlist_coordinator::{ChannelSink, CoordinatorConfig, MutationCoordinator};
//! use vidlist_core::VideoSummary;
//! use vidlist_storage::{open_store, StorageConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(open_store(&StorageConfig::load()?)?);
//! let (sink, mut notifications) = ChannelSink::new();
//! let coordinator =
//!     MutationCoordinator::open(store, Arc::new(sink), CoordinatorConfig::default()).await?;
//!
//! let created = coordinator.create_playlist("Favorites").await;
//! if let Some(undo) = created.inverse().cloned() {
//!     coordinator.undo(undo).await;
//! }
//!
//! while let Ok(notification) = notifications.try_recv() {
//!     println!("{}: {}", notification.title, notification.description);
//! }
//! # let _ = VideoSummary::new("abc", "T1", "u1", "C1");
//! # Ok(())
//! # }
//! ```

mod config;
mod coordinator;
mod inverse;
mod notification;
mod view;

pub use config::{CoordinatorConfig, ViewSync};
pub use coordinator::{MutationCoordinator, Outcome};
pub use inverse::InverseAction;
pub use notification::{ChannelSink, Notification, NotificationKind, NotificationSink, NullSink};
pub use view::ViewState;
