//! Mutation coordinator
//!
//! Wraps every playlist mutation: runs it against the store, brings the view
//! up to date and raises a notification carrying the inverse action.

use crate::config::{CoordinatorConfig, ViewSync};
use crate::inverse::InverseAction;
use crate::notification::{Notification, NotificationSink};
use crate::view::ViewState;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use vidlist_core::{Playlist, PlaylistId, Result, VideoId, VideoSummary, VidlistError};
use vidlist_storage::PlaylistStore;

/// Result of a coordinated mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Mutation persisted; the notification was emitted
    Applied(Notification),
    /// Mutation failed; an error notification was emitted
    Rejected(Notification),
    /// Nothing happened and nothing was emitted
    Unchanged,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn notification(&self) -> Option<&Notification> {
        match self {
            Self::Applied(n) | Self::Rejected(n) => Some(n),
            Self::Unchanged => None,
        }
    }

    /// Inverse action offered by an applied mutation
    pub fn inverse(&self) -> Option<&InverseAction> {
        match self {
            Self::Applied(n) => n.inverse.as_ref(),
            _ => None,
        }
    }
}

/// Bridges a view's rendered state and the playlist store
pub struct MutationCoordinator {
    store: Arc<PlaylistStore>,
    sink: Arc<dyn NotificationSink>,
    config: CoordinatorConfig,
    view: Mutex<ViewState>,
}

impl std::fmt::Debug for MutationCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutationCoordinator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl MutationCoordinator {
    /// Load the initial view and create the coordinator
    ///
    /// An undecodable collection is logged and shown as empty; other
    /// storage failures are returned.
    pub async fn open(
        store: Arc<PlaylistStore>,
        sink: Arc<dyn NotificationSink>,
        config: CoordinatorConfig,
    ) -> Result<Self> {
        let playlists = match store.list_playlists_strict().await {
            Ok(playlists) => playlists,
            Err(VidlistError::Codec(reason)) => {
                error!(
                    key = %store.codec().key(),
                    reason = %reason,
                    "Stored playlists are unreadable, starting with an empty view"
                );
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        info!(
            playlists = playlists.len(),
            view_sync = ?config.view_sync,
            "Opened mutation coordinator"
        );

        Ok(Self {
            store,
            sink,
            config,
            view: Mutex::new(ViewState::new(playlists)),
        })
    }

    /// Snapshot of the current view
    pub async fn view(&self) -> ViewState {
        self.view.lock().await.clone()
    }

    pub async fn playlists(&self) -> Vec<Playlist> {
        self.view.lock().await.playlists().to_vec()
    }

    pub async fn selected(&self) -> Option<PlaylistId> {
        self.view.lock().await.selected().cloned()
    }

    /// Select a playlist; returns `false` for unknown ids
    pub async fn select(&self, id: &PlaylistId) -> bool {
        self.view.lock().await.select(id)
    }

    /// Re-list the collection from the store
    pub async fn refresh(&self) -> Result<()> {
        let mut view = self.view.lock().await;
        let playlists = self.store.list_playlists().await?;
        view.replace_all(playlists);
        Ok(())
    }

    pub async fn create_playlist(&self, name: &str) -> Outcome {
        let mut view = self.view.lock().await;

        let playlist = match self.store.create_playlist(name).await {
            Ok(playlist) => playlist,
            Err(e) => return self.reject("Could not create playlist", &e),
        };

        info!(playlist_id = %playlist.id, name = %playlist.name, "Playlist created");
        let notification = Notification::success(
            "Playlist created",
            format!("\"{}\" is ready for videos.", playlist.name),
            Some(InverseAction::DeletePlaylist {
                playlist_id: playlist.id.clone(),
                updated_at: playlist.updated_at,
            }),
        );

        self.sync(&mut view, |v| v.apply_created(playlist)).await;
        self.emit(notification)
    }

    /// Delete a playlist; unknown ids are `Unchanged`
    pub async fn delete_playlist(&self, id: &PlaylistId) -> Outcome {
        let mut view = self.view.lock().await;

        let deleted = match self.store.delete_playlist(id).await {
            Ok(Some(deleted)) => deleted,
            Ok(None) => {
                // Keep the view honest if it still shows the playlist
                self.sync(&mut view, |v| v.apply_removed(id)).await;
                return Outcome::Unchanged;
            }
            Err(e) => return self.reject("Could not delete playlist", &e),
        };

        info!(playlist_id = %id, index = deleted.index, "Playlist deleted");
        let notification = Notification::success(
            "Playlist deleted",
            format!("\"{}\" was deleted.", deleted.playlist.name),
            Some(InverseAction::RestorePlaylist {
                playlist: deleted.playlist,
                index: deleted.index,
            }),
        );

        self.sync(&mut view, |v| v.apply_removed(id)).await;
        self.emit(notification)
    }

    pub async fn add_video(&self, playlist_id: &PlaylistId, video: &VideoSummary) -> Outcome {
        let mut view = self.view.lock().await;

        let playlist = match self.store.add_video_to_playlist(playlist_id, video).await {
            Ok(playlist) => playlist,
            Err(e) => return self.reject("Could not add video", &e),
        };

        info!(playlist_id = %playlist_id, video_id = %video.id, "Video added");
        let notification = Notification::success(
            "Video added",
            format!("\"{}\" was added to \"{}\".", video.title, playlist.name),
            Some(InverseAction::RetractVideo {
                playlist_id: playlist_id.clone(),
                video_id: video.id.clone(),
            }),
        );

        self.sync(&mut view, |v| v.apply_updated(playlist)).await;
        self.emit(notification)
    }

    /// Remove every entry of a video; an absent video is `Unchanged`
    pub async fn remove_video(&self, playlist_id: &PlaylistId, video_id: &VideoId) -> Outcome {
        let mut view = self.view.lock().await;

        let removal = match self
            .store
            .remove_video_from_playlist(playlist_id, video_id)
            .await
        {
            Ok(removal) => removal,
            Err(e) => return self.reject("Could not remove video", &e),
        };

        let Some(playlist) = removal.playlist else {
            return Outcome::Unchanged;
        };
        if removal.removed.is_empty() {
            return Outcome::Unchanged;
        }

        info!(
            playlist_id = %playlist_id,
            video_id = %video_id,
            removed = removal.removed.len(),
            "Video removed"
        );
        let title = removal.removed[0].video.title.clone();
        let notification = Notification::success(
            "Video removed",
            format!("\"{}\" was removed from \"{}\".", title, playlist.name),
            Some(InverseAction::RestoreVideos {
                playlist_id: playlist_id.clone(),
                videos: removal.removed,
            }),
        );

        self.sync(&mut view, |v| v.apply_updated(playlist)).await;
        self.emit(notification)
    }

    pub async fn rename_playlist(&self, id: &PlaylistId, name: &str) -> Outcome {
        let mut view = self.view.lock().await;

        let (previous, playlist) = match self.store.rename_playlist(id, name).await {
            Ok(renamed) => (renamed.previous_name, renamed.playlist),
            Err(e) => return self.reject("Could not rename playlist", &e),
        };

        info!(playlist_id = %id, from = %previous, to = %playlist.name, "Playlist renamed");
        let notification = Notification::success(
            "Playlist renamed",
            format!("\"{}\" is now \"{}\".", previous, playlist.name),
            Some(InverseAction::RenamePlaylist {
                playlist_id: id.clone(),
                name: previous,
                current_name: playlist.name.clone(),
            }),
        );

        self.sync(&mut view, |v| v.apply_updated(playlist)).await;
        self.emit(notification)
    }

    /// Apply an inverse action
    ///
    /// Emits a confirmation without a further inverse. A target that no
    /// longer matches the captured state yields `Unchanged`.
    pub async fn undo(&self, action: InverseAction) -> Outcome {
        let mut view = self.view.lock().await;
        let playlist_id = action.playlist_id().clone();

        let applied = match self.apply_inverse(&mut view, action).await {
            Ok(applied) => applied,
            Err(e) => return self.reject("Could not undo", &e),
        };

        match applied {
            Some(description) => {
                info!(playlist_id = %playlist_id, "Undo applied");
                self.emit(Notification::success("Undone", description, None))
            }
            None => {
                warn!(playlist_id = %playlist_id, "Stale undo ignored");
                Outcome::Unchanged
            }
        }
    }

    /// Run the store side of an inverse and sync the view
    ///
    /// Returns the confirmation text, or `None` for a stale action.
    async fn apply_inverse(
        &self,
        view: &mut ViewState,
        action: InverseAction,
    ) -> Result<Option<String>> {
        match action {
            InverseAction::DeletePlaylist {
                playlist_id,
                updated_at,
            } => {
                let Some(deleted) = self
                    .store
                    .delete_playlist_if_unchanged(&playlist_id, updated_at)
                    .await?
                else {
                    return Ok(None);
                };
                self.sync(view, |v| v.apply_removed(&playlist_id)).await;
                Ok(Some(format!("\"{}\" was removed.", deleted.playlist.name)))
            }

            InverseAction::RestorePlaylist { playlist, index } => {
                let name = playlist.name.clone();
                if !self.store.restore_playlist(playlist.clone(), index).await? {
                    return Ok(None);
                }
                self.sync(view, |v| v.apply_restored(playlist, index)).await;
                Ok(Some(format!("\"{}\" was restored.", name)))
            }

            InverseAction::RetractVideo {
                playlist_id,
                video_id,
            } => {
                let Some(playlist) = self.store.retract_video(&playlist_id, &video_id).await?
                else {
                    return Ok(None);
                };
                let description = format!("Video removed from \"{}\".", playlist.name);
                self.sync(view, |v| v.apply_updated(playlist)).await;
                Ok(Some(description))
            }

            InverseAction::RestoreVideos {
                playlist_id,
                videos,
            } => {
                if videos.is_empty() {
                    return Ok(None);
                }
                let Some(playlist) = self.store.restore_videos(&playlist_id, &videos).await?
                else {
                    return Ok(None);
                };
                let description = format!("Video restored to \"{}\".", playlist.name);
                self.sync(view, |v| v.apply_updated(playlist)).await;
                Ok(Some(description))
            }

            InverseAction::RenamePlaylist {
                playlist_id,
                name,
                current_name,
            } => {
                let Some(playlist) = self
                    .store
                    .rename_playlist_if(&playlist_id, &current_name, &name)
                    .await?
                else {
                    return Ok(None);
                };
                let description = format!("Name changed back to \"{}\".", playlist.name);
                self.sync(view, |v| v.apply_updated(playlist)).await;
                Ok(Some(description))
            }
        }
    }

    /// Bring the view up to date after a store mutation
    async fn sync<F>(&self, view: &mut ViewState, apply_local: F)
    where
        F: FnOnce(&mut ViewState),
    {
        match self.config.view_sync {
            ViewSync::ApplyLocal => apply_local(view),
            ViewSync::Requery => match self.store.list_playlists().await {
                Ok(playlists) => view.replace_all(playlists),
                Err(e) => {
                    warn!(error = %e, "Re-listing playlists failed, applying change locally");
                    apply_local(view);
                }
            },
        }
    }

    fn emit(&self, notification: Notification) -> Outcome {
        self.sink.notify(notification.clone());
        Outcome::Applied(notification)
    }

    fn reject(&self, title: &str, err: &VidlistError) -> Outcome {
        if err.is_user_error() {
            warn!(error = %err, "{}", title);
        } else {
            error!(error = %err, "{}", title);
        }

        let notification = Notification::error(title, err.to_string());
        self.sink.notify(notification.clone());
        Outcome::Rejected(notification)
    }
}
