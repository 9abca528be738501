//! View state
//!
//! The locally rendered copy of the playlist collection plus the current
//! selection. `selected` is `None` exactly when there are no playlists.

use serde::Serialize;
use vidlist_core::{Playlist, PlaylistId};

/// Playlists as rendered by a view, with the selected playlist
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    playlists: Vec<Playlist>,
    selected: Option<PlaylistId>,
}

impl ViewState {
    /// Create a view selecting the first playlist
    pub fn new(playlists: Vec<Playlist>) -> Self {
        let mut view = Self {
            playlists,
            selected: None,
        };
        view.normalize_selection();
        view
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn selected(&self) -> Option<&PlaylistId> {
        self.selected.as_ref()
    }

    /// The selected playlist itself
    pub fn selected_playlist(&self) -> Option<&Playlist> {
        let id = self.selected.as_ref()?;
        self.get(id)
    }

    pub fn get(&self, id: &PlaylistId) -> Option<&Playlist> {
        self.playlists.iter().find(|p| &p.id == id)
    }

    /// Position of a playlist in the view
    pub fn index_of(&self, id: &PlaylistId) -> Option<usize> {
        self.playlists.iter().position(|p| &p.id == id)
    }

    /// Select a playlist; unknown ids leave the selection unchanged
    pub fn select(&mut self, id: &PlaylistId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.selected = Some(id.clone());
        true
    }

    /// Replace the whole collection with a fresh listing
    pub(crate) fn replace_all(&mut self, playlists: Vec<Playlist>) {
        self.playlists = playlists;
        self.normalize_selection();
    }

    pub(crate) fn apply_created(&mut self, playlist: Playlist) {
        self.playlists.push(playlist);
        self.normalize_selection();
    }

    pub(crate) fn apply_updated(&mut self, playlist: Playlist) {
        if let Some(existing) = self.playlists.iter_mut().find(|p| p.id == playlist.id) {
            *existing = playlist;
        }
    }

    pub(crate) fn apply_removed(&mut self, id: &PlaylistId) {
        self.playlists.retain(|p| &p.id != id);
        self.normalize_selection();
    }

    pub(crate) fn apply_restored(&mut self, playlist: Playlist, index: usize) {
        if self.get(&playlist.id).is_some() {
            return;
        }
        let index = index.min(self.playlists.len());
        self.playlists.insert(index, playlist);
        self.normalize_selection();
    }

    fn normalize_selection(&mut self) {
        let still_present = self
            .selected
            .as_ref()
            .is_some_and(|id| self.playlists.iter().any(|p| &p.id == id));

        if !still_present {
            self.selected = self.playlists.first().map(|p| p.id.clone());
        }
    }
}
