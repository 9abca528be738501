//! Coordinator configuration

use serde::{Deserialize, Serialize};

/// How the view is brought up to date after a store mutation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewSync {
    /// Re-list the whole collection from the store
    #[default]
    Requery,
    /// Apply the returned snapshot to the local view
    ApplyLocal,
}

/// Coordinator configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    #[serde(default)]
    pub view_sync: ViewSync,
}

impl CoordinatorConfig {
    pub fn with_view_sync(view_sync: ViewSync) -> Self {
        Self { view_sync }
    }
}
