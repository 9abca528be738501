//! Notifications
//!
//! Transient, user-visible messages raised after each mutation. A successful
//! mutation carries the inverse action that backs its "Undo" button.

use crate::inverse::InverseAction;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Mutation applied
    Success,
    /// Mutation rejected or failed
    Error,
}

/// Descriptor handed to the toast display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub kind: NotificationKind,

    /// Action reverting the mutation; `None` for errors and undo confirmations
    pub inverse: Option<InverseAction>,
}

impl Notification {
    pub fn success(
        title: impl Into<String>,
        description: impl Into<String>,
        inverse: Option<InverseAction>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind: NotificationKind::Success,
            inverse,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind: NotificationKind::Error,
            inverse: None,
        }
    }

    /// Whether the notification offers an undo
    pub fn is_undoable(&self) -> bool {
        self.inverse.is_some()
    }
}

/// Fire-and-forget notification display
pub trait NotificationSink: Send + Sync {
    /// Show a notification; must not block
    fn notify(&self, notification: Notification);
}

/// Sink forwarding notifications into a channel read by the UI
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelSink {
    /// Create a sink and the receiver the UI drains
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NotificationSink for ChannelSink {
    fn notify(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            debug!("Notification receiver dropped, discarding notification");
        }
    }
}

/// Sink that drops every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, _notification: Notification) {}
}
