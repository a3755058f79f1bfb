//! Transient operation-outcome notifications and their broadcast hub.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use copydesk_core::types::Timestamp;

/// How long a notification stays visible unless the caller overrides it.
pub const DEFAULT_TTL_SECS: u64 = 3;

/// Buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// Outcome class of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A single toast. Notifications are independent: they do not queue,
/// merge, or replace one another, and each expires on its own clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    /// Seconds until the notification should disappear.
    pub ttl_secs: u64,
    pub created_at: Timestamp,
}

impl Notification {
    fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            ttl_secs: DEFAULT_TTL_SECS,
            created_at: chrono::Utc::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }

    /// Override the display lifetime.
    pub fn with_ttl(mut self, ttl_secs: u64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    /// Instant after which the notification should no longer be shown.
    pub fn expires_at(&self) -> Timestamp {
        self.created_at + Duration::seconds(self.ttl_secs as i64)
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at()
    }
}

/// In-process fan-out hub for notifications.
///
/// Shared as `Arc<NotificationHub>` or cloned; subscribers attach to the
/// same underlying channel either way.
#[derive(Debug, Clone)]
pub struct NotificationHub {
    sender: broadcast::Sender<Notification>,
}

impl NotificationHub {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers. With zero subscribers the
    /// notification is dropped; that is the normal headless-test case.
    pub fn publish(&self, notification: Notification) {
        tracing::debug!(
            kind = ?notification.kind,
            message = %notification.message,
            "notification published"
        );
        let _ = self.sender.send(notification);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
