//! Copydesk notification infrastructure.
//!
//! Operations report their outcome as transient toast-style notifications.
//! [`NotificationHub`] is the in-process publish/subscribe point backed by
//! `tokio::sync::broadcast`; any number of presentation-layer subscribers
//! can observe every published [`Notification`] independently.

pub mod hub;

pub use hub::{Notification, NotificationHub, NotificationKind, DEFAULT_TTL_SECS};
