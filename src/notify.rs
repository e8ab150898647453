//! User-facing notifications.
//!
//! Rejected cart operations are reported here, one notification per rejection, instead
//! of failing the caller. The presentation layer decides how to show them.

use std::fmt::Display;

use tokio::sync::mpsc;
use tracing::warn;

/// A one-line message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
}

impl Notification {
    pub fn error(message: impl Display) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Sink for notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log. Used when nothing else listens.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        warn!(notification = %notification, "User notification");
    }
}

/// Forwards notifications to a channel, e.g. a UI toast queue or a test.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if let Err(e) = self.sender.send(notification) {
            // Receiver gone; keep the message in the log.
            warn!(notification = %e.0, "Notification dropped");
        }
    }
}
