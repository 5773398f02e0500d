//! User-facing notifications.
//!
//! The controller reports outcomes through a [`Notifier`]; a UI renders them as toasts,
//! a headless embedder can just log them.

use std::sync::{Arc, Mutex, PoisonError};
use tracing::{error, info};

/// One message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Action completed
    Success(String),
    /// Action failed
    Error(String),
}

/// Receives user-facing outcome messages.
pub trait Notifier {
    /// Reports a completed action.
    fn success(&self, message: &str);
    /// Reports a failed action. No cause detail is included.
    fn error(&self, message: &str);
}

/// Writes notifications to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(notification = "success", "{}", message);
    }

    fn error(&self, message: &str) {
        error!(notification = "error", "{}", message);
    }
}

/// Keeps every notification in order; clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    entries: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, notification: Notification) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }

    /// Snapshot of everything reported so far.
    #[must_use]
    pub fn entries(&self) -> Vec<Notification> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes and returns everything reported so far.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for NotificationLog {
    fn success(&self, message: &str) {
        self.push(Notification::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(Notification::Error(message.to_string()));
    }
}
