//! Non-blocking user notifications ("toasts").
//!
//! Views report outcomes through a [`Notifier`]; the host decides how to
//! show them. [`NotificationQueue`] collects them for the host to drain.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A message to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Sink for user notifications.
pub trait Notifier {
    /// Deliver a notification.
    fn notify(&self, notification: Notification);

    /// Deliver a success notification.
    fn success(&self, message: &str) {
        self.notify(Notification::success(message));
    }

    /// Deliver an error notification.
    fn error(&self, message: &str) {
        self.notify(Notification::error(message));
    }
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

/// Queue of pending notifications, also mirrored to the log.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    pending: Mutex<VecDeque<Notification>>,
}

impl NotificationQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every pending notification, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect()
    }

    /// Number of pending notifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for NotificationQueue {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => {
                tracing::info!(text = %notification.message, "Notify success");
            }
            NotificationLevel::Error => {
                tracing::warn!(text = %notification.message, "Notify error");
            }
        }
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_drains_in_order() {
        let queue = NotificationQueue::new();
        queue.success("Address saved");
        queue.error("Failed to delete address");
        assert_eq!(queue.len(), 2);

        let drained = queue.drain();
        assert_eq!(
            drained,
            vec![
                Notification::success("Address saved"),
                Notification::error("Failed to delete address"),
            ]
        );
        assert!(queue.is_empty());
    }
}
