//! Notifier that records notifications for assertions.

use std::sync::Mutex;

use crate::notify::Notifier;

/// Severity of a recorded notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

/// A notification captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub body: String,
}

/// Notifier keeping every notification in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications in the order they were sent.
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn with_level(&self, level: NotificationLevel) -> Vec<Notification> {
        self.notifications()
            .into_iter()
            .filter(|n| n.level == level)
            .collect()
    }

    pub fn count(&self, level: NotificationLevel) -> usize {
        self.with_level(level).len()
    }

    fn push(&self, level: NotificationLevel, title: &str, body: &str) {
        self.notifications.lock().unwrap().push(Notification {
            level,
            title: title.to_string(),
            body: body.to_string(),
        });
    }
}

impl Notifier for RecordingNotifier {
    fn info(&self, title: &str, body: &str) {
        self.push(NotificationLevel::Info, title, body);
    }

    fn warning(&self, title: &str, body: &str) {
        self.push(NotificationLevel::Warning, title, body);
    }

    fn error(&self, title: &str, detail: &str) {
        self.push(NotificationLevel::Error, title, detail);
    }
}
