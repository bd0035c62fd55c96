//! Decode diagnostics.
//!
//! Recoverable issues met while decoding (dropped table entries, skipped
//! records, dangling handles) never fail a read. They are collected as
//! [`Notification`] items on [`CadDocument::notifications`] and mirrored to
//! the `tracing` facade.
//!
//! [`CadDocument::notifications`]: crate::document::CadDocument::notifications

use std::fmt;

/// Category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// A record type or section the decoder does not read.
    NotImplemented,
    /// A reference that could not be resolved after the read.
    Unresolved,
    /// Non-fatal warning (dropped entry, defaulted value).
    Warning,
    /// A record-level failure absorbed in failsafe mode.
    Error,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotImplemented => write!(f, "NotImplemented"),
            Self::Unresolved => write!(f, "Unresolved"),
            Self::Warning => write!(f, "Warning"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// A single diagnostic produced while decoding.
#[derive(Debug, Clone)]
pub struct Notification {
    pub notification_type: NotificationType,
    pub message: String,
    /// Cursor position when the issue was met, if any
    pub position: Option<u64>,
}

impl Notification {
    pub fn new(notification_type: NotificationType, message: impl Into<String>) -> Self {
        Self {
            notification_type,
            message: message.into(),
            position: None,
        }
    }

    /// Attach the cursor position.
    pub fn at(mut self, position: u64) -> Self {
        self.position = Some(position);
        self
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(pos) => write!(f, "[{}] {} (at {})", self.notification_type, self.message, pos),
            None => write!(f, "[{}] {}", self.notification_type, self.message),
        }
    }
}

/// Collects notifications during a read.
#[derive(Debug, Clone, Default)]
pub struct NotificationCollection {
    items: Vec<Notification>,
}

impl NotificationCollection {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a notification and emit it as a `tracing` event.
    pub fn notify(&mut self, notification_type: NotificationType, message: impl Into<String>) {
        self.push(Notification::new(notification_type, message));
    }

    /// Record a notification carrying a cursor position.
    pub fn notify_at(
        &mut self,
        notification_type: NotificationType,
        message: impl Into<String>,
        position: u64,
    ) {
        self.push(Notification::new(notification_type, message).at(position));
    }

    fn push(&mut self, notification: Notification) {
        match notification.notification_type {
            NotificationType::Error => {
                tracing::error!(position = ?notification.position, "{}", notification.message)
            }
            NotificationType::NotImplemented => {
                tracing::debug!(position = ?notification.position, "{}", notification.message)
            }
            _ => tracing::warn!(position = ?notification.position, "{}", notification.message),
        }
        self.items.push(notification);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.items.iter()
    }

    /// Get all notifications of a specific type.
    pub fn of_type(&self, nt: NotificationType) -> Vec<&Notification> {
        self.items.iter().filter(|n| n.notification_type == nt).collect()
    }

    /// Check whether any notification of the given type exists.
    pub fn has_type(&self, nt: NotificationType) -> bool {
        self.items.iter().any(|n| n.notification_type == nt)
    }
}

impl<'a> IntoIterator for &'a NotificationCollection {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
