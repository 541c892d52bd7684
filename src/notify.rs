//! User-visible gesture notifications
//!
//! The dispatcher pushes a short human-readable notification to an external
//! sink (a toast system, a status line) after every dispatched gesture. The
//! sink is a pure collaborator: it holds no engine state and its behavior
//! never affects gesture dispatch.

use crate::types::GestureEvent;

/// A short human-readable description of a dispatched gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

impl Notification {
    /// Build the notification shown for a gesture.
    pub fn for_gesture(gesture: GestureEvent) -> Notification {
        let (title, description) = match gesture {
            GestureEvent::SwipeLeft => ("Swipe Left", "Previous section activated!"),
            GestureEvent::SwipeRight => ("Swipe Right", "Next section activated!"),
            GestureEvent::SwipeUp => ("Swipe Up", "Minimized view activated!"),
            GestureEvent::SwipeDown => ("Swipe Down", "Expanded view activated!"),
            GestureEvent::DoubleTap => ("Double Tap Detected", "Smart gesture activated!"),
        };
        Notification {
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

/// Sink for user-visible gesture feedback
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

/// Sink that collects notifications in memory.
///
/// Useful in tests and in hosts that poll for feedback instead of receiving
/// it push-style.
#[derive(Debug, Default)]
pub struct MemorySink {
    notifications: Vec<Notification>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

impl NotificationSink for MemorySink {
    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}
