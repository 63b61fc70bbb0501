//! User-notification callback for orchestrator events.
//!
//! Inject an [`Arc<dyn Notifier>`] into [`crate::app::Orchestrator`] to
//! receive the transient messages a user should see: parse finished, parse
//! failed, prompts failed to load. The library never prints; the binary
//! forwards these to stderr, a GUI would turn them into toasts.
//!
//! # Example
//!
//! ```rust
//! use dotocr_client::{Notification, Notifier};
//! use std::sync::Mutex;
//!
//! #[derive(Default)]
//! struct Log(Mutex<Vec<String>>);
//!
//! impl Notifier for Log {
//!     fn notify(&self, n: &Notification) {
//!         self.0.lock().unwrap().push(n.message.clone());
//!     }
//! }
//! ```

use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// One transient message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

/// Receives notifications from the orchestrator.
///
/// `Send + Sync` so a single notifier can be shared with spawned tasks.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification) {
        let _ = notification;
    }
}

/// Discards everything. Default when no notifier is configured.
pub struct NoopNotifier;

impl Notifier for NoopNotifier {}

/// Keeps every notification in memory, oldest first.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<Notification> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Notification> {
        self.events().pop()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        if let Ok(mut events) = self.events.lock() {
            events.push(notification.clone());
        }
    }
}

/// Convenience alias matching the type stored in the orchestrator.
pub type SharedNotifier = Arc<dyn Notifier>;
