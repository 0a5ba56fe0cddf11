//! Transient user notifications (toasts).

use std::sync::Mutex;

/// Fire-and-forget notification sink.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
}

/// Notifier that only logs. Used by headless hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(text = message, "notification shown");
    }
}

/// Notifier that keeps every message, newest last.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

/// The single on-screen toast.
///
/// Every `show` replaces the message and hands back a ticket; `expire` clears
/// the slot only while that ticket's message is still the one displayed, so a
/// stale timer never hides a newer toast.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastSlot {
    message: Option<String>,
    shown: u64,
}

impl ToastSlot {
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn show(&mut self, message: &str) -> u64 {
        self.shown += 1;
        self.message = Some(message.to_string());
        self.shown
    }

    /// Returns `true` if the slot was cleared.
    pub fn expire(&mut self, ticket: u64) -> bool {
        if ticket != self.shown || self.message.is_none() {
            return false;
        }
        self.message = None;
        true
    }
}
