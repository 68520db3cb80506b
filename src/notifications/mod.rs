//! Transient user-facing alert channel.
//!
//! The host surfaces these as non-blocking toast messages during a
//! document save ("unsupported UOM", "weight not set", price sync
//! confirmations). Delivery is best-effort and never fails the save.

use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Severity of a transient alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Warning,
}

/// Sink for transient alerts raised while processing a save.
pub trait Notifier: Send + Sync {
    fn alert(&self, level: AlertLevel, message: &str);

    fn info(&self, message: &str) {
        self.alert(AlertLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.alert(AlertLevel::Warning, message);
    }
}

/// Notifier that forwards alerts to the tracing subscriber. The default
/// for server deployments, where the host UI is out of reach.
#[derive(Debug, Default, Clone)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn alert(&self, level: AlertLevel, message: &str) {
        match level {
            AlertLevel::Info => info!(target: "rebar_pricing_api::alerts", "{message}"),
            AlertLevel::Warning => warn!(target: "rebar_pricing_api::alerts", "{message}"),
        }
    }
}

/// Notifier that records alerts for later inspection in tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<(AlertLevel, String)>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(AlertLevel, String)> {
        self.messages.lock().expect("notifier lock poisoned").clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(level, _)| *level == AlertLevel::Warning)
            .map(|(_, msg)| msg)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, level: AlertLevel, message: &str) {
        self.messages
            .lock()
            .expect("notifier lock poisoned")
            .push((level, message.to_string()));
    }
}
