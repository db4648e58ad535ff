//! Notification seam for the one-line status notices the core emits.
//!
//! Notifications are side effects only and never part of the functional
//! contract. The trait exists so frontends can route the lines to a console
//! and tests can assert exactly when they fire.

use std::cell::RefCell;

use log::info;

/// Sink for the human-readable completion/failure lines.
pub trait NotificationSink {
    fn notify(&self, line: &str);
}

/// Default sink that routes every notice to the `log` facade.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&self, line: &str) {
        info!("{}", line);
    }
}

/// Test double that keeps every notice in memory for later assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    lines: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices received so far, in emission order.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// Whether any received notice contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|line| line.contains(needle))
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}
