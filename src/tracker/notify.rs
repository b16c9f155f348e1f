use crate::ui::messages::{self, Level};
use std::sync::{Arc, Mutex};

/// Destination for the transient notifications raised by transitions.
pub trait Notifier {
    fn notify(&self, level: Level, message: &str);
}

/// Prints notifications to the terminal.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleNotifier {
    show_errors: bool,
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self { show_errors: true }
    }
}

impl ConsoleNotifier {
    /// Skip error notices, for callers that report the returned error themselves.
    pub fn without_errors() -> Self {
        Self { show_errors: false }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, level: Level, message: &str) {
        if level == Level::Error && !self.show_errors {
            return;
        }
        messages::show(level, message);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

/// Keeps notifications in memory. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemoryNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices().pop()
    }

    pub fn clear(&self) {
        if let Ok(mut n) = self.notices.lock() {
            n.clear();
        }
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, level: Level, message: &str) {
        if let Ok(mut n) = self.notices.lock() {
            n.push(Notice {
                level,
                message: message.to_string(),
            });
        }
    }
}
