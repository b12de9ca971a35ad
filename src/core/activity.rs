//! # Activity Log
//!
//! The Main tab shows a running log of what the app has done: greetings,
//! theme changes, saved screenshots. Entries are console markup strings;
//! styling happens in the TUI layer.
//!
//! The log is bounded: once `max_lines` is exceeded the oldest entries are
//! dropped. `max_lines == 0` disables the bound.

use chrono::{DateTime, Local};
use std::collections::VecDeque;

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%b %d %H:%M:%S";
pub const DEFAULT_MAX_LOG_LINES: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: Option<DateTime<Local>>,
    pub message: String,
}

impl LogEntry {
    /// Render the entry as a single markup line, prefixing the timestamp if present.
    pub fn line(&self, timestamp_format: &str) -> String {
        match self.timestamp {
            Some(ts) => format!("{}: {}", ts.format(timestamp_format), self.message),
            None => self.message.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: VecDeque<LogEntry>,
    max_lines: usize,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LOG_LINES)
    }
}

impl ActivityLog {
    pub fn new(max_lines: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_lines,
        }
    }

    pub fn write(&mut self, message: impl Into<String>, timestamp: bool, now: DateTime<Local>) {
        self.entries.push_back(LogEntry {
            timestamp: timestamp.then_some(now),
            message: message.into(),
        });
        if self.max_lines > 0 {
            while self.entries.len() > self.max_lines {
                self.entries.pop_front();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
