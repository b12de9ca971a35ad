//! # Notifications
//!
//! Short-lived toasts raised alongside log entries. Each toast carries its
//! own timeout; `expire()` is driven by the event loop's tick.

use std::time::{Duration, Instant};

pub const DEFAULT_NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_NOTIFICATIONS: usize = 5;
/// Queued toasts kept per visible slot; older ones are dropped.
const BACKLOG_PER_VISIBLE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Information,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    /// Console markup.
    pub message: String,
    pub severity: Severity,
    pub raised_at: Instant,
    /// `Duration::ZERO` keeps the toast until dismissed.
    pub timeout: Duration,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        !self.timeout.is_zero() && now.saturating_duration_since(self.raised_at) >= self.timeout
    }
}

#[derive(Debug, Clone)]
pub struct Notifications {
    items: Vec<Notification>,
    next_id: u64,
    pub timeout: Duration,
    capacity: usize,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TIMEOUT, DEFAULT_MAX_NOTIFICATIONS)
    }
}

impl Notifications {
    /// `max_visible` is the number of toasts shown at once. The queue
    /// holds a few screens' worth beyond that.
    pub fn new(timeout: Duration, max_visible: usize) -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            timeout,
            capacity: max_visible.max(1) * BACKLOG_PER_VISIBLE,
        }
    }

    /// Raise a toast with the default timeout. Returns its id.
    pub fn push(&mut self, message: impl Into<String>, severity: Severity, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Notification {
            id,
            message: message.into(),
            severity,
            raised_at: now,
            timeout: self.timeout,
        });
        if self.items.len() > self.capacity {
            let excess = self.items.len() - self.capacity;
            self.items.drain(..excess);
        }
        id
    }

    /// Drop expired toasts. Returns true if anything was removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.items.len();
        self.items.retain(|n| !n.is_expired(now));
        self.items.len() != before
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    /// The newest `limit` toasts, oldest first.
    pub fn visible(&self, limit: usize) -> &[Notification] {
        let start = self.items.len().saturating_sub(limit);
        &self.items[start..]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
