//! Timestamps handed to the reducer.
//!
//! `update()` never reads the clock itself. The event loop captures a
//! [`Moment`] and passes it inside the action, so tests can pin time.

use chrono::{DateTime, Local};
use std::time::Instant;

/// A point in time, as both wall-clock (for display) and monotonic (for expiry).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moment {
    pub wall: DateTime<Local>,
    pub instant: Instant,
}

impl Moment {
    pub fn now() -> Self {
        Self {
            wall: Local::now(),
            instant: Instant::now(),
        }
    }
}
