//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use chrono::{Local, TimeZone};
use std::time::Instant;

use crate::core::clock::Moment;
use crate::core::config::ResolvedConfig;
use crate::core::state::App;

/// Creates a test App from the built-in defaults.
pub fn test_app() -> App {
    App::from_config(&ResolvedConfig::default())
}

/// A fixed moment (2023-06-29 14:05:09 local) for deterministic log lines.
pub fn fixed_moment() -> Moment {
    Moment {
        wall: Local
            .with_ymd_and_hms(2023, 6, 29, 14, 5, 9)
            .single()
            .unwrap_or_else(Local::now),
        instant: Instant::now(),
    }
}
