//! # Core Application Logic
//!
//! This module contains the template's application state and behavior.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: Layered configuration (defaults → file → env → CLI)
//! - [`activity`]: The timestamped activity log shown on the Main tab
//! - [`notify`]: Toast notifications with expiry
//! - [`metadata`]: Title, author and version shown on the About tab
//! - [`theme`]: Dark/light theme selection
//! - [`clock`]: Wall-clock + monotonic timestamps passed into the reducer

pub mod action;
pub mod activity;
pub mod clock;
pub mod config;
pub mod metadata;
pub mod notify;
pub mod state;
pub mod theme;
