//! # Application State
//!
//! Core state for the template app. This module contains no TUI-specific
//! types. Presentation state (scroll offsets, hit-test rects) lives in
//! the `tui` module.
//!
//! ```text
//! App
//! ├── metadata: AppMetadata           // title/author/version for About
//! ├── theme: Theme                    // dark or light
//! ├── active_tab: Tab                 // Main or About
//! ├── log: ActivityLog                // Main tab contents
//! ├── notifications: Notifications    // toasts
//! ├── screens: Vec<Screen>            // modal stack, Main at the bottom
//! ├── quit_focus: QuitChoice          // focused button in the quit dialog
//! ├── keys: KeyBindings               // app-level bindings
//! ├── screenshot_dir: PathBuf         // where screenshots go
//! ├── screenshot_in_flight: Option    // id of the pending screenshot write
//! └── exit_requested: bool            // set once the user confirms quit
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::path::PathBuf;

use crate::core::activity::ActivityLog;
use crate::core::config::{KeyBindings, ResolvedConfig};
use crate::core::metadata::AppMetadata;
use crate::core::notify::Notifications;
use crate::core::theme::Theme;

/// A screen on the modal stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Main,
    QuitDialog,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Main,
    About,
}

impl Tab {
    pub fn all() -> [Tab; 2] {
        [Tab::Main, Tab::About]
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Main => "Main",
            Tab::About => "About",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Main => 0,
            Tab::About => 1,
        }
    }

    pub fn next(self) -> Self {
        let all = Tab::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn prev(self) -> Self {
        let all = Tab::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

/// Buttons of the quit confirmation dialog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuitChoice {
    #[default]
    Quit,
    Cancel,
}

impl QuitChoice {
    pub fn other(self) -> Self {
        match self {
            QuitChoice::Quit => QuitChoice::Cancel,
            QuitChoice::Cancel => QuitChoice::Quit,
        }
    }
}

pub struct App {
    pub metadata: AppMetadata,
    pub theme: Theme,
    pub active_tab: Tab,
    pub log: ActivityLog,
    pub timestamp_format: String,
    pub notifications: Notifications,
    pub max_notifications: usize,
    pub screens: Vec<Screen>,
    pub quit_focus: QuitChoice,
    pub keys: KeyBindings,
    pub screenshot_dir: PathBuf,
    /// Id of the screenshot currently being written, if any.
    pub screenshot_in_flight: Option<u64>,
    pub next_screenshot_id: u64,
    pub exit_requested: bool,
}

impl App {
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            metadata: config.metadata.clone(),
            theme: config.theme,
            active_tab: Tab::default(),
            log: ActivityLog::new(config.max_log_lines),
            timestamp_format: config.timestamp_format.clone(),
            notifications: Notifications::new(
                config.notification_timeout,
                config.max_notifications,
            ),
            max_notifications: config.max_notifications,
            screens: vec![Screen::Main],
            quit_focus: QuitChoice::default(),
            keys: config.keys,
            screenshot_dir: config.screenshot_dir.clone(),
            screenshot_in_flight: None,
            next_screenshot_id: 1,
            exit_requested: false,
        }
    }

    pub fn current_screen(&self) -> Screen {
        self.screens.last().copied().unwrap_or(Screen::Main)
    }

    pub fn push_screen(&mut self, screen: Screen) {
        self.screens.push(screen);
    }

    /// Pop the top screen. The base `Main` screen is never popped.
    pub fn pop_screen(&mut self) -> Option<Screen> {
        if self.screens.len() > 1 {
            self.screens.pop()
        } else {
            None
        }
    }
}
