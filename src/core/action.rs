//! # Actions
//!
//! Everything that can happen in the app becomes an `Action`.
//! User presses `c`? That's `Action::ToggleTheme`.
//! A screenshot finishes writing? That's `Action::ScreenshotSaved`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing any I/O the caller should
//! perform. No side effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Time comes in through the action (`Moment`), never from the clock, so
//! every transition is reproducible in tests.

use std::path::PathBuf;

use crate::core::clock::Moment;
use crate::core::notify::Severity;
use crate::core::state::{App, QuitChoice, Screen, Tab};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The UI is up and ready to be greeted.
    Mounted { user: String, now: Moment },
    ToggleTheme { now: Moment },
    RequestScreenshot { now: Moment },
    ScreenshotSaved { id: u64, path: PathBuf, now: Moment },
    ScreenshotFailed { id: u64, error: String, now: Moment },
    RequestQuit,
    QuitDialogFocus(QuitChoice),
    QuitDialogFocusNext,
    QuitDialogPress(QuitChoice),
    /// Quit without confirmation (Ctrl+C).
    ForceQuit,
    SelectTab(Tab),
    NextTab,
    PrevTab,
    Log {
        message: String,
        timestamp: bool,
        notify: bool,
        now: Moment,
    },
    Tick { now: Moment },
    DismissNotification(u64),
}

/// Work the caller must perform after `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Redraw,
    Quit,
    /// Capture the current screen and write it to `dir/file_name`.
    /// Supersedes any capture still in flight.
    CaptureScreenshot {
        id: u64,
        dir: PathBuf,
        file_name: String,
    },
}

/// `screenshot_<local ISO-8601 time>.svg`, with `:` swapped for `_` so the
/// name is valid on every filesystem.
pub fn screenshot_file_name(now: &Moment) -> String {
    let iso = now.wall.format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
    format!("screenshot_{}.svg", iso.replace(':', "_"))
}

/// Write to the activity log, optionally timestamped and mirrored as a toast.
pub fn update_log(app: &mut App, message: String, timestamp: bool, notify: bool, now: &Moment) {
    if notify {
        app.notifications
            .push(message.clone(), Severity::Information, now.instant);
    }
    app.log.write(message, timestamp, now.wall);
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Mounted { user, now } => {
            update_log(app, format!("Hello, {user} :)"), true, true, &now);
            Effect::Redraw
        }
        Action::ToggleTheme { now } => {
            app.theme = app.theme.toggle();
            let dark = if app.theme.is_dark() { "True" } else { "False" };
            let message = format!("[bold]Dark mode: {dark}");
            update_log(app, message, true, true, &now);
            Effect::Redraw
        }
        Action::RequestScreenshot { now } => {
            let id = app.next_screenshot_id;
            app.next_screenshot_id += 1;
            app.screenshot_in_flight = Some(id);
            Effect::CaptureScreenshot {
                id,
                dir: app.screenshot_dir.clone(),
                file_name: screenshot_file_name(&now),
            }
        }
        Action::ScreenshotSaved { id, path, now } => {
            if app.screenshot_in_flight != Some(id) {
                return Effect::None;
            }
            app.screenshot_in_flight = None;
            let message = format!(
                "[bold]Screenshot saved: [green]'{}'",
                crate::core::metadata::escape_markup(&path.display().to_string())
            );
            update_log(app, message, true, true, &now);
            Effect::Redraw
        }
        Action::ScreenshotFailed { id, error, now } => {
            if app.screenshot_in_flight != Some(id) {
                return Effect::None;
            }
            app.screenshot_in_flight = None;
            let message = format!(
                "[bold red]Screenshot failed: {}",
                crate::core::metadata::escape_markup(&error)
            );
            app.notifications
                .push(message.clone(), Severity::Error, now.instant);
            app.log.write(message, true, now.wall);
            Effect::Redraw
        }
        Action::RequestQuit => {
            if app.current_screen() != Screen::QuitDialog {
                app.push_screen(Screen::QuitDialog);
            }
            app.quit_focus = QuitChoice::Quit;
            Effect::Redraw
        }
        Action::QuitDialogFocus(choice) => {
            app.quit_focus = choice;
            Effect::Redraw
        }
        Action::QuitDialogFocusNext => {
            app.quit_focus = app.quit_focus.other();
            Effect::Redraw
        }
        Action::QuitDialogPress(choice) => {
            if app.current_screen() != Screen::QuitDialog {
                return Effect::None;
            }
            match choice {
                QuitChoice::Quit => {
                    app.exit_requested = true;
                    Effect::Quit
                }
                QuitChoice::Cancel => {
                    app.pop_screen();
                    Effect::Redraw
                }
            }
        }
        Action::ForceQuit => {
            app.exit_requested = true;
            Effect::Quit
        }
        Action::SelectTab(tab) => switch_tab(app, tab),
        Action::NextTab => switch_tab(app, app.active_tab.next()),
        Action::PrevTab => switch_tab(app, app.active_tab.prev()),
        Action::Log {
            message,
            timestamp,
            notify,
            now,
        } => {
            update_log(app, message, timestamp, notify, &now);
            Effect::Redraw
        }
        Action::Tick { now } => {
            if app.notifications.expire(now.instant) {
                Effect::Redraw
            } else {
                Effect::None
            }
        }
        Action::DismissNotification(id) => {
            if app.notifications.dismiss(id) {
                Effect::Redraw
            } else {
                Effect::None
            }
        }
    }
}

fn switch_tab(app: &mut App, tab: Tab) -> Effect {
    if app.current_screen() != Screen::Main || app.active_tab == tab {
        return Effect::None;
    }
    app.active_tab = tab;
    Effect::Redraw
}
