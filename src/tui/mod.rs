//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop polls with a 250ms timeout and only draws when something
//! changed: an input event, an effect asking for it, notifications expiring,
//! or the header clock rolling over to a new second.
//!
//! ## Event Dispatch
//!
//! Events are routed in a fixed order, first match wins:
//!
//! 1. Ctrl+C quits unconditionally
//! 2. Resize just redraws
//! 3. The quit dialog, when on top, takes keys and clicks
//! 4. Main screen bindings (theme, screenshot, quit)
//! 5. Tab navigation (Tab/BackTab, Left/Right, clicks on the tab bar)
//! 6. Log scrolling

pub mod component;
pub mod components;
pub mod event;
pub mod markup;
pub mod screenshot;
pub mod theme;
pub mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;
use ratatui::layout::Rect;

use crate::core::action::{Action, Effect, update};
use crate::core::clock::Moment;
use crate::core::config::{BoundAction, ResolvedConfig};
use crate::core::state::{App, QuitChoice, Screen, Tab};
use crate::tui::component::EventHandler;
use crate::tui::components::tab_bar::TabBar;
use crate::tui::components::{DialogLayout, LogViewState, Toasts};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::screenshot::{CaptureRequest, ScreenshotWorker};
use crate::tui::theme::Palette;
use crate::tui::ui::AppLayout;

const POLL_TIMEOUT: Duration = Duration::from_millis(250);
pub const CLOCK_FORMAT: &str = "%H:%M:%S";

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub log_view: LogViewState,
    /// Toast rects from the last frame, for click-to-dismiss
    pub toast_areas: Vec<(u64, Rect)>,
    /// Clock text shown in the last frame
    pub last_clock: String,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            log_view: LogViewState::new(),
            toast_areas: Vec::new(),
            last_clock: String::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, Hide)?;
        info!("Terminal modes enabled (mouse capture, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Show);
    }
}

/// Name used in the greeting: `$USER`, then `$USERNAME`, then "friend".
pub fn user_from_env<F>(env: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    ["USER", "USERNAME"]
        .iter()
        .filter_map(|key| env(key))
        .find(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "friend".to_string())
}

fn current_user() -> String {
    user_from_env(|key| std::env::var(key).ok())
}

/// Route one event. Scrolling is applied to `tui` directly; anything that
/// touches core state comes back as an `Action`.
pub fn dispatch(
    app: &App,
    tui: &mut TuiState,
    event: &TuiEvent,
    area: Rect,
    now: Moment,
) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit => return Some(Action::ForceQuit),
        TuiEvent::Resize => return None,
        _ => {}
    }

    if app.current_screen() == Screen::QuitDialog {
        return dispatch_quit_dialog(app, tui, event, area, now);
    }

    match event {
        TuiEvent::InputChar(c) => bound_action(app, *c, now),
        TuiEvent::NextFocus | TuiEvent::Right => Some(Action::NextTab),
        TuiEvent::PrevFocus | TuiEvent::Left => Some(Action::PrevTab),
        TuiEvent::MouseClick(column, row) => {
            if let Some(id) = Toasts::hit_test(&tui.toast_areas, *column, *row) {
                return Some(Action::DismissNotification(id));
            }
            let layout = AppLayout::new(area);
            TabBar::hit_test(layout.tabs, *column, *row).map(Action::SelectTab)
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToTop
        | TuiEvent::ScrollToBottom => {
            if app.active_tab == Tab::Main {
                tui.log_view.handle_event(event);
            }
            None
        }
        _ => None,
    }
}

fn dispatch_quit_dialog(
    app: &App,
    tui: &TuiState,
    event: &TuiEvent,
    area: Rect,
    now: Moment,
) -> Option<Action> {
    match event {
        TuiEvent::InputChar(c) => match app.keys.action_for(*c) {
            Some(BoundAction::Screenshot) => Some(Action::RequestScreenshot { now }),
            Some(BoundAction::Quit) => Some(Action::RequestQuit),
            _ => None,
        },
        TuiEvent::Submit => Some(Action::QuitDialogPress(app.quit_focus)),
        TuiEvent::Escape => Some(Action::QuitDialogPress(QuitChoice::Cancel)),
        TuiEvent::NextFocus | TuiEvent::PrevFocus => Some(Action::QuitDialogFocusNext),
        TuiEvent::Left => Some(Action::QuitDialogFocus(QuitChoice::Quit)),
        TuiEvent::Right => Some(Action::QuitDialogFocus(QuitChoice::Cancel)),
        TuiEvent::MouseClick(column, row) => {
            if let Some(choice) = DialogLayout::new(area).hit_test(*column, *row) {
                return Some(Action::QuitDialogPress(choice));
            }
            Toasts::hit_test(&tui.toast_areas, *column, *row).map(Action::DismissNotification)
        }
        _ => None,
    }
}

fn bound_action(app: &App, c: char, now: Moment) -> Option<Action> {
    match app.keys.action_for(c)? {
        BoundAction::ColorToggle => Some(Action::ToggleTheme { now }),
        BoundAction::Screenshot => Some(Action::RequestScreenshot { now }),
        BoundAction::Quit => Some(Action::RequestQuit),
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let terminal_mode_guard = match TerminalModeGuard::new() {
        Ok(guard) => Some(guard),
        Err(e) => {
            warn!("Failed to enable terminal modes: {}", e);
            None
        }
    };

    let result = event_loop(&mut terminal, &mut app, &mut tui);

    drop(terminal_mode_guard);
    ratatui::restore();
    info!("{} exiting", app.metadata.title);
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
) -> std::io::Result<()> {
    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut worker = ScreenshotWorker::new(tx);

    let mut needs_redraw = true; // Force first frame
    let mut mounted = false;

    loop {
        let clock = Moment::now().wall.format(CLOCK_FORMAT).to_string();
        if clock != tui.last_clock {
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, app, tui, &clock))?;
            tui.last_clock = clock;
            needs_redraw = false;
        }

        if !mounted {
            mounted = true;
            let action = Action::Mounted {
                user: current_user(),
                now: Moment::now(),
            };
            match perform(update(app, action), terminal, app, tui, &mut worker)? {
                Flow::Quit => break,
                Flow::Redraw => needs_redraw = true,
                Flow::Continue => {}
            }
        }

        // Process first event + drain ALL pending events before next draw.
        // Each action is applied before the next event is routed, so a
        // quick `q` + Enter lands on the dialog.
        let mut should_quit = false;
        let mut next = poll_event_timeout(POLL_TIMEOUT)?;
        while let Some(event) = next {
            needs_redraw = true;
            let area = terminal.get_frame().area();
            if let Some(action) = dispatch(app, tui, &event, area, Moment::now()) {
                debug!("Dispatching {:?}", action);
                match perform(update(app, action), terminal, app, tui, &mut worker)? {
                    Flow::Quit => {
                        should_quit = true;
                        break;
                    }
                    Flow::Redraw | Flow::Continue => {}
                }
            }
            next = poll_event_immediate()?;
        }

        if should_quit {
            break;
        }

        // Handle background task actions (screenshot results)
        while let Ok(action) = rx.try_recv() {
            debug!("Event loop received: {:?}", action);
            match perform(update(app, action), terminal, app, tui, &mut worker)? {
                Flow::Quit => return Ok(()),
                Flow::Redraw => needs_redraw = true,
                Flow::Continue => {}
            }
        }

        if update(app, Action::Tick { now: Moment::now() }) == Effect::Redraw {
            needs_redraw = true;
        }
    }

    Ok(())
}

enum Flow {
    Continue,
    Redraw,
    Quit,
}

/// Carry out the I/O an `Effect` asks for.
fn perform(
    effect: Effect,
    terminal: &mut DefaultTerminal,
    app: &App,
    tui: &mut TuiState,
    worker: &mut ScreenshotWorker,
) -> std::io::Result<Flow> {
    match effect {
        Effect::None => Ok(Flow::Continue),
        Effect::Redraw => Ok(Flow::Redraw),
        Effect::Quit => Ok(Flow::Quit),
        Effect::CaptureScreenshot {
            id,
            dir,
            file_name,
        } => {
            // Draw the current state so the capture matches what is on screen
            let clock = tui.last_clock.clone();
            let completed = terminal.draw(|f| ui::draw_ui(f, app, tui, &clock))?;
            worker.start(CaptureRequest {
                id,
                buffer: completed.buffer.clone(),
                title: app.metadata.title.clone(),
                palette: Palette::for_theme(app.theme),
                dir,
                file_name,
            });
            Ok(Flow::Redraw)
        }
    }
}
