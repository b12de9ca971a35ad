//! # LogView Component
//!
//! Scrollable view of the activity log on the Main tab.
//!
//! ## Responsibilities
//!
//! - Render each entry as highlighted markup, wrapped to the view width
//! - Stick to the bottom as new entries arrive, unless the user scrolled up
//! - Keyboard and wheel scrolling
//!
//! ## Architecture
//!
//! `LogView` is a transient component (created each frame) that wraps
//! `&'a mut LogViewState` (persistent state) and the `ActivityLog` (props).
//! Heights are measured with `Paragraph::line_count` each frame; the log is
//! bounded so this stays cheap.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::widgets::{Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::activity::ActivityLog;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::markup;
use crate::tui::theme::Palette;

/// Scroll state for the log view. Persisted in `TuiState`.
pub struct LogViewState {
    pub scroll_state: ScrollViewState,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Total wrapped height of all entries at the last render
    pub content_height: u16,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for LogViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl LogViewState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true,
            content_height: 0,
            viewport_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll once the user has scrolled back to the end.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Stop following new entries. A log that fits in the view has
    /// nowhere to scroll, so it stays pinned.
    fn unpin(&mut self) {
        self.stick_to_bottom = self.max_offset() == 0;
    }

    pub fn offset(&self) -> u16 {
        self.scroll_state.offset().y
    }
}

impl EventHandler for LogViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.unpin();
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.unpin();
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToTop => {
                self.scroll_state.set_offset(Position { x: 0, y: 0 });
                self.unpin();
            }
            TuiEvent::ScrollToBottom => {
                let max_y = self.max_offset();
                self.scroll_state.set_offset(Position { x: 0, y: max_y });
                self.stick_to_bottom = true;
            }
            _ => {}
        }
        None
    }
}

pub struct LogView<'a> {
    pub state: &'a mut LogViewState,
    pub log: &'a ActivityLog,
    pub timestamp_format: &'a str,
    pub palette: Palette,
}

impl<'a> LogView<'a> {
    pub fn new(
        state: &'a mut LogViewState,
        log: &'a ActivityLog,
        timestamp_format: &'a str,
        palette: Palette,
    ) -> Self {
        Self {
            state,
            log,
            timestamp_format,
            palette,
        }
    }
}

impl Component for LogView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let base = self.palette.base();

        let paragraphs: Vec<(Paragraph<'static>, u16)> = self
            .log
            .iter()
            .map(|entry| {
                let text = markup::render(&entry.line(self.timestamp_format), base, true);
                let paragraph = Paragraph::new(text)
                    .style(base)
                    .wrap(Wrap { trim: false });
                let height = paragraph.line_count(content_width).max(1) as u16;
                (paragraph, height)
            })
            .collect();

        let total_height: u16 = paragraphs
            .iter()
            .fold(0u16, |acc, (_, h)| acc.saturating_add(*h));
        self.state.content_height = total_height;
        self.state.viewport_height = area.height;

        frame.render_widget(Paragraph::new("").style(base), area);

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        // Fill the canvas with the theme background before the entries
        scroll_view.render_widget(
            Paragraph::new("").style(base),
            Rect::new(0, 0, content_width, total_height),
        );

        // Only entries inside the viewport are rendered into the canvas
        let offset = if self.state.stick_to_bottom {
            self.state.max_offset()
        } else {
            self.state.clamp_scroll();
            self.state.offset()
        };
        let visible_end = offset.saturating_add(area.height);

        let mut y: u16 = 0;
        for (paragraph, height) in paragraphs {
            let bottom = y.saturating_add(height);
            if bottom > offset && y < visible_end {
                scroll_view.render_widget(paragraph, Rect::new(0, y, content_width, height));
            }
            y = bottom;
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.set_offset(Position { x: 0, y: offset });
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
