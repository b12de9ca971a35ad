//! # Toasts Component
//!
//! Notifications stacked in the bottom-right corner of the body, newest at
//! the bottom. Each toast gets a severity-colored left edge and its text
//! wrapped with `textwrap` to at most `MAX_TOAST_WIDTH` columns.
//!
//! The rects drawn are written back to `areas` so a click can dismiss the
//! toast under the cursor.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, BorderType, Clear, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::notify::Notification;
use crate::tui::component::Component;
use crate::tui::markup;
use crate::tui::theme::Palette;

pub const MAX_TOAST_WIDTH: u16 = 44;
/// Left border + horizontal padding.
const CHROME_WIDTH: u16 = 4;

pub struct Toasts<'a> {
    pub notifications: &'a [Notification],
    pub palette: Palette,
    /// Filled with `(notification id, rect)` for every toast drawn.
    pub areas: &'a mut Vec<(u64, Rect)>,
}

impl<'a> Toasts<'a> {
    pub fn new(
        notifications: &'a [Notification],
        palette: Palette,
        areas: &'a mut Vec<(u64, Rect)>,
    ) -> Self {
        Self {
            notifications,
            palette,
            areas,
        }
    }

    /// Plain-text lines of a toast wrapped to `text_width`.
    pub fn wrap_message(message: &str, text_width: usize) -> Vec<String> {
        let plain = markup::strip(message);
        textwrap::wrap(&plain, text_width.max(1))
            .into_iter()
            .map(|line| line.into_owned())
            .collect()
    }

    /// Hit test a click against the last rendered toasts.
    pub fn hit_test(areas: &[(u64, Rect)], column: u16, row: u16) -> Option<u64> {
        let pos = Position::new(column, row);
        areas
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(id, _)| *id)
    }
}

impl Component for Toasts<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.areas.clear();
        if area.width <= CHROME_WIDTH || area.height == 0 {
            return;
        }

        let toast_width = MAX_TOAST_WIDTH.min(area.width.saturating_sub(2));
        let text_width = toast_width.saturating_sub(CHROME_WIDTH) as usize;
        let mut bottom = area.y + area.height;

        for notification in self.notifications.iter().rev() {
            let lines = Self::wrap_message(&notification.message, text_width);
            let longest = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
            let width = (longest + CHROME_WIDTH).min(toast_width);
            let height = lines.len() as u16;

            if bottom < area.y + height {
                break;
            }
            let y = bottom - height;
            let x = (area.x + area.width).saturating_sub(width + 1);
            let rect = Rect::new(x, y, width, height);

            let accent = self.palette.severity(notification.severity);
            let body = Style::default()
                .fg(self.palette.foreground)
                .bg(self.palette.panel);
            let block = Block::default()
                .borders(Borders::LEFT)
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(accent).bg(self.palette.panel))
                .padding(Padding::new(1, 1, 0, 0));

            let text: Vec<Line> = lines.into_iter().map(|l| Line::from(Span::raw(l))).collect();
            frame.render_widget(Clear, rect);
            frame.render_widget(Paragraph::new(text).style(body).block(block), rect);
            self.areas.push((notification.id, rect));

            // One blank row between toasts
            bottom = y.saturating_sub(1);
            if bottom <= area.y {
                break;
            }
        }
    }
}
