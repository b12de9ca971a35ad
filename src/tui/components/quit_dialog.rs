//! # Quit Dialog Component
//!
//! Modal confirmation shown when the quit binding is pressed.
//!
//! ```text
//! ┏━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┓
//! ┃                                                ┃
//! ┃         Are you sure you want to quit?         ┃
//! ┃                                                ┃
//! ┃ ┌────────────────────┐  ┌────────────────────┐ ┃
//! ┃ │        Quit        │  │       Cancel       │ ┃
//! ┃ └────────────────────┘  └────────────────────┘ ┃
//! ┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┛
//! ```
//!
//! Quit is error-styled and Cancel primary-styled. The focused button is
//! drawn bold and raised; the dialog state (focus) lives in core `App`.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::core::state::QuitChoice;
use crate::tui::component::Component;
use crate::tui::theme::Palette;

pub const QUIT_QUESTION: &str = "Are you sure you want to quit?";

const DIALOG_WIDTH: u16 = 50;
const DIALOG_HEIGHT: u16 = 9;

/// Geometry of the dialog, shared by rendering and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogLayout {
    pub dialog: Rect,
    pub question: Rect,
    pub quit: Rect,
    pub cancel: Rect,
}

impl DialogLayout {
    pub fn new(area: Rect) -> Self {
        let [dialog] = Layout::horizontal([Constraint::Length(DIALOG_WIDTH.min(area.width))])
            .flex(Flex::Center)
            .areas(area);
        let [dialog] = Layout::vertical([Constraint::Length(DIALOG_HEIGHT.min(area.height))])
            .flex(Flex::Center)
            .areas(dialog);

        let inner = Block::default().borders(Borders::ALL).inner(dialog);
        let [_, question, _, buttons] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .areas(inner);
        let [quit, cancel] = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)])
            .horizontal_margin(1)
            .spacing(2)
            .areas(buttons);

        Self {
            dialog,
            question,
            quit,
            cancel,
        }
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<QuitChoice> {
        let pos = Position::new(column, row);
        if self.quit.contains(pos) {
            Some(QuitChoice::Quit)
        } else if self.cancel.contains(pos) {
            Some(QuitChoice::Cancel)
        } else {
            None
        }
    }
}

pub struct QuitDialog {
    pub focus: QuitChoice,
    pub palette: Palette,
}

impl QuitDialog {
    pub fn new(focus: QuitChoice, palette: Palette) -> Self {
        Self { focus, palette }
    }

    fn render_button(&self, frame: &mut Frame, area: Rect, label: &str, color: Color, focused: bool) {
        let mut style = Style::default().fg(self.palette.on_button).bg(color);
        let mut border_type = BorderType::Plain;
        if focused {
            style = style.add_modifier(Modifier::BOLD);
            border_type = BorderType::Thick;
        }
        let button = Paragraph::new(label.to_string())
            .alignment(Alignment::Center)
            .style(style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(border_type)
                    .border_style(style),
            );
        frame.render_widget(button, area);
    }
}

impl Component for QuitDialog {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let layout = DialogLayout::new(area);
        let panel = Style::default()
            .fg(self.palette.foreground)
            .bg(self.palette.surface);

        frame.render_widget(Clear, layout.dialog);
        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(self.palette.primary).bg(self.palette.surface))
                .style(panel),
            layout.dialog,
        );
        frame.render_widget(
            Paragraph::new(QUIT_QUESTION)
                .alignment(Alignment::Center)
                .style(panel),
            layout.question,
        );

        self.render_button(
            frame,
            layout.quit,
            "Quit",
            self.palette.error,
            self.focus == QuitChoice::Quit,
        );
        self.render_button(
            frame,
            layout.cancel,
            "Cancel",
            self.palette.primary,
            self.focus == QuitChoice::Cancel,
        );
    }
}
