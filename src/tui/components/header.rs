//! # Header Component
//!
//! Top bar showing the application title and a clock.
//!
//! ```text
//! ⭘                     TUI Base                     14:05:09
//! ```
//!
//! Purely presentational: it receives everything as props and has no
//! internal state. The clock text is formatted by the caller so tests can
//! pin it.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;
use crate::tui::theme::Palette;

pub const HEADER_ICON: &str = "⭘";

pub struct Header<'a> {
    pub title: &'a str,
    /// Already formatted clock, e.g. `"14:05:09"`. None hides the clock.
    pub clock: Option<String>,
    pub palette: Palette,
}

impl<'a> Header<'a> {
    pub fn new(title: &'a str, clock: Option<String>, palette: Palette) -> Self {
        Self {
            title,
            clock,
            palette,
        }
    }
}

impl Component for Header<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = self.palette.bar();
        let width = area.width as usize;

        let left = format!(" {HEADER_ICON}");
        let right = self
            .clock
            .as_ref()
            .map(|c| format!("{c} "))
            .unwrap_or_default();
        let title_width = self.title.width();
        let title_x = width.saturating_sub(title_width) / 2;

        // Left icon, centered title, right-aligned clock on one line
        let mut spans = vec![Span::styled(left.clone(), style)];
        let mut x = left.width();
        if title_x > x {
            spans.push(Span::styled(" ".repeat(title_x - x), style));
            x = title_x;
        }
        spans.push(Span::styled(
            self.title.to_string(),
            style.add_modifier(Modifier::BOLD),
        ));
        x += title_width;
        let right_x = width.saturating_sub(right.width());
        if right_x > x {
            spans.push(Span::styled(" ".repeat(right_x - x), style));
            spans.push(Span::styled(right, style));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).style(style), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(header: &mut Header<'_>, width: u16) -> Terminal<TestBackend> {
        let backend = TestBackend::new(width, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| header.render(f, f.area())).unwrap();
        terminal
    }

    fn rendered(header: &mut Header<'_>, width: u16) -> String {
        draw(header, width)
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_header_shows_title_and_clock() {
        let mut header = Header::new(
            "TUI Base",
            Some("14:05:09".to_string()),
            Palette::for_theme(Theme::Dark),
        );
        let text = rendered(&mut header, 60);
        assert!(text.contains("TUI Base"));
        assert!(text.trim_end().ends_with("14:05:09"));
        assert!(text.contains(HEADER_ICON));
    }

    #[test]
    fn test_header_without_clock() {
        let mut header = Header::new("Demo", None, Palette::for_theme(Theme::Light));
        let text = rendered(&mut header, 40);
        assert!(text.contains("Demo"));
        assert!(!text.contains(':'));
    }

    #[test]
    fn test_title_is_centered() {
        let mut header = Header::new("ABCD", None, Palette::for_theme(Theme::Dark));
        let terminal = draw(&mut header, 20);
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(8, 0)].symbol(), "A");
        assert_eq!(buffer[(11, 0)].symbol(), "D");
    }
}
