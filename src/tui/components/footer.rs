//! # Footer Component
//!
//! Bottom bar listing the active key bindings:
//!
//! ```text
//!  c Color Toggle  s Screenshot  q Quit  ⇥ Switch Tab
//! ```
//!
//! While the quit dialog is open only the bindings that still work there
//! are shown.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::config::{BoundAction, KeyBindings};
use crate::tui::component::Component;
use crate::tui::theme::Palette;

pub struct Footer {
    pub keys: KeyBindings,
    pub modal_open: bool,
    pub palette: Palette,
}

impl Footer {
    pub fn new(keys: KeyBindings, modal_open: bool, palette: Palette) -> Self {
        Self {
            keys,
            modal_open,
            palette,
        }
    }

    /// `(key label, description)` pairs shown in the footer.
    pub fn hints(&self) -> Vec<(String, &'static str)> {
        if self.modal_open {
            return vec![
                ("⏎".to_string(), "Select"),
                ("⇥".to_string(), "Focus"),
                ("esc".to_string(), "Cancel"),
                (self.keys.screenshot.to_string(), BoundAction::Screenshot.description()),
            ];
        }
        let mut hints: Vec<(String, &'static str)> = self
            .keys
            .entries()
            .into_iter()
            .map(|(key, action)| (key.to_string(), action.description()))
            .collect();
        hints.push(("⇥".to_string(), "Switch Tab"));
        hints
    }
}

impl Component for Footer {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let bar = self.palette.bar();
        let key = self.palette.key_hint();

        let mut spans = Vec::new();
        for (label, description) in self.hints() {
            spans.push(Span::styled(format!(" {label} "), key));
            spans.push(Span::styled(format!("{description} "), bar));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)).style(bar), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(footer: &mut Footer) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| footer.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_default_bindings_listed() {
        let mut footer = Footer::new(KeyBindings::default(), false, Palette::for_theme(Theme::Dark));
        let text = rendered(&mut footer);
        assert!(text.contains(" c Color Toggle"));
        assert!(text.contains(" s Screenshot"));
        assert!(text.contains(" q Quit"));
        assert!(text.contains("Switch Tab"));
    }

    #[test]
    fn test_custom_bindings_listed() {
        let keys = KeyBindings {
            color_toggle: 't',
            screenshot: 'p',
            quit: 'x',
        };
        let footer = Footer::new(keys, false, Palette::for_theme(Theme::Dark));
        let hints = footer.hints();
        assert_eq!(hints[0], ("t".to_string(), "Color Toggle"));
        assert_eq!(hints[2], ("x".to_string(), "Quit"));
    }

    #[test]
    fn test_modal_hints() {
        let footer = Footer::new(KeyBindings::default(), true, Palette::for_theme(Theme::Dark));
        let hints = footer.hints();
        assert!(hints.iter().any(|(_, d)| *d == "Cancel"));
        assert!(hints.iter().any(|(k, d)| k == "s" && *d == "Screenshot"));
        assert!(!hints.iter().any(|(_, d)| *d == "Color Toggle"));
    }
}
