//! # TabBar Component
//!
//! One-line strip of tab titles with the active tab underlined.
//! Stateless; `hit_test` maps a mouse column back to a tab using the same
//! geometry `render` uses.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::core::state::Tab;
use crate::tui::component::Component;
use crate::tui::theme::Palette;

const TAB_PADDING: usize = 2;

pub struct TabBar {
    pub active: Tab,
    pub palette: Palette,
}

impl TabBar {
    pub fn new(active: Tab, palette: Palette) -> Self {
        Self { active, palette }
    }

    /// Column ranges `[start, end)` of each tab label, relative to the bar's left edge.
    fn spans_layout() -> Vec<(Tab, usize, usize)> {
        let mut x = 1;
        Tab::all()
            .into_iter()
            .map(|tab| {
                let width = tab.title().width() + TAB_PADDING * 2;
                let entry = (tab, x, x + width);
                x += width;
                entry
            })
            .collect()
    }

    /// Which tab, if any, sits under `column` within `area`.
    pub fn hit_test(area: Rect, column: u16, row: u16) -> Option<Tab> {
        if row != area.y || column < area.x || column >= area.x + area.width {
            return None;
        }
        let rel = (column - area.x) as usize;
        Self::spans_layout()
            .into_iter()
            .find(|(_, start, end)| rel >= *start && rel < *end)
            .map(|(tab, _, _)| tab)
    }
}

impl Component for TabBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let base = Style::default()
            .fg(self.palette.muted)
            .bg(self.palette.surface);
        let active = Style::default()
            .fg(self.palette.accent)
            .bg(self.palette.surface)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

        let mut spans = vec![Span::styled(" ", base)];
        for (tab, _, _) in Self::spans_layout() {
            let pad = " ".repeat(TAB_PADDING);
            let style = if tab == self.active { active } else { base };
            spans.push(Span::styled(pad.clone(), base));
            spans.push(Span::styled(tab.title(), style));
            spans.push(Span::styled(pad, base));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).style(base), area);
    }
}
