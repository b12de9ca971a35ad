//! About tab: headline, description and byline stacked vertically.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, Padding, Paragraph, Wrap};

use crate::core::metadata::{AppMetadata, escape_markup};
use crate::tui::component::Component;
use crate::tui::markup;
use crate::tui::theme::Palette;

pub struct About<'a> {
    pub metadata: &'a AppMetadata,
    pub palette: Palette,
}

impl<'a> About<'a> {
    pub fn new(metadata: &'a AppMetadata, palette: Palette) -> Self {
        Self { metadata, palette }
    }

    fn text(&self) -> Text<'static> {
        let base = self.palette.base();
        let mut lines: Vec<Line<'static>> = vec![
            markup::render_line(
                &escape_markup(&self.metadata.headline()),
                base.add_modifier(Modifier::BOLD),
                false,
            ),
            Line::default(),
        ];
        lines.extend(markup::render(&escape_markup(&self.metadata.description), base, false).lines);
        lines.push(Line::default());
        lines.push(markup::render_line(&self.metadata.byline(), base, false));
        Text::from(lines)
    }
}

impl Component for About<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(self.text())
            .style(self.palette.base())
            .block(Block::default().padding(Padding::new(2, 2, 1, 1)))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_about_shows_metadata() {
        let meta = AppMetadata {
            title: "Demo".to_string(),
            version: "1.2.3".to_string(),
            author: "Jane Doe".to_string(),
            ..Default::default()
        };
        let backend = TestBackend::new(60, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| About::new(&meta, Palette::for_theme(Theme::Dark)).render(f, f.area()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Demo v1.2.3"));
        assert!(text.contains("This is a basic terminal UI application."));
        assert!(text.contains("by Jane Doe"));
    }

    #[test]
    fn test_author_is_italic() {
        let meta = AppMetadata {
            author: "Jane".to_string(),
            ..Default::default()
        };
        let about = About::new(&meta, Palette::for_theme(Theme::Dark));
        let text = about.text();
        let byline = text.lines.last().unwrap();
        let author = byline.spans.iter().find(|s| s.content == "Jane").unwrap();
        assert!(author.style.add_modifier.contains(Modifier::ITALIC));
    }
}
