use crate::core::state::{App, Screen, Tab};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{About, Footer, Header, LogView, QuitDialog, TabBar, Toasts};
use crate::tui::theme::Palette;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

/// Screen regions, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub header: Rect,
    pub tabs: Rect,
    pub body: Rect,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        use Constraint::{Length, Min};
        let [header, tabs, body, footer] =
            Layout::vertical([Length(1), Length(1), Min(0), Length(1)]).areas(area);
        Self {
            header,
            tabs,
            body,
            footer,
        }
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, clock: &str) {
    let palette = Palette::for_theme(app.theme);
    let area = frame.area();
    let layout = AppLayout::new(area);
    let modal_open = app.current_screen() == Screen::QuitDialog;

    frame.render_widget(Block::default().style(palette.base()), area);

    Header::new(&app.metadata.title, Some(clock.to_string()), palette).render(frame, layout.header);
    TabBar::new(app.active_tab, palette).render(frame, layout.tabs);

    match app.active_tab {
        Tab::Main => LogView::new(&mut tui.log_view, &app.log, &app.timestamp_format, palette)
            .render(frame, layout.body),
        Tab::About => About::new(&app.metadata, palette).render(frame, layout.body),
    }

    Footer::new(app.keys, modal_open, palette).render(frame, layout.footer);

    if modal_open {
        // Dim everything behind the dialog
        frame
            .buffer_mut()
            .set_style(layout.body, Style::default().add_modifier(Modifier::DIM));
        QuitDialog::new(app.quit_focus, palette).render(frame, area);
    }

    Toasts::new(
        app.notifications.visible(app.max_notifications),
        palette,
        &mut tui.toast_areas,
    )
    .render(frame, layout.body);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::{fixed_moment, test_app};
    use crate::tui::components::quit_dialog::QUIT_QUESTION;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(app: &App, tui: &mut TuiState) -> Terminal<TestBackend> {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| draw_ui(f, app, tui, "14:05:09"))
            .unwrap();
        terminal
    }

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        (0..terminal.backend().buffer().area.height)
            .map(|y| row_text(terminal, y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_layout_regions() {
        let layout = AppLayout::new(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.header, Rect::new(0, 0, 80, 1));
        assert_eq!(layout.tabs, Rect::new(0, 1, 80, 1));
        assert_eq!(layout.body, Rect::new(0, 2, 80, 21));
        assert_eq!(layout.footer, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn test_main_screen() {
        let mut app = test_app();
        update(
            &mut app,
            Action::Mounted {
                user: "josh".to_string(),
                now: fixed_moment(),
            },
        );
        let mut tui = TuiState::new();
        let terminal = render(&app, &mut tui);

        assert!(row_text(&terminal, 0).contains("TUI Base"));
        assert!(row_text(&terminal, 0).contains("14:05:09"));
        assert!(row_text(&terminal, 1).contains("Main"));
        assert!(row_text(&terminal, 1).contains("About"));
        assert!(row_text(&terminal, 2).contains("Jun 29 14:05:09: Hello, josh :)"));
        assert!(row_text(&terminal, 23).contains("q Quit"));
        // Greeting toast
        assert_eq!(tui.toast_areas.len(), 1);
    }

    #[test]
    fn test_about_tab() {
        let mut app = test_app();
        update(&mut app, Action::SelectTab(Tab::About));
        let mut tui = TuiState::new();
        let text = screen_text(&render(&app, &mut tui));
        assert!(text.contains(&app.metadata.headline()));
        assert!(text.contains("Used as the foundation for other projects"));
    }

    #[test]
    fn test_quit_dialog_over_main() {
        let mut app = test_app();
        update(&mut app, Action::RequestQuit);
        let mut tui = TuiState::new();
        let terminal = render(&app, &mut tui);
        let text = screen_text(&terminal);
        assert!(text.contains(QUIT_QUESTION));
        assert!(row_text(&terminal, 23).contains("Cancel"));

        let body_cell = &terminal.backend().buffer()[(0, 2)];
        assert!(body_cell.modifier.contains(Modifier::DIM));
    }

    #[test]
    fn test_light_theme_changes_background() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        let dark_bg = render(&app, &mut tui).backend().buffer()[(0, 5)].bg;

        update(&mut app, Action::ToggleTheme { now: fixed_moment() });
        let light_bg = render(&app, &mut tui).backend().buffer()[(0, 5)].bg;
        assert_ne!(dark_bg, light_bg);
    }
}
