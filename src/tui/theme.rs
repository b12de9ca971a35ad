//! Concrete colors for each [`Theme`].
//!
//! Everything is RGB so the rendered buffer (and therefore screenshots)
//! looks the same regardless of the terminal's own palette.

use ratatui::style::{Color, Modifier, Style};

use crate::core::notify::Severity;
use crate::core::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub panel: Color,
    pub foreground: Color,
    pub muted: Color,
    pub accent: Color,
    pub primary: Color,
    pub error: Color,
    pub warning: Color,
    pub success: Color,
    pub on_button: Color,
}

const DARK: Palette = Palette {
    background: Color::Rgb(18, 18, 18),
    surface: Color::Rgb(30, 30, 30),
    panel: Color::Rgb(36, 47, 56),
    foreground: Color::Rgb(224, 224, 224),
    muted: Color::Rgb(128, 128, 128),
    accent: Color::Rgb(255, 166, 43),
    primary: Color::Rgb(0, 120, 212),
    error: Color::Rgb(186, 60, 91),
    warning: Color::Rgb(255, 166, 43),
    success: Color::Rgb(78, 191, 113),
    on_button: Color::Rgb(255, 255, 255),
};

const LIGHT: Palette = Palette {
    background: Color::Rgb(239, 239, 239),
    surface: Color::Rgb(245, 245, 245),
    panel: Color::Rgb(208, 220, 230),
    foreground: Color::Rgb(30, 30, 30),
    muted: Color::Rgb(110, 110, 110),
    accent: Color::Rgb(192, 96, 0),
    primary: Color::Rgb(0, 90, 170),
    error: Color::Rgb(170, 40, 70),
    warning: Color::Rgb(170, 110, 0),
    success: Color::Rgb(30, 130, 60),
    on_button: Color::Rgb(255, 255, 255),
};

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => DARK,
            Theme::Light => LIGHT,
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn bar(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.panel)
    }

    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.panel)
            .add_modifier(Modifier::BOLD)
    }

    pub fn severity(&self, severity: Severity) -> Color {
        match severity {
            Severity::Information => self.success,
            Severity::Warning => self.warning,
            Severity::Error => self.error,
        }
    }
}
