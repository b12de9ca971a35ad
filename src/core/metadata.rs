//! Application metadata shown on the About tab.

/// Descriptive information about the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppMetadata {
    pub title: String,
    pub author: String,
    pub creation_date: String,
    pub version: String,
    pub description: String,
}

pub const DEFAULT_TITLE: &str = "TUI Base";
pub const DEFAULT_CREATION_DATE: &str = "2023-06-29";
pub const DEFAULT_DESCRIPTION: &str = "This is a basic terminal UI application.\n\n\
    Used as the foundation for other projects";

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            author: env!("CARGO_PKG_AUTHORS").replace(':', ", "),
            creation_date: DEFAULT_CREATION_DATE.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

impl AppMetadata {
    /// `"<title> v<version>"`
    pub fn headline(&self) -> String {
        format!("{} v{}", self.title, self.version)
    }

    /// Author line, as console markup.
    pub fn byline(&self) -> String {
        format!("by [italic]{}[/]", escape_markup(&self.author))
    }
}

/// Escape `[` so user-supplied text is never interpreted as markup.
pub fn escape_markup(text: &str) -> String {
    text.replace('[', "\\[")
}
