//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tui-base/config.toml` (or wherever `--config` points).
//! If the default file is missing on first run, a commented-out default is
//! generated so users can discover all options.

use chrono::format::{Item, StrftimeItems};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::activity::{DEFAULT_MAX_LOG_LINES, DEFAULT_TIMESTAMP_FORMAT};
use crate::core::metadata::AppMetadata;
use crate::core::notify::{DEFAULT_MAX_NOTIFICATIONS, DEFAULT_NOTIFICATION_TIMEOUT};
use crate::core::theme::Theme;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TuiBaseConfig {
    #[serde(default)]
    pub app: AppSection,
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub keys: KeysConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AppSection {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub theme: Option<Theme>,
    pub screenshot_dir: Option<PathBuf>,
    pub timestamp_format: Option<String>,
    pub max_log_lines: Option<usize>,
    pub notification_timeout_secs: Option<u64>,
    pub max_notifications: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct KeysConfig {
    pub color_toggle: Option<String>,
    pub screenshot: Option<String>,
    pub quit: Option<String>,
}

// ============================================================================
// Key Bindings
// ============================================================================

/// Single-character bindings for the app-level actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub color_toggle: char,
    pub screenshot: char,
    pub quit: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            color_toggle: 'c',
            screenshot: 's',
            quit: 'q',
        }
    }
}

/// App-level action a bound key triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundAction {
    ColorToggle,
    Screenshot,
    Quit,
}

impl BoundAction {
    pub fn description(self) -> &'static str {
        match self {
            BoundAction::ColorToggle => "Color Toggle",
            BoundAction::Screenshot => "Screenshot",
            BoundAction::Quit => "Quit",
        }
    }
}

impl KeyBindings {
    pub fn action_for(&self, c: char) -> Option<BoundAction> {
        if c == self.color_toggle {
            Some(BoundAction::ColorToggle)
        } else if c == self.screenshot {
            Some(BoundAction::Screenshot)
        } else if c == self.quit {
            Some(BoundAction::Quit)
        } else {
            None
        }
    }

    /// Bindings in footer display order.
    pub fn entries(&self) -> [(char, BoundAction); 3] {
        [
            (self.color_toggle, BoundAction::ColorToggle),
            (self.screenshot, BoundAction::Screenshot),
            (self.quit, BoundAction::Quit),
        ]
    }
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub metadata: AppMetadata,
    pub theme: Theme,
    pub screenshot_dir: PathBuf,
    pub timestamp_format: String,
    pub max_log_lines: usize,
    pub notification_timeout: Duration,
    pub max_notifications: usize,
    pub keys: KeyBindings,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve_with_env(&TuiBaseConfig::default(), &CliOverrides::default(), |_| None)
    }
}

/// Values supplied on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub theme: Option<Theme>,
    pub screenshot_dir: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.tui-base/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tui-base").join("config.toml"))
}

/// Load config from `explicit` if given, otherwise `~/.tui-base/config.toml`.
///
/// A missing default file is generated (commented out) and yields
/// `TuiBaseConfig::default()`. A missing explicit file is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<TuiBaseConfig, ConfigError> {
    if let Some(path) = explicit {
        return parse_file(path);
    }

    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(TuiBaseConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(TuiBaseConfig::default());
    }

    parse_file(&path)
}

fn parse_file(path: &Path) -> Result<TuiBaseConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: TuiBaseConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# TUI Base Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [app]
# title = "TUI Base"
# author = "Your Name <you@example.com>"
# description = "What this application does"

# [general]
# theme = "dark"                       # "dark" or "light" (or TUI_BASE_THEME)
# screenshot_dir = "/tmp"              # Or TUI_BASE_SCREENSHOT_DIR env var
# timestamp_format = "%b %d %H:%M:%S"  # strftime format for log timestamps
# max_log_lines = 1000                 # 0 = unbounded
# notification_timeout_secs = 5        # 0 = toasts stay until dismissed
# max_notifications = 5

# [keys]
# color_toggle = "c"
# screenshot = "s"
# quit = "q"
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_CONTENT) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &TuiBaseConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], with environment lookups supplied by the caller.
pub fn resolve_with_env<F>(config: &TuiBaseConfig, cli: &CliOverrides, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = AppMetadata::default();
    let metadata = AppMetadata {
        title: config.app.title.clone().unwrap_or(defaults.title),
        author: config.app.author.clone().unwrap_or(defaults.author),
        description: config.app.description.clone().unwrap_or(defaults.description),
        ..defaults
    };

    // Theme: CLI → env → config → default
    let theme = cli
        .theme
        .or_else(|| {
            env("TUI_BASE_THEME").and_then(|name| {
                let parsed = Theme::parse(&name);
                if parsed.is_none() {
                    warn!("Ignoring unknown TUI_BASE_THEME value: {}", name);
                }
                parsed
            })
        })
        .or(config.general.theme)
        .unwrap_or_default();

    // Screenshot dir: CLI → env → config → temp dir
    let screenshot_dir = cli
        .screenshot_dir
        .clone()
        .or_else(|| env("TUI_BASE_SCREENSHOT_DIR").map(PathBuf::from))
        .or_else(|| config.general.screenshot_dir.clone())
        .unwrap_or_else(std::env::temp_dir);

    let timestamp_format = match config.general.timestamp_format.as_deref() {
        Some(fmt) if is_valid_timestamp_format(fmt) => fmt.to_string(),
        Some(fmt) => {
            warn!("Invalid timestamp_format {:?}, using default", fmt);
            DEFAULT_TIMESTAMP_FORMAT.to_string()
        }
        None => DEFAULT_TIMESTAMP_FORMAT.to_string(),
    };

    ResolvedConfig {
        metadata,
        theme,
        screenshot_dir,
        timestamp_format,
        max_log_lines: config.general.max_log_lines.unwrap_or(DEFAULT_MAX_LOG_LINES),
        notification_timeout: config
            .general
            .notification_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_NOTIFICATION_TIMEOUT),
        max_notifications: config
            .general
            .max_notifications
            .unwrap_or(DEFAULT_MAX_NOTIFICATIONS)
            .max(1),
        keys: resolve_keys(&config.keys),
    }
}

/// Resolves key bindings. Anything that isn't a single character, or that
/// collides with an earlier binding, falls back to its default.
fn resolve_keys(keys: &KeysConfig) -> KeyBindings {
    let defaults = KeyBindings::default();
    let mut taken: Vec<char> = Vec::new();

    let mut pick = |name: &str, value: Option<&String>, default: char| -> char {
        let chosen = match value.map(|v| single_char(v)) {
            Some(Some(c)) if !taken.contains(&c) => c,
            Some(Some(c)) => {
                warn!("Key '{}' for {} is already bound, using '{}'", c, name, default);
                default
            }
            Some(None) => {
                warn!("Key binding for {} must be one character, using '{}'", name, default);
                default
            }
            None => default,
        };
        taken.push(chosen);
        chosen
    };

    let color_toggle = pick("color_toggle", keys.color_toggle.as_ref(), defaults.color_toggle);
    let screenshot = pick("screenshot", keys.screenshot.as_ref(), defaults.screenshot);
    let quit = pick("quit", keys.quit.as_ref(), defaults.quit);

    let resolved = KeyBindings {
        color_toggle,
        screenshot,
        quit,
    };

    // A fallback default can still collide with a custom binding chosen earlier
    if resolved.color_toggle == resolved.screenshot
        || resolved.color_toggle == resolved.quit
        || resolved.screenshot == resolved.quit
    {
        warn!("Key bindings collide after fallback, using defaults");
        return defaults;
    }
    resolved
}

fn single_char(value: &str) -> Option<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_control() && !c.is_whitespace() => Some(c),
        _ => None,
    }
}

fn is_valid_timestamp_format(fmt: &str) -> bool {
    !StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = TuiBaseConfig::default();
        assert!(config.app.title.is_none());
        assert!(config.general.theme.is_none());
    }

    #[test]
    fn test_default_config_template_is_valid_toml() {
        let config: TuiBaseConfig = toml::from_str(DEFAULT_CONFIG_CONTENT).unwrap();
        assert!(config.general.screenshot_dir.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&TuiBaseConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.theme, Theme::Dark);
        assert_eq!(resolved.timestamp_format, DEFAULT_TIMESTAMP_FORMAT);
        assert_eq!(resolved.max_log_lines, DEFAULT_MAX_LOG_LINES);
        assert_eq!(resolved.notification_timeout, DEFAULT_NOTIFICATION_TIMEOUT);
        assert_eq!(resolved.screenshot_dir, std::env::temp_dir());
        assert_eq!(resolved.keys, KeyBindings::default());
        assert_eq!(resolved.metadata.title, "TUI Base");
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = TuiBaseConfig {
            app: AppSection {
                title: Some("My Tool".to_string()),
                author: Some("Jane".to_string()),
                description: None,
            },
            general: GeneralConfig {
                theme: Some(Theme::Light),
                screenshot_dir: Some(PathBuf::from("/var/shots")),
                timestamp_format: Some("%H:%M".to_string()),
                max_log_lines: Some(10),
                notification_timeout_secs: Some(0),
                max_notifications: Some(2),
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.metadata.title, "My Tool");
        assert_eq!(resolved.metadata.author, "Jane");
        assert_eq!(resolved.theme, Theme::Light);
        assert_eq!(resolved.screenshot_dir, PathBuf::from("/var/shots"));
        assert_eq!(resolved.timestamp_format, "%H:%M");
        assert_eq!(resolved.max_log_lines, 10);
        assert_eq!(resolved.notification_timeout, Duration::ZERO);
        assert_eq!(resolved.max_notifications, 2);
    }

    #[test]
    fn test_env_beats_config_and_cli_beats_env() {
        let config = TuiBaseConfig {
            general: GeneralConfig {
                theme: Some(Theme::Dark),
                screenshot_dir: Some(PathBuf::from("/from/config")),
                ..Default::default()
            },
            ..Default::default()
        };
        let env: HashMap<&str, &str> = [
            ("TUI_BASE_THEME", "light"),
            ("TUI_BASE_SCREENSHOT_DIR", "/from/env"),
        ]
        .into_iter()
        .collect();
        let lookup = |k: &str| env.get(k).map(|v| v.to_string());

        let resolved = resolve_with_env(&config, &CliOverrides::default(), lookup);
        assert_eq!(resolved.theme, Theme::Light);
        assert_eq!(resolved.screenshot_dir, PathBuf::from("/from/env"));

        let cli = CliOverrides {
            theme: Some(Theme::Dark),
            screenshot_dir: Some(PathBuf::from("/from/cli")),
        };
        let resolved = resolve_with_env(&config, &cli, lookup);
        assert_eq!(resolved.theme, Theme::Dark);
        assert_eq!(resolved.screenshot_dir, PathBuf::from("/from/cli"));
    }

    #[test]
    fn test_unknown_env_theme_is_ignored() {
        let config = TuiBaseConfig {
            general: GeneralConfig {
                theme: Some(Theme::Light),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), |k| {
            (k == "TUI_BASE_THEME").then(|| "neon".to_string())
        });
        assert_eq!(resolved.theme, Theme::Light);
    }

    #[test]
    fn test_invalid_timestamp_format_falls_back() {
        let config = TuiBaseConfig {
            general: GeneralConfig {
                timestamp_format: Some("%Q bad".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.timestamp_format, DEFAULT_TIMESTAMP_FORMAT);
    }

    #[test]
    fn test_custom_keys() {
        let keys = KeysConfig {
            color_toggle: Some("t".to_string()),
            screenshot: Some("p".to_string()),
            quit: Some("x".to_string()),
        };
        let resolved = resolve_keys(&keys);
        assert_eq!(resolved.action_for('t'), Some(BoundAction::ColorToggle));
        assert_eq!(resolved.action_for('p'), Some(BoundAction::Screenshot));
        assert_eq!(resolved.action_for('x'), Some(BoundAction::Quit));
        assert_eq!(resolved.action_for('c'), None);
    }

    #[test]
    fn test_multichar_key_falls_back() {
        let keys = KeysConfig {
            quit: Some("ctrl+q".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_keys(&keys).quit, 'q');
    }

    #[test]
    fn test_duplicate_key_falls_back() {
        let keys = KeysConfig {
            screenshot: Some("c".to_string()),
            ..Default::default()
        };
        let resolved = resolve_keys(&keys);
        assert_eq!(resolved.color_toggle, 'c');
        assert_eq!(resolved.screenshot, 's');
    }

    #[test]
    fn test_fallback_collision_resets_to_defaults() {
        // quit falls back to 's', which is not free if screenshot took 'q'
        let keys = KeysConfig {
            screenshot: Some("q".to_string()),
            quit: Some("too long".to_string()),
            ..Default::default()
        };
        let resolved = resolve_keys(&keys);
        assert_eq!(resolved, KeyBindings::default());
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[general]
theme = "light"

[keys]
quit = "x"
"#;
        let config: TuiBaseConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.theme, Some(Theme::Light));
        assert_eq!(config.keys.quit.as_deref(), Some("x"));
        assert!(config.app.title.is_none());
        assert!(config.general.max_log_lines.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general\ntheme = ").unwrap();
        assert!(matches!(load_config(Some(&path)), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_explicit_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(matches!(load_config(Some(&path)), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_generate_default_config_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        generate_default_config(&path);
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# TUI Base Configuration"));
    }
}
