//! Configuration management for Birthboard.
//!
//! Configuration is read from `~/.config/birthboard/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod keybindings;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;

use serde::Deserialize;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://api.wikimedia.org";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

/// Remote births service settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub user_agent: String,
    /// No timeout unless set.
    pub timeout_secs: Option<u64>,
    pub discard_stale_responses: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("birthboard/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: None,
            discard_stale_responses: false,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/birthboard/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("birthboard").join("config.toml"))
    }

    /// Where the TUI writes its log: `~/.cache/birthboard/birthboard.log`
    pub fn default_log_path() -> Result<PathBuf, ConfigError> {
        let cache_dir = dirs::cache_dir().ok_or(ConfigError::NoCacheDir)?;
        Ok(cache_dir.join("birthboard").join("birthboard.log"))
    }

    /// Open a log file for appending, creating its directory if needed.
    pub fn open_log_file(path: &Path) -> Result<File, ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(path, Self::default_config_content()).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::info!("Wrote default config to {}", path.display());
        Ok(())
    }

    fn default_config_content() -> &'static str {
        r##"# Birthboard Configuration
#
# Colors can be specified as:
# - Named colors: Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
#   DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
#   LightCyan, White, Reset
# - Hex colors: "#RRGGBB" or "#RGB"
#
# Keybindings can be specified as:
# - Single characters: "a", "A", "1", "/"
# - Special keys: Enter, Tab, BackTab, Backspace, Delete, Home, End,
#   PageUp, PageDown, Up, Down, Left, Right, Esc, Space, F1-F12
# - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter"

[api]
# Births are requested from
#   {base_url}/feed/v1/wikipedia/en/onthisday/births/{MM}/{DD}
base_url = "https://api.wikimedia.org"

# Sent with every request
user_agent = "birthboard/0.1.0"

# Request timeout in seconds (no timeout when omitted)
# timeout_secs = 30

# When several lookups overlap, the one that finishes last is shown.
# Set to true to only show the lookup for the most recent selection.
discard_stale_responses = false

[colors]
# Border colors
active_border = "Cyan"
inactive_border = "DarkGray"

# Selection highlight
selection_bg_active = "Cyan"
selection_fg_active = "Black"
selection_bg_inactive = "DarkGray"
selection_fg_inactive = "White"

# Calendar
weekday_header = "Gray"
today = "Yellow"
selected_day = "Green"

# Favourites
favourite_marker = "Yellow"
favourite_date = "LightCyan"

# Messages
notice = "Red"
error = "LightRed"

# Search line
search_active = "Yellow"
search_disabled = "DarkGray"

# Status bar
status_fg = "White"
status_bg = "DarkGray"

[keybindings]
# Navigation
quit = ["q", "Ctrl+c"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
move_left = ["h", "Left"]
move_right = ["l", "Right"]
next_month = ["n", "PageDown"]
prev_month = ["p", "PageUp"]
today = ["t", "Home"]
next_pane = ["Tab"]
prev_pane = ["BackTab", "Shift+Tab"]

# Actions
select = ["Enter"]
toggle_favourite = ["f", "Space"]
search = ["/"]
open_in_browser = ["o"]
"##
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Could not determine cache directory")]
    NoCacheDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;
    use std::io::Write;

    #[test]
    fn test_open_log_file_creates_directory_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("birthboard.log");

        writeln!(Config::open_log_file(&path).unwrap(), "first").unwrap();
        writeln!(Config::open_log_file(&path).unwrap(), "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_default_config_deserializes() {
        let config: Config = toml::from_str(Config::default_config_content())
            .expect("Default config should be valid TOML");

        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout_secs, None);
        assert!(!config.api.discard_stale_responses);
        assert_eq!(config.colors.active_border, Color::Cyan);
        assert_eq!(config.colors.notice, Color::Red);
        assert_eq!(config.keybindings.quit, vec!["q", "Ctrl+c"]);
        assert_eq!(config.keybindings.toggle_favourite, vec!["f", "Space"]);
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[api]
timeout_secs = 5

[colors]
favourite_marker = "#FF0000"
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.api.timeout_secs, Some(5));
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.colors.favourite_marker, Color::Rgb(255, 0, 0));
        assert_eq!(config.colors.inactive_border, Color::DarkGray);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");

        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert!(config.api.user_agent.starts_with("birthboard/"));
        assert_eq!(config.keybindings.search, vec!["/"]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"http://localhost:8080\"\ndiscard_stale_responses = true"
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert!(config.api.discard_stale_responses);
    }

    #[test]
    fn test_load_from_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[colors]\nactive_border = \"mauve\"").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
