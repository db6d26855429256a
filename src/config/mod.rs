//! Configuration for the switchboard demo
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/switchboard/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod logging;
mod serialization;
mod switches;


pub use logging::{FileLogging, LogRotation, LoggingConfig};
pub use switches::{default_switches, SwitchConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Overrides the config file location
pub const ENV_CONFIG: &str = "SWITCHBOARD_CONFIG";
/// "1"/"true" disables the TUI (logs go to stderr)
pub const ENV_NO_TUI: &str = "SWITCHBOARD_NO_TUI";
/// Overrides `[logging].level`
pub const ENV_LOG_LEVEL: &str = "SWITCHBOARD_LOG_LEVEL";

const DEFAULT_QUIT_KEY: char = 'q';
const DEFAULT_TICK_RATE_MS: u64 = 200;
const DEFAULT_TITLE: &str = "Switchboard";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Run the terminal UI (false = headless, logs to stderr)
    pub enable_tui: bool,

    /// Key that quits the TUI
    pub quit_key: char,

    /// Redraw interval for the log pane
    pub tick_rate_ms: u64,

    /// Title shown above the switches
    pub title: String,

    /// Labeled switch rows, top to bottom
    pub switches: Vec<SwitchConfig>,

    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable_tui: true,
            quit_key: DEFAULT_QUIT_KEY,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            title: DEFAULT_TITLE.to_string(),
            switches: default_switches(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub quit_key: Option<String>,
    pub tick_rate_ms: Option<u64>,
    pub title: Option<String>,

    /// Optional [[switches]] entries; replaces the defaults when present
    pub switches: Option<Vec<SwitchConfig>>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Config file path: $SWITCHBOARD_CONFIG, else ~/.config/switchboard/config.toml
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(ENV_CONFIG) {
            return Some(PathBuf::from(path));
        }
        dirs::home_dir().map(|p| p.join(".config").join("switchboard").join("config.toml"))
    }

    /// Write the default template if no config file exists yet
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };
        if path.exists() {
            return;
        }
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // config is optional
            }
        }
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load from the default location: file -> env vars -> defaults
    pub fn from_env() -> Self {
        let file = Self::config_path()
            .map(|path| Self::load_file_config(&path))
            .unwrap_or_default();
        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Load from an explicit file path, still honoring env overrides
    pub fn from_path(path: &Path) -> Self {
        let file = Self::load_file_config(path);
        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Read and parse a config file
    ///
    /// A missing file means defaults. A file that exists but cannot be read
    /// or parsed is fatal: a broken config should fail loudly rather than
    /// silently fall back while the user edits the wrong thing.
    fn load_file_config(path: &Path) -> FileConfig {
        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::parse_file_config(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  Tip: Check for:\n");
                    eprintln!("    - Missing quotes around string values");
                    eprintln!("    - [[switches]] entries without label or id");
                    eprintln!("    - Invalid boolean values (use true/false)\n");
                    eprintln!("  To reset, run `switchboard config --reset`.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    pub(crate) fn parse_file_config(contents: &str) -> Result<FileConfig, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Merge a parsed file with environment lookups over the defaults
    pub(crate) fn from_sources<E>(file: FileConfig, env: E) -> Self
    where
        E: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // TUI toggle: env only (runtime flag)
        let enable_tui = env(ENV_NO_TUI)
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(defaults.enable_tui);

        // Quit key: file > default; must be a single character
        let quit_key = match file.quit_key {
            Some(key) => single_char(&key).unwrap_or_else(|| {
                eprintln!(
                    "Warning: quit_key {:?} is not a single character, using '{}'",
                    key, DEFAULT_QUIT_KEY
                );
                DEFAULT_QUIT_KEY
            }),
            None => defaults.quit_key,
        };

        let tick_rate_ms = file
            .tick_rate_ms
            .filter(|&ms| ms > 0)
            .unwrap_or(defaults.tick_rate_ms);

        let title = file.title.unwrap_or(defaults.title);
        let switches = file.switches.unwrap_or(defaults.switches);

        // Log level: env > file > default
        let mut logging = LoggingConfig::from_file(file.logging);
        if let Some(level) = env(ENV_LOG_LEVEL) {
            logging.level = level;
        }

        Self {
            enable_tui,
            quit_key,
            tick_rate_ms,
            title,
            switches,
            logging,
        }
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
