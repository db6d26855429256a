//! Config serialization to TOML
//!
//! Single source of truth for the config file format: the template written
//! on first run and `config --reset` both come from here.

use super::{Config, SwitchConfig};
use serde::Serialize;

/// `[[switches]]` wrapper so the rows serialize as an array of tables
#[derive(Serialize)]
struct SwitchTables<'a> {
    switches: &'a [SwitchConfig],
}

/// A TOML string literal, escaped
fn toml_string(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

impl Config {
    /// Serialize switch rows to `[[switches]]` tables
    pub(super) fn switches_to_toml(&self) -> String {
        let tables = SwitchTables {
            switches: &self.switches,
        };
        // Strings and bools always serialize
        toml::to_string(&tables).unwrap_or_default()
    }

    /// Full config file contents
    pub fn to_toml(&self) -> String {
        format!(
            r#"# switchboard configuration

# Title shown above the switches
title = {title}

# Key that quits the TUI (single character)
quit_key = {quit_key}

# Redraw interval in milliseconds
tick_rate_ms = {tick_rate_ms}

# Labeled switches, top to bottom. Ids must be unique.
{switches}
# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level}
# JSON file logging (in addition to the TUI log pane or stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix}
"#,
            title = toml_string(&self.title),
            quit_key = toml_string(&self.quit_key.to_string()),
            tick_rate_ms = self.tick_rate_ms,
            log_level = toml_string(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = toml_string(&self.logging.file_dir.display().to_string()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = toml_string(&self.logging.file_prefix),
            switches = self.switches_to_toml(),
        )
    }
}
