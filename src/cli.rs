// CLI module - command-line argument parsing and handlers
//
// Without a subcommand the binary runs the switch demo (TUI, headless, or a
// key script). The config subcommand manages the config file:
// - config --show: Display effective configuration
// - config --path: Show config file path
// - config --reset: Regenerate config file with defaults

use crate::config::{Config, VERSION};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Switchboard - labeled toggle switches in the terminal
#[derive(Parser, Debug)]
#[command(name = "switchboard")]
#[command(version = VERSION)]
#[command(about = "Labeled toggle switches in the terminal", long_about = None)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run a key script ("space tab space") and print frames as JSON lines
    #[arg(long, value_name = "KEYS", conflicts_with = "headless")]
    pub script: Option<String>,

    /// Read key names from stdin instead of starting the TUI
    #[arg(long)]
    pub headless: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

impl Cli {
    /// Whether the TUI should be skipped regardless of config
    pub fn is_headless(&self) -> bool {
        self.headless || self.script.is_some()
    }

    /// Config file location: --config, else the default path
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Config::config_path)
    }

    /// Effective configuration for this invocation
    pub fn load_config(&self) -> Config {
        let mut config = match &self.config {
            Some(path) => Config::from_path(path),
            None => Config::from_env(),
        };
        if self.is_headless() {
            config.enable_tui = false;
        }
        config
    }
}

/// Handle a subcommand. Returns true if one was handled (exit after).
pub fn handle_command(cli: &Cli) -> bool {
    match &cli.command {
        Some(Commands::Config { show, reset, path }) => {
            let config_path = cli.config_path();
            if *path {
                handle_config_path(config_path.as_deref());
            } else if *show {
                handle_config_show(cli, config_path.as_deref());
            } else if *reset {
                handle_config_reset(config_path.as_deref());
            } else {
                // No flag provided, show help
                println!("Usage: switchboard config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
            }
            true
        }
        None => false, // No subcommand, run the demo
    }
}

fn handle_config_path(path: Option<&Path>) {
    match path {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show(cli: &Cli, path: Option<&Path>) {
    let config = cli.load_config();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    // Show source info
    println!();
    if let Some(path) = path {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset(path: Option<&Path>) {
    let Some(path) = path else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = std::io::stderr().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err()
            || !input.trim().eq_ignore_ascii_case("y")
        {
            println!("Aborted.");
            return;
        }
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = std::fs::write(path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_runs_tui() {
        let cli = Cli::try_parse_from(["switchboard"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.is_headless());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_script_implies_headless() {
        let cli = Cli::try_parse_from(["switchboard", "--script", "space tab space"]).unwrap();
        assert_eq!(cli.script.as_deref(), Some("space tab space"));
        assert!(cli.is_headless());
    }

    #[test]
    fn test_script_conflicts_with_headless() {
        assert!(Cli::try_parse_from(["switchboard", "--script", "space", "--headless"]).is_err());
    }

    #[test]
    fn test_config_subcommand_with_global_path() {
        let cli =
            Cli::try_parse_from(["switchboard", "config", "--path", "--config", "/tmp/sb.toml"])
                .unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Config {
                show: false,
                reset: false,
                path: true,
            })
        );
        assert_eq!(cli.config_path(), Some(PathBuf::from("/tmp/sb.toml")));
    }

    #[test]
    fn test_headless_flag_disables_tui_in_loaded_config() {
        let cli = Cli::try_parse_from([
            "switchboard",
            "--headless",
            "--config",
            "/nonexistent/switchboard.toml",
        ])
        .unwrap();
        let config = cli.load_config();
        assert!(!config.enable_tui);
        assert_eq!(config.switches.len(), 2);
    }
}
