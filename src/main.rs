// Switchboard - labeled toggle switches in the terminal
//
// Modes:
// - TUI (default): ratatui screen, logs captured into the log pane
// - --script "keys": run keys headlessly, print frames as JSON lines
// - --headless: same, with key names read from stdin

use anyhow::Result;
use clap::Parser;
use switchboard::cli::{self, Cli};
use switchboard::config::Config;
use switchboard::logging::{self, LogBuffer};
use switchboard::{app, script, tui};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle CLI commands first (config --show, --reset, --path)
    // If a command was handled, exit early
    if cli::handle_command(&cli) {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    if cli.config.is_none() {
        Config::ensure_config_exists();
    }

    // Load configuration first to determine TUI vs headless mode
    let config = cli.load_config();

    // In TUI mode logs go to the buffer (prevents garbling the display);
    // headless logs go to stderr so stdout stays clean for JSON lines.
    // The guard must be kept alive for the duration of the program.
    let log_buffer = LogBuffer::new();
    let _file_guard = logging::init(&config.logging, config.enable_tui, &log_buffer)?;

    tracing::info!("switchboard {} starting", switchboard::config::VERSION);

    let mut runtime = app::build(&config)?;

    if let Some(keys) = &cli.script {
        let keys = script::parse_keys(keys)?;
        let stdout = std::io::stdout();
        script::run(&mut runtime, keys.into_iter().map(Ok), config.quit_key, stdout.lock())?;
    } else if !config.enable_tui {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        let keys = script::read_keys(stdin.lock());
        script::run(&mut runtime, keys, config.quit_key, stdout.lock())?;
    } else {
        tui::run_tui(runtime, log_buffer, &config).await?;
    }

    tracing::info!("switchboard stopped");
    Ok(())
}
