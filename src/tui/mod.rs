// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Reading crossterm input on a blocking task
// - The event loop (key events, timer ticks for the log pane)

pub mod app;
pub mod input;
pub mod view;

use crate::app::SwitchApp;
use crate::config::Config;
use crate::core::Runtime;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::TuiApp;
use crossterm::{
    event::{
        self, Event, KeyEvent, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// How long the input task waits for a key before checking for shutdown
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Run the TUI until the quit key
///
/// This function sets up the terminal, runs the event loop, and restores
/// the terminal even when the loop fails.
pub async fn run_tui(runtime: Runtime<SwitchApp>, log_buffer: LogBuffer, config: &Config) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

    // Ask for Repeat/Release events where the terminal can report them;
    // without them every key arrives as a Press
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .context("Failed to enable key event types")?;
    }
    tracing::debug!(enhanced, "keyboard event types");
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = TuiApp::new(runtime, log_buffer, config);

    let (key_tx, mut key_rx) = mpsc::channel(64);
    let reader = tokio::task::spawn_blocking(move || read_keys(key_tx));

    let tick = Duration::from_millis(config.tick_rate_ms);
    let result = run_event_loop(&mut terminal, &mut app, &mut key_rx, tick).await;

    // Dropping the receiver stops the reader at its next poll
    drop(key_rx);
    if let Err(e) = reader.await {
        tracing::warn!("Input reader task failed: {}", e);
    }

    // Restore terminal
    if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)
            .context("Failed to restore key event types")?;
    }
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Blocking input reader
///
/// Forwards key events until the receiver goes away or the terminal stops
/// producing input.
fn read_keys(tx: mpsc::Sender<KeyEvent>) {
    while !tx.is_closed() {
        match event::poll(INPUT_POLL) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key_event)) => {
                    if tx.blocking_send(key_event).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!("Failed to read terminal input: {}", e);
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                tracing::error!("Failed to poll terminal input: {}", e);
                break;
            }
        }
    }
}

/// Main event loop
///
/// Redraws after every key and on each tick so new log lines show up even
/// when no key is pressed. Keys are handled one at a time, in arrival order.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut TuiApp,
    key_rx: &mut mpsc::Receiver<KeyEvent>,
    tick: Duration,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(tick);

    loop {
        terminal
            .draw(|f| view::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            key_event = key_rx.recv() => match key_event {
                Some(key_event) => app.handle_key_event(key_event),
                None => {
                    tracing::warn!("Input reader stopped");
                    break;
                }
            },

            _ = tick_interval.tick() => {
                app.refresh();
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
