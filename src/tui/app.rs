// TUI application state
//
// Wraps the runtime with what the terminal needs on top: the last drawn
// frame, key tracking, and the quit flag. The runtime returns an empty draw
// list when nothing changed, so the last non-empty frame is retained and
// redrawn on every tick.

use super::input::{to_key, KeyTracker};
use crate::app::SwitchApp;
use crate::config::Config;
use crate::core::{DrawInstruction, Handled, Runtime};
use crate::logging::LogBuffer;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub struct TuiApp {
    pub runtime: Runtime<SwitchApp>,
    pub log_buffer: LogBuffer,
    pub quit_key: char,
    pub should_quit: bool,
    frame: Vec<DrawInstruction>,
    tracker: KeyTracker,
}

impl TuiApp {
    pub fn new(runtime: Runtime<SwitchApp>, log_buffer: LogBuffer, config: &Config) -> Self {
        let mut app = Self {
            runtime,
            log_buffer,
            quit_key: config.quit_key,
            should_quit: false,
            frame: Vec::new(),
            tracker: KeyTracker::new(),
        };
        app.refresh();
        app
    }

    /// Pull a new frame from the runtime if anything changed
    ///
    /// Returns true when the retained frame was replaced.
    pub fn refresh(&mut self) -> bool {
        let frame = self.runtime.render_if_dirty();
        if frame.is_empty() {
            return false;
        }
        self.frame = frame;
        true
    }

    /// Last non-empty draw list
    pub fn frame(&self) -> &[DrawInstruction] {
        &self.frame
    }

    /// Route a crossterm key event through tracking and the runtime
    pub fn handle_key_event(&mut self, event: KeyEvent) {
        // Ctrl+C always quits, even in raw mode
        if event.kind == KeyEventKind::Press
            && event.modifiers.contains(KeyModifiers::CONTROL)
            && event.code == KeyCode::Char('c')
        {
            self.should_quit = true;
            return;
        }

        let Some(key) = to_key(&event) else {
            return;
        };

        if !self.tracker.accept(key, event.kind) {
            return;
        }
        if self.runtime.dispatch_key(key) == Handled::No && key.as_char() == Some(self.quit_key) {
            self.should_quit = true;
            return;
        }
        self.refresh();
    }
}
