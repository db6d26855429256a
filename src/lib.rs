// Switchboard - labeled toggle switches in the terminal
//
// Architecture:
// - core: widget tree, switch state, focus ring, event router, runtime
// - app: the switch demo built on the core (handlers, status line)
// - tui (ratatui + crossterm): draws frames and feeds keys to the runtime
// - script: headless runs that print frames as JSON lines
// - config / logging / cli: the ambient layer around all of the above

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod logging;
pub mod script;
pub mod tui;
