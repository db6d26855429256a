// Demo application - labeled switches with independent handlers
//
// Builds the widget description from config and registers one handler per
// switch (by id) plus a status-line handler for every switch (by class).
// Handlers log state changes through tracing; in TUI mode those lines show
// up in the log pane.

use crate::config::Config;
use crate::core::compose::SWITCH_CLASS;
use crate::core::{Description, Phase, Runtime, Selector};
use anyhow::{Context as _, Result};
use std::collections::BTreeMap;

pub const TITLE_ID: &str = "title";
pub const STATUS_ID: &str = "status";

const STATUS_IDLE: &str = "Press Space to toggle";

/// Application state owned by the runtime and updated by handlers
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SwitchApp {
    labels: BTreeMap<String, String>,
    values: BTreeMap<String, bool>,
    changes: usize,
}

impl SwitchApp {
    pub fn from_config(config: &Config) -> Self {
        let mut app = Self::default();
        for switch in &config.switches {
            app.labels.insert(switch.id.clone(), switch.label.clone());
            app.values.insert(switch.id.clone(), switch.value);
        }
        app
    }

    /// Last value reported for a switch
    pub fn value(&self, id: &str) -> Option<bool> {
        self.values.get(id).copied()
    }

    pub fn label(&self, id: &str) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }

    /// Number of change events seen
    pub fn changes(&self) -> usize {
        self.changes
    }
}

/// Title, one labeled row per configured switch, status line
pub fn describe(config: &Config) -> Description {
    let rows = config.switches.iter().map(|switch| switch.describe());

    Description::vertical(
        std::iter::once(Description::label(config.title.as_str()).id(TITLE_ID))
            .chain(rows)
            .chain(std::iter::once(Description::label(STATUS_IDLE).id(STATUS_ID))),
    )
}

/// Compose the demo and register its handlers
pub fn build(config: &Config) -> Result<Runtime<SwitchApp>> {
    let mut runtime = Runtime::new(SwitchApp::from_config(config));
    runtime
        .compose(&describe(config))
        .context("Invalid switch layout in config")?;

    for switch in &config.switches {
        let id = switch.id.clone();
        let label = switch.label.clone();
        runtime.register(Selector::id(switch.id.as_str()), move |cx, event| {
            cx.state_mut().values.insert(id.clone(), event.new_value());
            tracing::info!("{}: {}", label, Phase::from(event.new_value()));
        });
    }

    runtime.register(Selector::class(SWITCH_CLASS), |cx, event| {
        cx.state_mut().changes += 1;

        let source = event.source_id().unwrap_or_default();
        let name = cx.state().label(source).unwrap_or(source).to_string();
        let status = format!("{} turned {}", name, Phase::from(event.new_value()));
        cx.set_label(STATUS_ID, &status);
    });

    tracing::debug!(
        switches = config.switches.len(),
        handlers = runtime.handler_count(),
        "switchboard ready"
    );
    Ok(runtime)
}
