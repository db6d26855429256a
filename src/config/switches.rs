//! Switch rows shown by the demo

use crate::core::{labeled_switch, Description};
use serde::{Deserialize, Serialize};

/// One `[[switches]]` entry: a labeled switch row
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SwitchConfig {
    pub label: String,
    pub id: String,
    #[serde(default)]
    pub value: bool,
}

impl SwitchConfig {
    pub fn new(label: &str, id: &str, value: bool) -> Self {
        Self {
            label: label.to_string(),
            id: id.to_string(),
            value,
        }
    }

    pub fn describe(&self) -> Description {
        labeled_switch(&self.label, &self.id, self.value)
    }
}

/// WiFi and Bluetooth, both off
pub fn default_switches() -> Vec<SwitchConfig> {
    vec![
        SwitchConfig::new("WiFi", "wifi", false),
        SwitchConfig::new("Bluetooth", "bluetooth", false),
    ]
}
