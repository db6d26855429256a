//! On/off switch model
//!
//! `SwitchState` only knows its value and the transition rules. Dirty
//! marking and event publication happen in the runtime, which is the only
//! place holding a mutable reference to a switch inside a tree.

use serde::Serialize;
use std::fmt;

/// The two switch states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    Off,
    On,
}

impl From<bool> for Phase {
    fn from(value: bool) -> Self {
        if value {
            Phase::On
        } else {
            Phase::Off
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Off => f.write_str("OFF"),
            Phase::On => f.write_str("ON"),
        }
    }
}

/// Boolean state of one switch widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SwitchState {
    value: bool,
}

impl SwitchState {
    pub fn new(value: bool) -> Self {
        Self { value }
    }

    pub fn value(&self) -> bool {
        self.value
    }

    /// Flip the value unconditionally, returning the new value
    pub fn toggle(&mut self) -> bool {
        self.value = !self.value;
        self.value
    }

    /// Move to `value`; `None` when already there (no transition)
    pub fn set(&mut self, value: bool) -> Option<bool> {
        if self.value == value {
            return None;
        }
        self.value = value;
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_parity() {
        for initial in [false, true] {
            let mut state = SwitchState::new(initial);
            for n in 1..=9usize {
                state.toggle();
                assert_eq!(state.value(), initial ^ (n % 2 == 1), "after {} toggles", n);
            }
        }
    }

    #[test]
    fn test_set_only_transitions_on_change() {
        let mut state = SwitchState::new(false);
        assert_eq!(state.set(false), None);
        assert_eq!(state.set(true), Some(true));
        assert_eq!(state.set(true), None);
        assert_eq!(Phase::from(state.value()), Phase::On);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::On.to_string(), "ON");
        assert_eq!(Phase::from(false).to_string(), "OFF");
    }
}
