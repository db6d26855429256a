// Input handling - crossterm key decoding and press/repeat tracking
//
// Every Press is a distinct key press and is always dispatched. Terminals
// that report event types (keyboard enhancement) also send Repeat while a
// key is held and Release when it goes up; repeats are gated per key:
// - Activation keys (Space, Enter, quit) never repeat, so holding Space
//   toggles once
// - Navigation keys repeat after an initial delay

use crate::core::Key;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Defines how a key should behave when held
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyBehavior {
    /// Trigger once per press
    StateChange,

    /// Trigger on press, then repeat after an initial delay
    Repeatable {
        initial_delay: Duration,
        repeat_interval: Duration,
    },
}

impl KeyBehavior {
    /// Focus movement while Tab or an arrow is held
    pub fn navigation() -> Self {
        Self::Repeatable {
            initial_delay: Duration::from_millis(400),
            repeat_interval: Duration::from_millis(80),
        }
    }

    pub fn for_key(key: Key) -> Self {
        if key.is_navigation() {
            Self::navigation()
        } else {
            Self::StateChange
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct KeyState {
    press_started: Instant,
    last_triggered: Instant,
}

/// Press/repeat bookkeeping per decoded key
#[derive(Debug, Default)]
pub struct KeyTracker {
    held: HashMap<Key, KeyState>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key event; returns true if the key should be dispatched
    pub fn accept(&mut self, key: Key, kind: KeyEventKind) -> bool {
        self.accept_at(key, kind, Instant::now())
    }

    fn accept_at(&mut self, key: Key, kind: KeyEventKind, now: Instant) -> bool {
        match kind {
            KeyEventKind::Press => {
                self.held.insert(
                    key,
                    KeyState {
                        press_started: now,
                        last_triggered: now,
                    },
                );
                true
            }
            KeyEventKind::Repeat => self.repeat_at(key, now),
            KeyEventKind::Release => {
                self.held.remove(&key);
                false
            }
        }
    }

    fn repeat_at(&mut self, key: Key, now: Instant) -> bool {
        let KeyBehavior::Repeatable {
            initial_delay,
            repeat_interval,
        } = KeyBehavior::for_key(key)
        else {
            return false;
        };

        // A repeat without a seen press starts the hold here
        let state = self.held.entry(key).or_insert(KeyState {
            press_started: now,
            last_triggered: now,
        });

        let since_press = now.saturating_duration_since(state.press_started);
        let since_last = now.saturating_duration_since(state.last_triggered);
        let fire = since_press >= initial_delay && since_last >= repeat_interval;
        if fire {
            state.last_triggered = now;
        }
        fire
    }
}

/// Decode a crossterm key event
///
/// Returns None for keys the widget tree has no use for (function keys,
/// arrows other than left/right, and so on).
pub fn to_key(event: &KeyEvent) -> Option<Key> {
    match event.code {
        KeyCode::BackTab => Some(Key::ShiftTab),
        KeyCode::Tab if event.modifiers.contains(KeyModifiers::SHIFT) => Some(Key::ShiftTab),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Other(0x1b)),
        KeyCode::Char(c) => Some(Key::char(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_press_is_dispatched_without_release() {
        let mut tracker = KeyTracker::new();
        let start = Instant::now();

        // Terminals without event types never send Release
        assert!(tracker.accept_at(Key::Tab, KeyEventKind::Press, start));
        assert!(tracker.accept_at(Key::Tab, KeyEventKind::Press, start + Duration::from_millis(250)));
        assert!(tracker.accept_at(Key::Space, KeyEventKind::Press, start));
        assert!(tracker.accept_at(Key::Space, KeyEventKind::Press, start + Duration::from_millis(120)));
    }

    #[test]
    fn test_activation_keys_do_not_repeat() {
        let mut tracker = KeyTracker::new();
        let start = Instant::now();

        assert!(tracker.accept_at(Key::Space, KeyEventKind::Press, start));
        for ms in [100, 500, 1000] {
            assert!(!tracker.accept_at(
                Key::Space,
                KeyEventKind::Repeat,
                start + Duration::from_millis(ms)
            ));
        }
        assert!(!tracker.accept_at(Key::Space, KeyEventKind::Release, start + Duration::from_millis(1100)));
        assert!(tracker.accept_at(Key::Space, KeyEventKind::Press, start + Duration::from_millis(1200)));
    }

    #[test]
    fn test_navigation_repeats_after_delay() {
        let mut tracker = KeyTracker::new();
        let start = Instant::now();
        let at = |ms| start + Duration::from_millis(ms);

        assert!(tracker.accept_at(Key::Tab, KeyEventKind::Press, start));
        assert!(!tracker.accept_at(Key::Tab, KeyEventKind::Repeat, at(200)));
        assert!(tracker.accept_at(Key::Tab, KeyEventKind::Repeat, at(450)));
        assert!(!tracker.accept_at(Key::Tab, KeyEventKind::Repeat, at(470)));
        assert!(tracker.accept_at(Key::Tab, KeyEventKind::Repeat, at(540)));
    }

    #[test]
    fn test_keys_are_tracked_independently() {
        let mut tracker = KeyTracker::new();
        let start = Instant::now();

        assert!(tracker.accept_at(Key::Tab, KeyEventKind::Press, start));
        assert!(tracker.accept_at(Key::Left, KeyEventKind::Press, start + Duration::from_millis(300)));
        // Tab's hold started at 0, Left's at 300
        assert!(tracker.accept_at(Key::Tab, KeyEventKind::Repeat, start + Duration::from_millis(420)));
        assert!(!tracker.accept_at(Key::Left, KeyEventKind::Repeat, start + Duration::from_millis(420)));
    }

    #[test]
    fn test_to_key() {
        let plain = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert_eq!(to_key(&plain(KeyCode::Tab)), Some(Key::Tab));
        assert_eq!(to_key(&plain(KeyCode::BackTab)), Some(Key::ShiftTab));
        assert_eq!(
            to_key(&KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT)),
            Some(Key::ShiftTab)
        );
        assert_eq!(to_key(&plain(KeyCode::Char(' '))), Some(Key::Space));
        assert_eq!(to_key(&plain(KeyCode::Enter)), Some(Key::Enter));
        assert_eq!(to_key(&plain(KeyCode::Char('q'))), Some(Key::char('q')));
        assert_eq!(to_key(&plain(KeyCode::Esc)), Some(Key::Other(0x1b)));
        assert_eq!(to_key(&plain(KeyCode::Up)), None);
        assert_eq!(to_key(&plain(KeyCode::F(1))), None);
    }
}
