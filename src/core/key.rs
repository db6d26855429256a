//! Backend-agnostic key events
//!
//! The terminal backend decodes raw input into [`Key`]; the core only cares
//! about navigation and activation keys and hands everything else back as
//! [`Handled::No`].

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A decoded key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Key {
    Tab,
    ShiftTab,
    Left,
    Right,
    Space,
    Enter,
    /// Any other key, carried as a Unicode scalar value
    Other(u32),
}

impl Key {
    /// Build an `Other` key from a character
    pub fn char(c: char) -> Self {
        match c {
            ' ' => Key::Space,
            '\t' => Key::Tab,
            '\n' | '\r' => Key::Enter,
            other => Key::Other(other as u32),
        }
    }

    /// The character behind an `Other` key, if it is one
    pub fn as_char(&self) -> Option<char> {
        match self {
            Key::Other(code) => char::from_u32(*code),
            _ => None,
        }
    }

    /// Tab, Shift-Tab, Left or Right
    pub fn is_navigation(&self) -> bool {
        matches!(self, Key::Tab | Key::ShiftTab | Key::Left | Key::Right)
    }

    /// Space or Enter
    pub fn is_activation(&self) -> bool {
        matches!(self, Key::Space | Key::Enter)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Tab => f.write_str("tab"),
            Key::ShiftTab => f.write_str("shift-tab"),
            Key::Left => f.write_str("left"),
            Key::Right => f.write_str("right"),
            Key::Space => f.write_str("space"),
            Key::Enter => f.write_str("enter"),
            Key::Other(code) => match char::from_u32(*code) {
                Some(c) => write!(f, "{}", c),
                None => write!(f, "U+{:04X}", code),
            },
        }
    }
}

/// Error for key names that are neither known keys nor a single character
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown key name: {0:?}")]
pub struct UnknownKey(pub String);

impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tab" => return Ok(Key::Tab),
            "shift-tab" | "shift+tab" | "backtab" => return Ok(Key::ShiftTab),
            "left" => return Ok(Key::Left),
            "right" => return Ok(Key::Right),
            "space" => return Ok(Key::Space),
            "enter" | "return" => return Ok(Key::Enter),
            _ => {}
        }

        // Single characters keep their case ('q' and 'Q' are different keys)
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Key::char(c)),
            _ => Err(UnknownKey(s.to_string())),
        }
    }
}

/// Whether the core consumed a key
///
/// `No` means the embedding application should try its own bindings
/// (quit, help, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    Yes,
    No,
}

impl Handled {
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

impl From<bool> for Handled {
    fn from(handled: bool) -> Self {
        if handled {
            Self::Yes
        } else {
            Self::No
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_keys() {
        assert_eq!("tab".parse::<Key>(), Ok(Key::Tab));
        assert_eq!("Shift-Tab".parse::<Key>(), Ok(Key::ShiftTab));
        assert_eq!("left".parse::<Key>(), Ok(Key::Left));
        assert_eq!("RIGHT".parse::<Key>(), Ok(Key::Right));
        assert_eq!("space".parse::<Key>(), Ok(Key::Space));
        assert_eq!("enter".parse::<Key>(), Ok(Key::Enter));
    }

    #[test]
    fn test_parse_single_char() {
        assert_eq!("q".parse::<Key>(), Ok(Key::Other('q' as u32)));
        assert_eq!("Q".parse::<Key>(), Ok(Key::Other('Q' as u32)));
        assert_eq!(" ".parse::<Key>(), Ok(Key::Space));
    }

    #[test]
    fn test_parse_rejects_unknown_names() {
        let err = "escape-hatch".parse::<Key>().unwrap_err();
        assert_eq!(err.to_string(), "unknown key name: \"escape-hatch\"");
        assert!("".parse::<Key>().is_err());
    }

    #[test]
    fn test_display_matches_parse() {
        for key in [Key::Tab, Key::ShiftTab, Key::Space, Key::char('x')] {
            assert_eq!(key.to_string().parse::<Key>(), Ok(key));
        }
    }

    #[test]
    fn test_key_classes() {
        assert!(Key::Tab.is_navigation());
        assert!(Key::Left.is_navigation());
        assert!(Key::Enter.is_activation());
        assert!(!Key::char('q').is_navigation());
        assert!(!Key::char('q').is_activation());
        assert_eq!(Key::char('q').as_char(), Some('q'));
        assert_eq!(Key::Space.as_char(), None);
    }
}
