//! Input key taxonomy and events
//!
//! Backends translate native key events into [`KeyCode`]s. A native key
//! with no mapping becomes [`KeyCode::Unknown`] and is still delivered, so
//! the host sees every key event a backend receives.
//!
//! Key codes compare by name. Their declaration order and discriminants
//! are not a stable contract.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

macro_rules! key_codes {
    ($($(#[$doc:meta])* $name:ident),+ $(,)?) => {
        /// Backend-independent key identity
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum KeyCode {
            $($(#[$doc])* $name,)+
        }

        impl KeyCode {
            /// Every key code, in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$name,)+];

            /// Symbolic name of the key
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$name => stringify!($name),)+
                }
            }
        }
    };
}

key_codes! {
    /// Any key the backend cannot map
    Unknown,
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// Top-row 0
    Num0,
    /// Top-row 1
    Num1,
    /// Top-row 2
    Num2,
    /// Top-row 3
    Num3,
    /// Top-row 4
    Num4,
    /// Top-row 5
    Num5,
    /// Top-row 6
    Num6,
    /// Top-row 7
    Num7,
    /// Top-row 8
    Num8,
    /// Top-row 9
    Num9,
    /// Escape key
    Escape,
    /// Left Control
    LControl,
    /// Left Shift
    LShift,
    /// Left Alt
    LAlt,
    /// Left OS key (Windows, Command, Super)
    LSystem,
    /// Right Control
    RControl,
    /// Right Shift
    RShift,
    /// Right Alt
    RAlt,
    /// Right OS key
    RSystem,
    /// Menu key
    Menu,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `;`
    SemiColon,
    /// `,`
    Comma,
    /// `.`
    Period,
    /// `'`
    Quote,
    /// `/`
    Slash,
    /// `\`
    BackSlash,
    /// `~`
    Tilde,
    /// `=`
    Equal,
    /// `-`
    Dash,
    /// Space bar
    Space,
    /// Enter / Return
    Return,
    /// Backspace
    BackSpace,
    /// Tab
    Tab,
    /// Page Up
    PageUp,
    /// Page Down
    PageDown,
    /// End
    End,
    /// Home
    Home,
    /// Insert
    Insert,
    /// Delete
    Delete,
    /// Pause
    Pause,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// F1
    F1,
    /// F2
    F2,
    /// F3
    F3,
    /// F4
    F4,
    /// F5
    F5,
    /// F6
    F6,
    /// F7
    F7,
    /// F8
    F8,
    /// F9
    F9,
    /// F10
    F10,
    /// F11
    F11,
    /// F12
    F12,
    /// F13
    F13,
    /// F14
    F14,
    /// F15
    F15,
}

impl KeyCode {
    /// Letter key for an ASCII letter, either case
    pub fn from_letter(ch: char) -> Option<Self> {
        const LETTERS: [KeyCode; 26] = [
            KeyCode::A, KeyCode::B, KeyCode::C, KeyCode::D, KeyCode::E, KeyCode::F, KeyCode::G,
            KeyCode::H, KeyCode::I, KeyCode::J, KeyCode::K, KeyCode::L, KeyCode::M, KeyCode::N,
            KeyCode::O, KeyCode::P, KeyCode::Q, KeyCode::R, KeyCode::S, KeyCode::T, KeyCode::U,
            KeyCode::V, KeyCode::W, KeyCode::X, KeyCode::Y, KeyCode::Z,
        ];
        let ch = ch.to_ascii_uppercase();
        ch.is_ascii_uppercase().then(|| LETTERS[(ch as u8 - b'A') as usize])
    }

    /// Top-row digit key for an ASCII digit
    pub fn from_digit(ch: char) -> Option<Self> {
        const DIGITS: [KeyCode; 10] = [
            KeyCode::Num0, KeyCode::Num1, KeyCode::Num2, KeyCode::Num3, KeyCode::Num4,
            KeyCode::Num5, KeyCode::Num6, KeyCode::Num7, KeyCode::Num8, KeyCode::Num9,
        ];
        ch.to_digit(10).map(|d| DIGITS[d as usize])
    }

    /// Function key `F{n}` for `n` in `1..=15`
    pub fn function(n: u8) -> Option<Self> {
        const FUNCTION: [KeyCode; 15] = [
            KeyCode::F1, KeyCode::F2, KeyCode::F3, KeyCode::F4, KeyCode::F5,
            KeyCode::F6, KeyCode::F7, KeyCode::F8, KeyCode::F9, KeyCode::F10,
            KeyCode::F11, KeyCode::F12, KeyCode::F13, KeyCode::F14, KeyCode::F15,
        ];
        FUNCTION.get(usize::from(n).checked_sub(1)?).copied()
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for key names that match no [`KeyCode`]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown key name: {0}")]
pub struct ParseKeyCodeError(String);

impl FromStr for KeyCode {
    type Err = ParseKeyCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|code| code.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseKeyCodeError(s.to_string()))
    }
}

/// Whether a key went down or up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    /// Key went down (or auto-repeated)
    Pressed,
    /// Key went up
    Released,
}

bitflags! {
    /// Modifier keys held during a key event
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Either Shift
        const SHIFT = 1 << 0;
        /// Either Control
        const CONTROL = 1 << 1;
        /// Either Alt
        const ALT = 1 << 2;
        /// Either OS key
        const SYSTEM = 1 << 3;
    }
}

/// Input delivered by a backend to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key changed state
    Key {
        /// Which key
        code: KeyCode,
        /// Down or up
        state: KeyState,
        /// Modifiers held at the time
        modifiers: Modifiers,
    },
    /// The backend's surface asked to close
    Closed,
}

impl InputEvent {
    /// Key press without modifiers
    pub const fn pressed(code: KeyCode) -> Self {
        Self::Key {
            code,
            state: KeyState::Pressed,
            modifiers: Modifiers::empty(),
        }
    }

    /// Key release without modifiers
    pub const fn released(code: KeyCode) -> Self {
        Self::Key {
            code,
            state: KeyState::Released,
            modifiers: Modifiers::empty(),
        }
    }

    /// The key code, for key events
    pub const fn key(&self) -> Option<KeyCode> {
        match self {
            Self::Key { code, .. } => Some(*code),
            Self::Closed => None,
        }
    }

    /// Whether this is a press of `code`
    pub fn is_press_of(&self, code: KeyCode) -> bool {
        matches!(self, Self::Key { code: c, state: KeyState::Pressed, .. } if *c == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_members_unique_and_named() {
        let names: HashSet<_> = KeyCode::ALL.iter().map(|code| code.name()).collect();
        assert_eq!(names.len(), KeyCode::ALL.len());
        assert!(KeyCode::ALL.contains(&KeyCode::Unknown));
        assert!(KeyCode::ALL.contains(&KeyCode::F15));
    }

    #[test]
    fn test_name_parse_round_trip() {
        for code in KeyCode::ALL {
            assert_eq!(code.to_string().parse::<KeyCode>(), Ok(*code));
        }
        assert_eq!("escape".parse::<KeyCode>(), Ok(KeyCode::Escape));
        assert!("Hyper".parse::<KeyCode>().is_err());
    }

    #[test]
    fn test_char_helpers() {
        assert_eq!(KeyCode::from_letter('q'), Some(KeyCode::Q));
        assert_eq!(KeyCode::from_letter('Z'), Some(KeyCode::Z));
        assert_eq!(KeyCode::from_letter('é'), None);
        assert_eq!(KeyCode::from_digit('7'), Some(KeyCode::Num7));
        assert_eq!(KeyCode::function(1), Some(KeyCode::F1));
        assert_eq!(KeyCode::function(15), Some(KeyCode::F15));
        assert_eq!(KeyCode::function(0), None);
        assert_eq!(KeyCode::function(16), None);
    }

    #[test]
    fn test_event_helpers() {
        let event = InputEvent::pressed(KeyCode::Space);
        assert!(event.is_press_of(KeyCode::Space));
        assert!(!InputEvent::released(KeyCode::Space).is_press_of(KeyCode::Space));
        assert_eq!(InputEvent::Closed.key(), None);
    }
}
