//! Key mapping from terminal events to engine input events.

use crossterm::event::{
    KeyCode as TermKey, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode,
};

use crate::input::{InputEvent, KeyCode, KeyState, Modifiers};

/// Map a terminal character to a key code.
fn map_char(ch: char) -> KeyCode {
    if let Some(code) = KeyCode::from_letter(ch).or_else(|| KeyCode::from_digit(ch)) {
        return code;
    }
    match ch {
        ' ' => KeyCode::Space,
        '[' | '{' => KeyCode::LBracket,
        ']' | '}' => KeyCode::RBracket,
        ';' | ':' => KeyCode::SemiColon,
        ',' | '<' => KeyCode::Comma,
        '.' | '>' => KeyCode::Period,
        '\'' | '"' => KeyCode::Quote,
        '/' | '?' => KeyCode::Slash,
        '\\' | '|' => KeyCode::BackSlash,
        '~' | '`' => KeyCode::Tilde,
        '=' | '+' => KeyCode::Equal,
        '-' | '_' => KeyCode::Dash,
        _ => KeyCode::Unknown,
    }
}

fn map_modifier_key(key: ModifierKeyCode) -> KeyCode {
    match key {
        ModifierKeyCode::LeftShift => KeyCode::LShift,
        ModifierKeyCode::LeftControl => KeyCode::LControl,
        ModifierKeyCode::LeftAlt => KeyCode::LAlt,
        ModifierKeyCode::LeftSuper => KeyCode::LSystem,
        ModifierKeyCode::RightShift => KeyCode::RShift,
        ModifierKeyCode::RightControl => KeyCode::RControl,
        ModifierKeyCode::RightAlt => KeyCode::RAlt,
        ModifierKeyCode::RightSuper => KeyCode::RSystem,
        _ => KeyCode::Unknown,
    }
}

/// Map a terminal key code. Keys without a counterpart become `Unknown`.
pub fn map_key(code: TermKey) -> KeyCode {
    match code {
        TermKey::Char(ch) => map_char(ch),
        TermKey::Enter => KeyCode::Return,
        TermKey::Backspace => KeyCode::BackSpace,
        TermKey::Tab | TermKey::BackTab => KeyCode::Tab,
        TermKey::Esc => KeyCode::Escape,
        TermKey::Left => KeyCode::Left,
        TermKey::Right => KeyCode::Right,
        TermKey::Up => KeyCode::Up,
        TermKey::Down => KeyCode::Down,
        TermKey::Home => KeyCode::Home,
        TermKey::End => KeyCode::End,
        TermKey::PageUp => KeyCode::PageUp,
        TermKey::PageDown => KeyCode::PageDown,
        TermKey::Insert => KeyCode::Insert,
        TermKey::Delete => KeyCode::Delete,
        TermKey::Pause => KeyCode::Pause,
        TermKey::Menu => KeyCode::Menu,
        TermKey::F(n) => KeyCode::function(n).unwrap_or(KeyCode::Unknown),
        TermKey::Modifier(key) => map_modifier_key(key),
        _ => KeyCode::Unknown,
    }
}

/// Map held terminal modifiers.
pub fn map_modifiers(modifiers: KeyModifiers) -> Modifiers {
    let mut out = Modifiers::empty();
    out.set(Modifiers::SHIFT, modifiers.contains(KeyModifiers::SHIFT));
    out.set(Modifiers::CONTROL, modifiers.contains(KeyModifiers::CONTROL));
    out.set(Modifiers::ALT, modifiers.contains(KeyModifiers::ALT));
    out.set(Modifiers::SYSTEM, modifiers.contains(KeyModifiers::SUPER));
    out
}

/// Check if the key is the terminal's interrupt chord.
pub fn is_interrupt(key: &KeyEvent) -> bool {
    matches!(key.code, TermKey::Char('c') | TermKey::Char('C'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Translate a terminal key event into an input event.
///
/// Ctrl+C becomes [`InputEvent::Closed`] since raw mode swallows the signal.
pub fn translate(key: KeyEvent) -> InputEvent {
    if is_interrupt(&key) {
        return InputEvent::Closed;
    }
    let state = match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => KeyState::Pressed,
        KeyEventKind::Release => KeyState::Released,
    };
    InputEvent::Key {
        code: map_key(key.code),
        state,
        modifiers: map_modifiers(key.modifiers),
    }
}
