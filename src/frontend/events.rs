//! Frontend-agnostic input events and their mapping onto widget keys.
//!
//! The TUI translates crossterm's event stream into [`FrontendEvent`] so the
//! demo only handles one event shape. [`keys_for_event`] then turns a key
//! event into the [`Key`]s it should light up on the keyboard widget.

use crate::input::Key;
use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers, ModifierKeyCode, MouseEventKind};

#[derive(Debug, Clone, PartialEq)]
pub enum FrontendEvent {
    /// Keyboard input
    Key {
        code: KeyCode,
        modifiers: KeyModifiers,
        kind: KeyEventKind,
        /// Reported from the numeric keypad (only with keyboard enhancement)
        keypad: bool,
    },
    /// Mouse input, in terminal cells
    Mouse {
        kind: MouseEventKind,
        x: u16,
        y: u16,
        modifiers: KeyModifiers,
    },
    /// Terminal resize
    Resize { width: u16, height: u16 },
}

impl FrontendEvent {
    /// Create a key press event
    pub fn key(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self::Key {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            keypad: false,
        }
    }

    pub fn mouse(kind: MouseEventKind, x: u16, y: u16) -> Self {
        Self::Mouse {
            kind,
            x,
            y,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn resize(width: u16, height: u16) -> Self {
        Self::Resize { width, height }
    }
}

/// Widget key for a character on a US keyboard, shifted symbols included
fn key_for_char(c: char) -> Option<Key> {
    if let Some(key) = Key::from_letter(c) {
        return Some(key);
    }
    if let Some(d) = c.to_digit(10) {
        return Key::from_digit(d);
    }
    let key = match c {
        ' ' => Key::Space,
        '`' | '~' => Key::GraveAccent,
        '-' | '_' => Key::Minus,
        '=' | '+' => Key::Equal,
        '[' | '{' => Key::LeftBracket,
        ']' | '}' => Key::RightBracket,
        '\\' | '|' => Key::Backslash,
        ';' | ':' => Key::Semicolon,
        '\'' | '"' => Key::Apostrophe,
        ',' | '<' => Key::Comma,
        '.' | '>' => Key::Period,
        '/' | '?' => Key::Slash,
        '!' => Key::Num1,
        '@' => Key::Num2,
        '#' => Key::Num3,
        '$' => Key::Num4,
        '%' => Key::Num5,
        '^' => Key::Num6,
        '&' => Key::Num7,
        '*' => Key::Num8,
        '(' => Key::Num9,
        ')' => Key::Num0,
        _ => return None,
    };
    Some(key)
}

/// Keypad key for a character typed on the numeric keypad
fn keypad_key_for_char(c: char) -> Option<Key> {
    let key = match c {
        '0' => Key::Keypad0,
        '1' => Key::Keypad1,
        '2' => Key::Keypad2,
        '3' => Key::Keypad3,
        '4' => Key::Keypad4,
        '5' => Key::Keypad5,
        '6' => Key::Keypad6,
        '7' => Key::Keypad7,
        '8' => Key::Keypad8,
        '9' => Key::Keypad9,
        '/' => Key::KeypadDivide,
        '*' => Key::KeypadMultiply,
        '-' => Key::KeypadSubtract,
        '+' => Key::KeypadAdd,
        '.' => Key::KeypadDecimal,
        _ => return None,
    };
    Some(key)
}

fn key_for_modifier(code: ModifierKeyCode) -> Option<Key> {
    let key = match code {
        ModifierKeyCode::LeftShift => Key::LeftShift,
        ModifierKeyCode::RightShift => Key::RightShift,
        ModifierKeyCode::LeftControl => Key::LeftCtrl,
        ModifierKeyCode::RightControl => Key::RightCtrl,
        ModifierKeyCode::LeftAlt => Key::LeftAlt,
        ModifierKeyCode::RightAlt => Key::RightAlt,
        ModifierKeyCode::LeftSuper => Key::LeftSuper,
        ModifierKeyCode::RightSuper => Key::RightSuper,
        _ => return None,
    };
    Some(key)
}

/// Widget key for a crossterm key code
pub fn key_for_code(code: KeyCode, keypad: bool) -> Option<Key> {
    match code {
        KeyCode::Char(c) if keypad => keypad_key_for_char(c).or_else(|| key_for_char(c)),
        KeyCode::Char(c) => key_for_char(c),
        KeyCode::Enter if keypad => Some(Key::KeypadEnter),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Tab | KeyCode::BackTab => Some(Key::Tab),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Insert => Some(Key::Insert),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        KeyCode::PageUp => Some(Key::PageUp),
        KeyCode::PageDown => Some(Key::PageDown),
        KeyCode::Up => Some(Key::UpArrow),
        KeyCode::Down => Some(Key::DownArrow),
        KeyCode::Left => Some(Key::LeftArrow),
        KeyCode::Right => Some(Key::RightArrow),
        KeyCode::F(n) => Key::from_function(n),
        KeyCode::CapsLock => Some(Key::CapsLock),
        KeyCode::ScrollLock => Some(Key::ScrollLock),
        KeyCode::NumLock => Some(Key::NumLock),
        KeyCode::PrintScreen => Some(Key::PrintScreen),
        KeyCode::Pause => Some(Key::Pause),
        KeyCode::Menu => Some(Key::Menu),
        KeyCode::Modifier(m) => key_for_modifier(m),
        _ => None,
    }
}

/// Every widget key a key event stands for: the key itself plus held modifiers
pub fn keys_for_event(code: KeyCode, modifiers: KeyModifiers, keypad: bool) -> Vec<Key> {
    let mut keys = Vec::new();
    if let Some(key) = key_for_code(code, keypad) {
        keys.push(key);
    }

    let shifted_char = matches!(code, KeyCode::Char(c) if c.is_ascii_uppercase());
    if modifiers.contains(KeyModifiers::SHIFT) || shifted_char || code == KeyCode::BackTab {
        keys.push(Key::LeftShift);
    }
    if modifiers.contains(KeyModifiers::CONTROL) {
        keys.push(Key::LeftCtrl);
    }
    if modifiers.contains(KeyModifiers::ALT) {
        keys.push(Key::LeftAlt);
    }
    if modifiers.contains(KeyModifiers::SUPER) {
        keys.push(Key::LeftSuper);
    }

    keys.dedup();
    keys
}
