//! Input identifiers and the live input query consumed by the widgets.
//!
//! [`InputQuery`] is what a render call reads to decide whether an element is
//! pressed. [`InputState`] is the crate's own implementation, fed from terminal
//! events by the TUI frontend or scripted directly in tests.

use crate::paint::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Keyboard and gamepad button identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    // Number row
    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,
    // Function row
    Escape,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    PrintScreen, ScrollLock, Pause,
    // Punctuation
    GraveAccent, Minus, Equal, LeftBracket, RightBracket, Backslash,
    Semicolon, Apostrophe, Comma, Period, Slash,
    // Editing and modifiers
    Tab, CapsLock, Enter, Backspace, Space,
    LeftShift, RightShift, LeftCtrl, RightCtrl, LeftAlt, RightAlt,
    LeftSuper, RightSuper, Menu,
    // Navigation
    Insert, Delete, Home, End, PageUp, PageDown,
    UpArrow, DownArrow, LeftArrow, RightArrow,
    // Numeric keypad
    NumLock,
    Keypad0, Keypad1, Keypad2, Keypad3, Keypad4,
    Keypad5, Keypad6, Keypad7, Keypad8, Keypad9,
    KeypadDivide, KeypadMultiply, KeypadSubtract, KeypadAdd, KeypadEnter, KeypadDecimal,
    // Gamepad
    GamepadStart, GamepadBack,
    GamepadFaceUp, GamepadFaceRight, GamepadFaceDown, GamepadFaceLeft,
    GamepadDpadUp, GamepadDpadRight, GamepadDpadDown, GamepadDpadLeft,
    GamepadL1, GamepadR1, GamepadL2, GamepadR2, GamepadL3, GamepadR3,
}

impl Key {
    /// Letter key for an ASCII letter, either case
    pub fn from_letter(c: char) -> Option<Key> {
        const LETTERS: [Key; 26] = [
            Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
            Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
            Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
        ];
        let c = c.to_ascii_uppercase();
        if c.is_ascii_uppercase() {
            Some(LETTERS[(c as u8 - b'A') as usize])
        } else {
            None
        }
    }

    pub fn from_digit(d: u32) -> Option<Key> {
        const DIGITS: [Key; 10] = [
            Key::Num0, Key::Num1, Key::Num2, Key::Num3, Key::Num4,
            Key::Num5, Key::Num6, Key::Num7, Key::Num8, Key::Num9,
        ];
        DIGITS.get(d as usize).copied()
    }

    pub fn from_function(n: u8) -> Option<Key> {
        const FUNCTION: [Key; 12] = [
            Key::F1, Key::F2, Key::F3, Key::F4, Key::F5, Key::F6,
            Key::F7, Key::F8, Key::F9, Key::F10, Key::F11, Key::F12,
        ];
        (n as usize)
            .checked_sub(1)
            .and_then(|i| FUNCTION.get(i).copied())
    }

    pub fn is_gamepad(self) -> bool {
        (self as u16) >= (Key::GamepadStart as u16)
    }
}

/// Mouse buttons in host order (left, right, middle)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub const ALL: [MouseButton; 3] = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

    pub fn name(self) -> &'static str {
        match self {
            MouseButton::Left => "Left",
            MouseButton::Right => "Right",
            MouseButton::Middle => "Middle",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Analog gamepad axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamepadAxis {
    LeftStickX,
    LeftStickY,
    RightStickX,
    RightStickY,
    LeftTrigger,
    RightTrigger,
}

impl GamepadAxis {
    pub fn is_trigger(self) -> bool {
        matches!(self, GamepadAxis::LeftTrigger | GamepadAxis::RightTrigger)
    }
}

/// Live input state as seen by a widget during one frame
pub trait InputQuery {
    fn is_key_down(&self, key: Key) -> bool;

    fn is_mouse_down(&self, button: MouseButton) -> bool;

    /// True only on the frame the button went down
    fn is_mouse_clicked(&self, button: MouseButton) -> bool;

    fn mouse_pos(&self) -> Vec2;

    /// Stick axes in -1..=1 (positive x right, positive y down), triggers in 0..=1
    fn gamepad_axis(&self, _axis: GamepadAxis) -> f32 {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyHold {
    /// Down until an explicit release
    UntilRelease,
    /// Down for the hold window after the last press or repeat
    Since(Instant),
}

/// Frame-based input state.
///
/// Most terminals only report key presses, so a key pressed with
/// [`InputState::press_key`] stays down for the hold window and is refreshed
/// by repeats. Hosts that report releases use [`InputState::hold_key`] and
/// [`InputState::release_key`] instead.
#[derive(Debug, Clone)]
pub struct InputState {
    keys: HashMap<Key, KeyHold>,
    mouse_down: [bool; 3],
    mouse_clicked: [bool; 3],
    mouse_pos: Vec2,
    axes: HashMap<GamepadAxis, f32>,
    hold: Duration,
    now: Instant,
}

impl InputState {
    pub fn new(hold: Duration) -> Self {
        Self {
            keys: HashMap::new(),
            mouse_down: [false; 3],
            mouse_clicked: [false; 3],
            mouse_pos: Vec2::new(-f32::MAX, -f32::MAX),
            axes: HashMap::new(),
            hold,
            now: Instant::now(),
        }
    }

    /// Advance the clock and expire keys whose hold window has passed
    pub fn begin_frame(&mut self, now: Instant) {
        self.now = now;
        let hold = self.hold;
        self.keys.retain(|_, state| match state {
            KeyHold::UntilRelease => true,
            KeyHold::Since(at) => now.saturating_duration_since(*at) < hold,
        });
    }

    /// Forget per-frame click edges
    pub fn end_frame(&mut self) {
        self.mouse_clicked = [false; 3];
    }

    pub fn press_key(&mut self, key: Key) {
        let entry = self.keys.entry(key).or_insert(KeyHold::Since(self.now));
        if let KeyHold::Since(at) = entry {
            *at = self.now;
        }
    }

    pub fn hold_key(&mut self, key: Key) {
        self.keys.insert(key, KeyHold::UntilRelease);
    }

    pub fn release_key(&mut self, key: Key) {
        self.keys.remove(&key);
    }

    pub fn mouse_press(&mut self, button: MouseButton, pos: Vec2) {
        self.mouse_pos = pos;
        if !self.mouse_down[button.index()] {
            self.mouse_clicked[button.index()] = true;
        }
        self.mouse_down[button.index()] = true;
    }

    pub fn mouse_release(&mut self, button: MouseButton, pos: Vec2) {
        self.mouse_pos = pos;
        self.mouse_down[button.index()] = false;
    }

    pub fn mouse_move(&mut self, pos: Vec2) {
        self.mouse_pos = pos;
    }

    /// Set an analog axis, clamped to its valid range
    pub fn set_axis(&mut self, axis: GamepadAxis, value: f32) {
        let value = if axis.is_trigger() {
            value.clamp(0.0, 1.0)
        } else {
            value.clamp(-1.0, 1.0)
        };
        self.axes.insert(axis, value);
    }

    pub fn pressed_keys(&self) -> Vec<Key> {
        self.keys.keys().copied().collect()
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(Duration::from_millis(150))
    }
}

impl InputQuery for InputState {
    fn is_key_down(&self, key: Key) -> bool {
        self.keys.contains_key(&key)
    }

    fn is_mouse_down(&self, button: MouseButton) -> bool {
        self.mouse_down[button.index()]
    }

    fn is_mouse_clicked(&self, button: MouseButton) -> bool {
        self.mouse_clicked[button.index()]
    }

    fn mouse_pos(&self) -> Vec2 {
        self.mouse_pos
    }

    fn gamepad_axis(&self, axis: GamepadAxis) -> f32 {
        self.axes.get(&axis).copied().unwrap_or(0.0)
    }
}
