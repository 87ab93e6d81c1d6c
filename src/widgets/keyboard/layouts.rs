//! Physical keyboard layouts as static key tables.
//!
//! Positions and sizes are in key units (1.0 = one standard key). Each table
//! is one row or cluster; [`KeyboardLayout::sections`] places the tables
//! relative to the board so rendering and hit-testing share one description.

use crate::input::Key;
use crate::paint::Vec2;

/// One key of a layout table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyDef {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub label: &'static str,
    pub key: Key,
}

/// Key on a single-row table
const fn key(x: f32, width: f32, label: &'static str, key: Key) -> KeyDef {
    KeyDef {
        x,
        y: 0.0,
        width,
        height: 1.0,
        label,
        key,
    }
}

/// Key on a multi-row cluster
const fn cell(x: f32, y: f32, width: f32, height: f32, label: &'static str, key: Key) -> KeyDef {
    KeyDef {
        x,
        y,
        width,
        height,
        label,
        key,
    }
}

/// Keyboard layout selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyboardLayout {
    #[default]
    Qwerty,
    Qwertz,
    Azerty,
    Colemak,
    Dvorak,
    NumericPad,
}

impl KeyboardLayout {
    pub const ALL: [KeyboardLayout; 6] = [
        KeyboardLayout::Qwerty,
        KeyboardLayout::Qwertz,
        KeyboardLayout::Azerty,
        KeyboardLayout::Colemak,
        KeyboardLayout::Dvorak,
        KeyboardLayout::NumericPad,
    ];

    pub fn name(self) -> &'static str {
        match self {
            KeyboardLayout::Qwerty => "QWERTY",
            KeyboardLayout::Qwertz => "QWERTZ",
            KeyboardLayout::Azerty => "AZERTY",
            KeyboardLayout::Colemak => "Colemak",
            KeyboardLayout::Dvorak => "Dvorak",
            KeyboardLayout::NumericPad => "Numeric Pad",
        }
    }

    /// Parse a layout name; anything unrecognized is QWERTY
    pub fn from_name(name: &str) -> Self {
        let normalized: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "qwertz" => KeyboardLayout::Qwertz,
            "azerty" => KeyboardLayout::Azerty,
            "colemak" => KeyboardLayout::Colemak,
            "dvorak" => KeyboardLayout::Dvorak,
            "numericpad" | "numpad" => KeyboardLayout::NumericPad,
            _ => KeyboardLayout::Qwerty,
        }
    }

    /// Layout by position in [`KeyboardLayout::ALL`]; out of range is QWERTY
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn is_numeric_pad(self) -> bool {
        self == KeyboardLayout::NumericPad
    }

    /// Letter rows (top, home, bottom) for the full layouts
    fn letter_rows(self) -> [&'static [KeyDef]; 3] {
        match self {
            KeyboardLayout::Qwertz => [QWERTZ_ROW1, QWERTZ_ROW2, QWERTZ_ROW3],
            KeyboardLayout::Azerty => [AZERTY_ROW1, AZERTY_ROW2, AZERTY_ROW3],
            KeyboardLayout::Colemak => [COLEMAK_ROW1, COLEMAK_ROW2, COLEMAK_ROW3],
            KeyboardLayout::Dvorak => [DVORAK_ROW1, DVORAK_ROW2, DVORAK_ROW3],
            KeyboardLayout::Qwerty | KeyboardLayout::NumericPad => {
                [QWERTY_ROW1, QWERTY_ROW2, QWERTY_ROW3]
            }
        }
    }

    /// Ordered sections of this layout
    pub fn sections(self) -> Vec<Section> {
        if self.is_numeric_pad() {
            return vec![Section::new(SectionKind::NumericPad, 0.0, 0.0, 0, NUMPAD)];
        }

        let [row1, row2, row3] = self.letter_rows();
        vec![
            Section::new(SectionKind::FunctionRow, 0.0, 0.0, 0, FUNCTION_ROW),
            Section::new(SectionKind::NumberRow, 0.0, MAIN_BLOCK_Y, 0, NUMBER_ROW),
            Section::new(SectionKind::LetterRow, 0.0, MAIN_BLOCK_Y + 1.0, 0, row1),
            Section::new(SectionKind::LetterRow, 0.0, MAIN_BLOCK_Y + 2.0, 0, row2),
            Section::new(SectionKind::LetterRow, 0.0, MAIN_BLOCK_Y + 3.0, 0, row3),
            Section::new(SectionKind::BottomRow, 0.0, MAIN_BLOCK_Y + 4.0, 0, BOTTOM_ROW),
            Section::new(SectionKind::Navigation, MAIN_BLOCK_WIDTH, MAIN_BLOCK_Y, 1, NAV_CLUSTER),
            Section::new(
                SectionKind::NumericPad,
                MAIN_BLOCK_WIDTH + NAV_CLUSTER_WIDTH,
                MAIN_BLOCK_Y,
                2,
                NUMPAD,
            ),
        ]
    }

    /// Board size in key units plus the number of section gaps across it
    pub fn extent(self) -> (Vec2, u32) {
        if self.is_numeric_pad() {
            (Vec2::new(NUMPAD_WIDTH, 5.0), 0)
        } else {
            (
                Vec2::new(MAIN_BLOCK_WIDTH + NAV_CLUSTER_WIDTH + NUMPAD_WIDTH, MAIN_BLOCK_Y + 5.0),
                2,
            )
        }
    }
}

/// Vertical offset of the number row: function row plus half a key of gap
pub const MAIN_BLOCK_Y: f32 = 1.5;
pub const MAIN_BLOCK_WIDTH: f32 = 15.0;
pub const NAV_CLUSTER_WIDTH: f32 = 3.0;
pub const NUMPAD_WIDTH: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    FunctionRow,
    NumberRow,
    LetterRow,
    BottomRow,
    Navigation,
    NumericPad,
}

/// A key table placed on the board
#[derive(Debug, Clone, Copy)]
pub struct Section {
    pub kind: SectionKind,
    /// Origin in key units
    pub origin: Vec2,
    /// Section gaps to the left of this section
    pub gaps: u32,
    pub keys: &'static [KeyDef],
}

impl Section {
    const fn new(kind: SectionKind, x: f32, y: f32, gaps: u32, keys: &'static [KeyDef]) -> Self {
        Self {
            kind,
            origin: Vec2::new(x, y),
            gaps,
            keys,
        }
    }
}

pub const NUMPAD: &[KeyDef] = &[
    cell(0.0, 0.0, 1.0, 1.0, "Num", Key::NumLock),
    cell(1.0, 0.0, 1.0, 1.0, "/", Key::KeypadDivide),
    cell(2.0, 0.0, 1.0, 1.0, "*", Key::KeypadMultiply),
    cell(3.0, 0.0, 1.0, 1.0, "-", Key::KeypadSubtract),
    cell(0.0, 1.0, 1.0, 1.0, "7", Key::Keypad7),
    cell(1.0, 1.0, 1.0, 1.0, "8", Key::Keypad8),
    cell(2.0, 1.0, 1.0, 1.0, "9", Key::Keypad9),
    cell(3.0, 1.0, 1.0, 2.0, "+", Key::KeypadAdd),
    cell(0.0, 2.0, 1.0, 1.0, "4", Key::Keypad4),
    cell(1.0, 2.0, 1.0, 1.0, "5", Key::Keypad5),
    cell(2.0, 2.0, 1.0, 1.0, "6", Key::Keypad6),
    cell(0.0, 3.0, 1.0, 1.0, "1", Key::Keypad1),
    cell(1.0, 3.0, 1.0, 1.0, "2", Key::Keypad2),
    cell(2.0, 3.0, 1.0, 1.0, "3", Key::Keypad3),
    cell(3.0, 3.0, 1.0, 2.0, "Ent", Key::KeypadEnter),
    cell(0.0, 4.0, 2.0, 1.0, "0", Key::Keypad0),
    cell(2.0, 4.0, 1.0, 1.0, ".", Key::KeypadDecimal),
];

pub const FUNCTION_ROW: &[KeyDef] = &[
    key(0.0, 1.0, "Esc", Key::Escape),
    key(2.0, 1.0, "F1", Key::F1),
    key(3.0, 1.0, "F2", Key::F2),
    key(4.0, 1.0, "F3", Key::F3),
    key(5.0, 1.0, "F4", Key::F4),
    key(6.5, 1.0, "F5", Key::F5),
    key(7.5, 1.0, "F6", Key::F6),
    key(8.5, 1.0, "F7", Key::F7),
    key(9.5, 1.0, "F8", Key::F8),
    key(11.0, 1.0, "F9", Key::F9),
    key(12.0, 1.0, "F10", Key::F10),
    key(13.0, 1.0, "F11", Key::F11),
    key(14.0, 1.0, "F12", Key::F12),
    key(15.25, 1.0, "Prt", Key::PrintScreen),
    key(16.25, 1.0, "Scr", Key::ScrollLock),
    key(17.25, 1.0, "Pse", Key::Pause),
];

pub const NAV_CLUSTER: &[KeyDef] = &[
    cell(0.0, 0.0, 1.0, 1.0, "Ins", Key::Insert),
    cell(1.0, 0.0, 1.0, 1.0, "Hm", Key::Home),
    cell(2.0, 0.0, 1.0, 1.0, "PgU", Key::PageUp),
    cell(0.0, 1.0, 1.0, 1.0, "Del", Key::Delete),
    cell(1.0, 1.0, 1.0, 1.0, "End", Key::End),
    cell(2.0, 1.0, 1.0, 1.0, "PgD", Key::PageDown),
    // Arrows line up with the shift and bottom rows
    cell(1.0, 3.0, 1.0, 1.0, "^", Key::UpArrow),
    cell(0.0, 4.0, 1.0, 1.0, "<", Key::LeftArrow),
    cell(1.0, 4.0, 1.0, 1.0, "v", Key::DownArrow),
    cell(2.0, 4.0, 1.0, 1.0, ">", Key::RightArrow),
];

pub const NUMBER_ROW: &[KeyDef] = &[
    key(0.0, 1.0, "`", Key::GraveAccent),
    key(1.0, 1.0, "1", Key::Num1),
    key(2.0, 1.0, "2", Key::Num2),
    key(3.0, 1.0, "3", Key::Num3),
    key(4.0, 1.0, "4", Key::Num4),
    key(5.0, 1.0, "5", Key::Num5),
    key(6.0, 1.0, "6", Key::Num6),
    key(7.0, 1.0, "7", Key::Num7),
    key(8.0, 1.0, "8", Key::Num8),
    key(9.0, 1.0, "9", Key::Num9),
    key(10.0, 1.0, "0", Key::Num0),
    key(11.0, 1.0, "-", Key::Minus),
    key(12.0, 1.0, "=", Key::Equal),
    key(13.0, 2.0, "Back", Key::Backspace),
];

pub const BOTTOM_ROW: &[KeyDef] = &[
    key(0.0, 1.25, "Ctrl", Key::LeftCtrl),
    key(1.25, 1.25, "Win", Key::LeftSuper),
    key(2.5, 1.25, "Alt", Key::LeftAlt),
    key(3.75, 6.25, "Space", Key::Space),
    key(10.0, 1.25, "Alt", Key::RightAlt),
    key(11.25, 1.25, "Win", Key::RightSuper),
    key(12.5, 1.25, "Menu", Key::Menu),
    key(13.75, 1.25, "Ctrl", Key::RightCtrl),
];

pub const QWERTY_ROW1: &[KeyDef] = &[
    key(0.0, 1.5, "Tab", Key::Tab),
    key(1.5, 1.0, "Q", Key::Q),
    key(2.5, 1.0, "W", Key::W),
    key(3.5, 1.0, "E", Key::E),
    key(4.5, 1.0, "R", Key::R),
    key(5.5, 1.0, "T", Key::T),
    key(6.5, 1.0, "Y", Key::Y),
    key(7.5, 1.0, "U", Key::U),
    key(8.5, 1.0, "I", Key::I),
    key(9.5, 1.0, "O", Key::O),
    key(10.5, 1.0, "P", Key::P),
    key(11.5, 1.0, "[", Key::LeftBracket),
    key(12.5, 1.0, "]", Key::RightBracket),
    key(13.5, 1.5, "\\", Key::Backslash),
];

pub const QWERTY_ROW2: &[KeyDef] = &[
    key(0.0, 1.75, "Caps", Key::CapsLock),
    key(1.75, 1.0, "A", Key::A),
    key(2.75, 1.0, "S", Key::S),
    key(3.75, 1.0, "D", Key::D),
    key(4.75, 1.0, "F", Key::F),
    key(5.75, 1.0, "G", Key::G),
    key(6.75, 1.0, "H", Key::H),
    key(7.75, 1.0, "J", Key::J),
    key(8.75, 1.0, "K", Key::K),
    key(9.75, 1.0, "L", Key::L),
    key(10.75, 1.0, ";", Key::Semicolon),
    key(11.75, 1.0, "'", Key::Apostrophe),
    key(12.75, 2.25, "Enter", Key::Enter),
];

pub const QWERTY_ROW3: &[KeyDef] = &[
    key(0.0, 2.25, "Shift", Key::LeftShift),
    key(2.25, 1.0, "Z", Key::Z),
    key(3.25, 1.0, "X", Key::X),
    key(4.25, 1.0, "C", Key::C),
    key(5.25, 1.0, "V", Key::V),
    key(6.25, 1.0, "B", Key::B),
    key(7.25, 1.0, "N", Key::N),
    key(8.25, 1.0, "M", Key::M),
    key(9.25, 1.0, ",", Key::Comma),
    key(10.25, 1.0, ".", Key::Period),
    key(11.25, 1.0, "/", Key::Slash),
    key(12.25, 2.75, "Shift", Key::RightShift),
];

// German: Y and Z swap, umlauts on the punctuation keys
pub const QWERTZ_ROW1: &[KeyDef] = &[
    key(0.0, 1.5, "Tab", Key::Tab),
    key(1.5, 1.0, "Q", Key::Q),
    key(2.5, 1.0, "W", Key::W),
    key(3.5, 1.0, "E", Key::E),
    key(4.5, 1.0, "R", Key::R),
    key(5.5, 1.0, "T", Key::T),
    key(6.5, 1.0, "Z", Key::Z),
    key(7.5, 1.0, "U", Key::U),
    key(8.5, 1.0, "I", Key::I),
    key(9.5, 1.0, "O", Key::O),
    key(10.5, 1.0, "P", Key::P),
    key(11.5, 1.0, "Ü", Key::LeftBracket),
    key(12.5, 1.0, "+", Key::RightBracket),
    key(13.5, 1.5, "#", Key::Backslash),
];

pub const QWERTZ_ROW2: &[KeyDef] = &[
    key(0.0, 1.75, "Caps", Key::CapsLock),
    key(1.75, 1.0, "A", Key::A),
    key(2.75, 1.0, "S", Key::S),
    key(3.75, 1.0, "D", Key::D),
    key(4.75, 1.0, "F", Key::F),
    key(5.75, 1.0, "G", Key::G),
    key(6.75, 1.0, "H", Key::H),
    key(7.75, 1.0, "J", Key::J),
    key(8.75, 1.0, "K", Key::K),
    key(9.75, 1.0, "L", Key::L),
    key(10.75, 1.0, "Ö", Key::Semicolon),
    key(11.75, 1.0, "Ä", Key::Apostrophe),
    key(12.75, 2.25, "Enter", Key::Enter),
];

pub const QWERTZ_ROW3: &[KeyDef] = &[
    key(0.0, 2.25, "Shift", Key::LeftShift),
    key(2.25, 1.0, "Y", Key::Y),
    key(3.25, 1.0, "X", Key::X),
    key(4.25, 1.0, "C", Key::C),
    key(5.25, 1.0, "V", Key::V),
    key(6.25, 1.0, "B", Key::B),
    key(7.25, 1.0, "N", Key::N),
    key(8.25, 1.0, "M", Key::M),
    key(9.25, 1.0, ",", Key::Comma),
    key(10.25, 1.0, ".", Key::Period),
    key(11.25, 1.0, "-", Key::Slash),
    key(12.25, 2.75, "Shift", Key::RightShift),
];

pub const AZERTY_ROW1: &[KeyDef] = &[
    key(0.0, 1.5, "Tab", Key::Tab),
    key(1.5, 1.0, "A", Key::A),
    key(2.5, 1.0, "Z", Key::Z),
    key(3.5, 1.0, "E", Key::E),
    key(4.5, 1.0, "R", Key::R),
    key(5.5, 1.0, "T", Key::T),
    key(6.5, 1.0, "Y", Key::Y),
    key(7.5, 1.0, "U", Key::U),
    key(8.5, 1.0, "I", Key::I),
    key(9.5, 1.0, "O", Key::O),
    key(10.5, 1.0, "P", Key::P),
    key(11.5, 1.0, "^", Key::LeftBracket),
    key(12.5, 1.0, "$", Key::RightBracket),
    key(13.5, 1.5, "*", Key::Backslash),
];

pub const AZERTY_ROW2: &[KeyDef] = &[
    key(0.0, 1.75, "Caps", Key::CapsLock),
    key(1.75, 1.0, "Q", Key::Q),
    key(2.75, 1.0, "S", Key::S),
    key(3.75, 1.0, "D", Key::D),
    key(4.75, 1.0, "F", Key::F),
    key(5.75, 1.0, "G", Key::G),
    key(6.75, 1.0, "H", Key::H),
    key(7.75, 1.0, "J", Key::J),
    key(8.75, 1.0, "K", Key::K),
    key(9.75, 1.0, "L", Key::L),
    key(10.75, 1.0, "M", Key::M),
    key(11.75, 1.0, "ù", Key::Apostrophe),
    key(12.75, 2.25, "Enter", Key::Enter),
];

pub const AZERTY_ROW3: &[KeyDef] = &[
    key(0.0, 2.25, "Shift", Key::LeftShift),
    key(2.25, 1.0, "W", Key::W),
    key(3.25, 1.0, "X", Key::X),
    key(4.25, 1.0, "C", Key::C),
    key(5.25, 1.0, "V", Key::V),
    key(6.25, 1.0, "B", Key::B),
    key(7.25, 1.0, "N", Key::N),
    key(8.25, 1.0, ",", Key::Comma),
    key(9.25, 1.0, ";", Key::Semicolon),
    key(10.25, 1.0, ":", Key::Period),
    key(11.25, 1.0, "!", Key::Slash),
    key(12.25, 2.75, "Shift", Key::RightShift),
];

pub const COLEMAK_ROW1: &[KeyDef] = &[
    key(0.0, 1.5, "Tab", Key::Tab),
    key(1.5, 1.0, "Q", Key::Q),
    key(2.5, 1.0, "W", Key::W),
    key(3.5, 1.0, "F", Key::F),
    key(4.5, 1.0, "P", Key::P),
    key(5.5, 1.0, "G", Key::G),
    key(6.5, 1.0, "J", Key::J),
    key(7.5, 1.0, "L", Key::L),
    key(8.5, 1.0, "U", Key::U),
    key(9.5, 1.0, "Y", Key::Y),
    key(10.5, 1.0, ";", Key::Semicolon),
    key(11.5, 1.0, "[", Key::LeftBracket),
    key(12.5, 1.0, "]", Key::RightBracket),
    key(13.5, 1.5, "\\", Key::Backslash),
];

// Colemak puts a second backspace where caps lock usually sits
pub const COLEMAK_ROW2: &[KeyDef] = &[
    key(0.0, 1.75, "Bksp", Key::Backspace),
    key(1.75, 1.0, "A", Key::A),
    key(2.75, 1.0, "R", Key::R),
    key(3.75, 1.0, "S", Key::S),
    key(4.75, 1.0, "T", Key::T),
    key(5.75, 1.0, "D", Key::D),
    key(6.75, 1.0, "H", Key::H),
    key(7.75, 1.0, "N", Key::N),
    key(8.75, 1.0, "E", Key::E),
    key(9.75, 1.0, "I", Key::I),
    key(10.75, 1.0, "O", Key::O),
    key(11.75, 1.0, "'", Key::Apostrophe),
    key(12.75, 2.25, "Enter", Key::Enter),
];

pub const COLEMAK_ROW3: &[KeyDef] = &[
    key(0.0, 2.25, "Shift", Key::LeftShift),
    key(2.25, 1.0, "Z", Key::Z),
    key(3.25, 1.0, "X", Key::X),
    key(4.25, 1.0, "C", Key::C),
    key(5.25, 1.0, "V", Key::V),
    key(6.25, 1.0, "B", Key::B),
    key(7.25, 1.0, "K", Key::K),
    key(8.25, 1.0, "M", Key::M),
    key(9.25, 1.0, ",", Key::Comma),
    key(10.25, 1.0, ".", Key::Period),
    key(11.25, 1.0, "/", Key::Slash),
    key(12.25, 2.75, "Shift", Key::RightShift),
];

pub const DVORAK_ROW1: &[KeyDef] = &[
    key(0.0, 1.5, "Tab", Key::Tab),
    key(1.5, 1.0, "'", Key::Apostrophe),
    key(2.5, 1.0, ",", Key::Comma),
    key(3.5, 1.0, ".", Key::Period),
    key(4.5, 1.0, "P", Key::P),
    key(5.5, 1.0, "Y", Key::Y),
    key(6.5, 1.0, "F", Key::F),
    key(7.5, 1.0, "G", Key::G),
    key(8.5, 1.0, "C", Key::C),
    key(9.5, 1.0, "R", Key::R),
    key(10.5, 1.0, "L", Key::L),
    key(11.5, 1.0, "/", Key::Slash),
    key(12.5, 1.0, "=", Key::Equal),
    key(13.5, 1.5, "\\", Key::Backslash),
];

pub const DVORAK_ROW2: &[KeyDef] = &[
    key(0.0, 1.75, "Caps", Key::CapsLock),
    key(1.75, 1.0, "A", Key::A),
    key(2.75, 1.0, "O", Key::O),
    key(3.75, 1.0, "E", Key::E),
    key(4.75, 1.0, "U", Key::U),
    key(5.75, 1.0, "I", Key::I),
    key(6.75, 1.0, "D", Key::D),
    key(7.75, 1.0, "H", Key::H),
    key(8.75, 1.0, "T", Key::T),
    key(9.75, 1.0, "N", Key::N),
    key(10.75, 1.0, "S", Key::S),
    key(11.75, 1.0, "-", Key::Minus),
    key(12.75, 2.25, "Enter", Key::Enter),
];

pub const DVORAK_ROW3: &[KeyDef] = &[
    key(0.0, 2.25, "Shift", Key::LeftShift),
    key(2.25, 1.0, ";", Key::Semicolon),
    key(3.25, 1.0, "Q", Key::Q),
    key(4.25, 1.0, "J", Key::J),
    key(5.25, 1.0, "K", Key::K),
    key(6.25, 1.0, "X", Key::X),
    key(7.25, 1.0, "B", Key::B),
    key(8.25, 1.0, "M", Key::M),
    key(9.25, 1.0, "W", Key::W),
    key(10.25, 1.0, "V", Key::V),
    key(11.25, 1.0, "Z", Key::Z),
    key(12.25, 2.75, "Shift", Key::RightShift),
];
