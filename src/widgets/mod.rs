//! Input-device widgets
//!
//! Each widget owns a context (style plus identifier sets) that the
//! application creates once and passes into every render call. Rendering
//! itself is stateless apart from the mouse's record-on-click toggle.

pub mod gamepad;
pub mod highlight;
pub mod keyboard;
pub mod mouse;

pub use gamepad::{GamepadColor, GamepadContext, GamepadLayout, GamepadOptions, GamepadStyle};
pub use highlight::IdSet;
pub use keyboard::{KeyboardColor, KeyboardContext, KeyboardLayout, KeyboardOptions, KeyboardStyle};
pub use mouse::{MouseColor, MouseContext, MouseLayout, MouseOptions, MouseStyle};

/// Live and caller-controlled state of one drawable element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementState {
    pub pressed: bool,
    pub highlighted: bool,
    pub recorded: bool,
}

/// Which translucent overlay an element gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Pressed,
    Highlighted,
    Recorded,
    PressedHighlighted,
}

impl ElementState {
    /// Pressed wins over highlighted, which wins over recorded
    pub fn overlay(self) -> Option<Overlay> {
        if self.pressed {
            Some(Overlay::Pressed)
        } else if self.highlighted {
            Some(Overlay::Highlighted)
        } else if self.recorded {
            Some(Overlay::Recorded)
        } else {
            None
        }
    }

    /// Like [`ElementState::overlay`], but pressed and highlighted together get their own overlay
    pub fn overlay_with_combined(self) -> Option<Overlay> {
        if self.pressed && self.highlighted {
            Some(Overlay::PressedHighlighted)
        } else {
            self.overlay()
        }
    }
}
