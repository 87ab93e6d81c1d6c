//! On-screen keyboard, mouse and gamepad widgets for immediate-mode UIs.
//!
//! Widgets draw through the host-neutral [`paint::DrawList`] and read input
//! through [`input::InputQuery`]; [`host::Ui`] bundles both with the layout
//! cursor. The terminal demo in [`frontend`] renders them with ratatui.

pub mod config;
pub mod demo;
pub mod frontend;
pub mod host;
pub mod input;
pub mod paint;
pub mod widgets;

pub use config::Config;
pub use demo::DemoApp;
pub use host::{Frame, Ui};
pub use widgets::{GamepadContext, KeyboardContext, MouseContext};
