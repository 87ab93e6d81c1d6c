//! Frontend abstraction layer
//!
//! A frontend turns platform input into [`FrontendEvent`]s and draws the
//! [`DemoApp`] each frame. The terminal frontend is the only one shipped.

pub mod events;
pub mod tui;

use crate::demo::DemoApp;
use anyhow::Result;
pub use events::FrontendEvent;
pub use tui::TuiFrontend;

pub trait Frontend {
    /// Return all pending events (empty if none arrived within the frame timeout)
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>>;

    /// Draw one frame.
    ///
    /// Takes the app mutably: rendering records the screen areas used for
    /// hit-testing, and the mouse widget toggles recorded buttons on click.
    fn render(&mut self, app: &mut DemoApp) -> Result<()>;

    /// Restore the terminal
    fn cleanup(&mut self) -> Result<()>;

    /// Current size in terminal cells
    fn size(&self) -> (u16, u16);
}
