//! TUI Frontend (ratatui-based)
//!
//! Wraps crossterm for terminal management and events, and rasterizes the
//! widgets into the ratatui buffer through [`BufferPainter`].

pub mod app;
pub mod painter;

pub use app::TuiFrontend;
pub use painter::BufferPainter;
