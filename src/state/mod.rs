//! UI state machine (pure).
//!
//! All state transitions are plain functions on [`SessionState`] and its
//! parts, testable without a terminal.

pub mod command;
pub mod cursor;
pub mod geometry;
pub mod line_buffer;
pub mod scroll;
pub mod session;

// Re-export for convenience
pub use command::Command;
pub use cursor::TextBox;
pub use geometry::ScreenGeometry;
pub use line_buffer::{wrap_all, wrap_entry, DisplayLine, LineBuffer};
pub use scroll::{clamp, ScrollController};
pub use session::{Effect, SessionSettings, SessionState};
