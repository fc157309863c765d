//! Layout and timing constants for the TUI shell.
//!
//! Centralized location for numeric values used by rendering and the event
//! loop, so they can be tuned in one place.

use std::time::Duration;

/// Fill character of the separator row between history and text box.
pub const SEPARATOR_CHAR: char = '_';

/// History lines moved per mouse wheel notch.
pub const MOUSE_SCROLL_LINES: i64 = 3;

/// Event poll timeout while nothing is being transmitted.
pub const IDLE_POLL: Duration = Duration::from_millis(250);

/// Event poll timeout while a strobe is in flight.
///
/// Short enough that frame deadlines are checked at millisecond
/// granularity between key presses.
pub const ACTIVE_POLL: Duration = Duration::from_millis(1);

/// Terminal width assumed when the backend reports zero columns.
pub const FALLBACK_WIDTH: u16 = 80;
