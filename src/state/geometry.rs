//! Screen regions derived from the terminal size.
//!
//! ```text
//! row 0                 ┐
//! ...                   │ chat log (chatlog_height rows)
//! row sep-1             ┘
//! row sep               separator / status
//! row sep+1             ┐
//! ...                   │ text box (textbox_height rows)
//! row H-1               ┘
//! ```

use crate::model::MAX_MESSAGE_LEN;

/// Character-cell layout of the chat area.
///
/// `width` is the chat area width (terminal width minus the strobe panel),
/// never less than 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenGeometry {
    width: usize,
    height: usize,
}

impl ScreenGeometry {
    /// Geometry for a chat area of `width` x `height` cells.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.max(1),
            height,
        }
    }

    /// Chat area width in cells (the wrap width).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Total height in rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Rows needed to show a full-length message: `ceil(140 / width)`.
    pub fn textbox_height(&self) -> usize {
        MAX_MESSAGE_LEN.div_ceil(self.width)
    }

    /// Row of the separator line. Saturates at 0 on very short terminals.
    pub fn separator_row(&self) -> usize {
        self.height.saturating_sub(self.textbox_height() + 1)
    }

    /// First row of the text box.
    pub fn textbox_top(&self) -> usize {
        self.separator_row() + 1
    }

    /// Rows available to the chat log.
    pub fn chatlog_height(&self) -> usize {
        self.separator_row()
    }
}

impl Default for ScreenGeometry {
    fn default() -> Self {
        Self::new(80, 24)
    }
}
