//! Chat log scroll offset.
//!
//! Offset 0 shows the oldest line at the top. The valid range is
//! `[0, max(0, total - height)]`; the upper bound is "at bottom".

/// Clamp a requested offset into `[0, max(0, total - height)]`.
///
/// Accepts any signed offset so callers can pass `current + delta` without
/// pre-checking for underflow.
pub fn clamp(offset: i64, total: usize, height: usize) -> usize {
    let max = max_offset(total, height);
    if offset <= 0 {
        0
    } else {
        usize::try_from(offset).map_or(max, |offset| offset.min(max))
    }
}

/// Bottom-most offset for `total` lines in a `height`-row viewport.
pub fn max_offset(total: usize, height: usize) -> usize {
    total.saturating_sub(height)
}

/// Scroll position that sticks to the bottom while the operator has not
/// scrolled away from it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollController {
    offset: usize,
}

impl ScrollController {
    /// Current offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// True when the offset is at the bottom for these dimensions.
    pub fn is_at_bottom(&self, total: usize, height: usize) -> bool {
        self.offset >= max_offset(total, height)
    }

    /// Move by `delta` lines (negative is up), clamped.
    pub fn scroll_by(&mut self, delta: i64, total: usize, height: usize) {
        let current = i64::try_from(self.offset).unwrap_or(i64::MAX);
        self.offset = clamp(current.saturating_add(delta), total, height);
    }

    /// Jump to the bottom.
    pub fn scroll_to_bottom(&mut self, total: usize, height: usize) {
        self.offset = max_offset(total, height);
    }

    /// The buffer grew from `previous_total` to `total` lines.
    ///
    /// Follows the new bottom if the offset was at the old bottom;
    /// otherwise only re-clamps.
    pub fn on_growth(&mut self, previous_total: usize, total: usize, height: usize) {
        if self.offset >= max_offset(previous_total, height) {
            self.scroll_to_bottom(total, height);
        } else {
            self.reclamp(total, height);
        }
    }

    /// The viewport or wrap changed. A pinned-to-bottom offset stays pinned.
    pub fn on_resize(&mut self, was_at_bottom: bool, total: usize, height: usize) {
        if was_at_bottom {
            self.scroll_to_bottom(total, height);
        } else {
            self.reclamp(total, height);
        }
    }

    fn reclamp(&mut self, total: usize, height: usize) {
        self.offset = self.offset.min(max_offset(total, height));
    }
}
