//! In-progress input and its cursor.
//!
//! The text box owns the logical cursor index; the display position is
//! always re-derived from it with [`TextBox::position_of`], never adjusted
//! on its own, so many edits cannot drift the two apart.

use crate::model::MAX_MESSAGE_LEN;

/// The message being typed, laid out row-major in a `width`-wide box whose
/// first row is `top_row`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBox {
    text: Vec<char>,
    index: usize,
    width: usize,
    top_row: usize,
}

impl TextBox {
    /// Empty text box.
    pub fn new(width: usize, top_row: usize) -> Self {
        Self {
            text: Vec::new(),
            index: 0,
            width: width.max(1),
            top_row,
        }
    }

    /// Logical index for a display position.
    ///
    /// `(row - top_row) * width + col`, or `None` when the position is
    /// above the box, past the right edge, or past the end of the input.
    pub fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.top_row || col >= self.width {
            return None;
        }
        let index = (row - self.top_row) * self.width + col;
        (index <= self.text.len()).then_some(index)
    }

    /// Display position `(row, col)` of a logical index.
    pub fn position_of(&self, index: usize) -> (usize, usize) {
        (self.top_row + index / self.width, index % self.width)
    }

    /// Display position of the cursor.
    pub fn cursor(&self) -> (usize, usize) {
        self.position_of(self.index)
    }

    /// Logical cursor index in `0..=len`.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of characters typed.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// True when nothing has been typed.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True when another character would exceed the message limit.
    pub fn is_full(&self) -> bool {
        self.text.len() >= MAX_MESSAGE_LEN
    }

    /// The typed text.
    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    /// Wrap width of the box.
    pub fn width(&self) -> usize {
        self.width
    }

    /// First display row of the box.
    pub fn top_row(&self) -> usize {
        self.top_row
    }

    /// Insert `ch` at `index` and place the cursor after it.
    ///
    /// Returns false (and changes nothing) when the box is full or `index`
    /// is past the end.
    pub fn insert(&mut self, index: usize, ch: char) -> bool {
        if self.is_full() || index > self.text.len() {
            return false;
        }
        self.text.insert(index, ch);
        self.index = index + 1;
        true
    }

    /// Insert at the cursor.
    pub fn insert_at_cursor(&mut self, ch: char) -> bool {
        self.insert(self.index, ch)
    }

    /// Delete the character before `index` and place the cursor there.
    ///
    /// Returns false at index 0 or past the end.
    pub fn delete_before(&mut self, index: usize) -> bool {
        if index == 0 || index > self.text.len() {
            return false;
        }
        self.text.remove(index - 1);
        self.index = index - 1;
        true
    }

    /// Delete the character before the cursor.
    pub fn delete_before_cursor(&mut self) -> bool {
        self.delete_before(self.index)
    }

    /// Move one character left; at column 0 this lands on the previous
    /// row's last column when there is a previous row.
    pub fn move_left(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Move one character right; a no-op at the end of input.
    pub fn move_right(&mut self) -> bool {
        if self.index >= self.text.len() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Move the cursor to a display position, if it maps into the input.
    pub fn move_to(&mut self, row: usize, col: usize) -> bool {
        match self.index_of(row, col) {
            Some(index) => {
                self.index = index;
                true
            }
            None => false,
        }
    }

    /// Adopt a new layout. The logical index is kept; the display position
    /// follows from it.
    pub fn resize(&mut self, width: usize, top_row: usize) {
        self.width = width.max(1);
        self.top_row = top_row;
    }

    /// Take the typed text, leaving the box empty with the cursor at 0.
    pub fn take(&mut self) -> String {
        self.index = 0;
        std::mem::take(&mut self.text).into_iter().collect()
    }
}

#[cfg(test)]
#[path = "cursor_tests.rs"]
mod tests;
