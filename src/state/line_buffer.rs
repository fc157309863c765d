//! Chat history and its word-wrapped display lines.
//!
//! The history is stored once, as [`LogicalEntry`] values. Display lines are
//! a pure function of `(entries, width)` computed by [`wrap_all`]; the
//! [`LineBuffer`] only memoizes the last result and regenerates it wholesale
//! when either input changes.

use crate::model::{LogicalEntry, WrapError};

/// One wrapped row of history text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    /// Index of the owning entry in the history.
    pub entry: usize,
    /// Text of the row, at most the wrap width in characters.
    pub text: String,
}

/// Greedy word-wrap of one entry's text.
///
/// Text is split on single spaces. A token is appended with a trailing space
/// while `current_len + token_len + 1 <= width`; otherwise the current line
/// is flushed first. Tokens of `width` characters or more are cut into
/// `width`-sized chunks and line filling continues from the last partial
/// chunk. Full lines keep their trailing space; the last line of the entry
/// has one trailing space removed. Width 0 yields no lines.
pub fn wrap_entry(text: &str, width: usize) -> Result<Vec<String>, WrapError> {
    if width == 0 {
        return Ok(Vec::new());
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for token in text.split(' ') {
        let token_len = token.chars().count();

        if token_len >= width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = token.chars().collect();
            let mut chunks = chars.chunks(width).peekable();
            while let Some(chunk) = chunks.next() {
                if chunk.len() == width {
                    lines.push(chunk.iter().collect());
                } else if chunks.peek().is_none() {
                    current = chunk.iter().collect();
                    current.push(' ');
                    current_len = chunk.len() + 1;
                } else {
                    return Err(WrapError::InvariantViolation {
                        width,
                        detail: format!("short chunk of {} chars before end of token", chunk.len()),
                    });
                }
            }
            continue;
        }

        if current_len + token_len + 1 > width && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        current.push_str(token);
        current.push(' ');
        current_len += token_len + 1;
    }

    if current_len > 0 || lines.is_empty() {
        if current.ends_with(' ') {
            current.pop();
        }
        lines.push(current);
    }

    if let Some(line) = lines.iter().find(|line| line.chars().count() > width) {
        return Err(WrapError::InvariantViolation {
            width,
            detail: format!("line {:?} exceeds width", line),
        });
    }

    Ok(lines)
}

/// Wrap every entry, in order, tagging each line with its entry index.
pub fn wrap_all(entries: &[LogicalEntry], width: usize) -> Result<Vec<DisplayLine>, WrapError> {
    let mut out = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        for text in wrap_entry(&entry.rendered(), width)? {
            out.push(DisplayLine { entry: index, text });
        }
    }
    Ok(out)
}

/// Append-only chat history with memoized display lines.
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    entries: Vec<LogicalEntry>,
    width: usize,
    lines: Vec<DisplayLine>,
    /// `(width, entry count)` the cached lines were computed for.
    wrapped_for: Option<(usize, usize)>,
}

impl LineBuffer {
    /// Empty history wrapped at `width`.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    /// Append an entry and regenerate the display lines.
    pub fn append(&mut self, entry: LogicalEntry) -> Result<(), WrapError> {
        self.entries.push(entry);
        self.refresh()
    }

    /// Change the wrap width and regenerate the display lines.
    pub fn rewrap(&mut self, width: usize) -> Result<(), WrapError> {
        self.width = width;
        self.refresh()
    }

    fn refresh(&mut self) -> Result<(), WrapError> {
        let key = (self.width, self.entries.len());
        if self.wrapped_for == Some(key) {
            return Ok(());
        }
        self.lines = wrap_all(&self.entries, self.width)?;
        self.wrapped_for = Some(key);
        Ok(())
    }

    /// Raw history in append order.
    pub fn entries(&self) -> &[LogicalEntry] {
        &self.entries
    }

    /// Current display lines.
    pub fn lines(&self) -> &[DisplayLine] {
        &self.lines
    }

    /// Number of display lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Current wrap width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Up to `height` lines starting at `offset`.
    pub fn visible(&self, offset: usize, height: usize) -> &[DisplayLine] {
        let start = offset.min(self.lines.len());
        let end = start.saturating_add(height).min(self.lines.len());
        &self.lines[start..end]
    }
}

#[cfg(test)]
#[path = "line_buffer_tests.rs"]
mod tests;
