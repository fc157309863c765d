//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent operator intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
/// Printable characters that have no binding are inserted into the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Text entry
    /// Submit the in-progress input as a message or command. Default: Enter
    Submit,
    /// Delete the character before the cursor. Default: Backspace
    DeleteBefore,
    /// Move the cursor one character left. Default: ←
    CursorLeft,
    /// Move the cursor one character right. Default: →
    CursorRight,

    // History scrolling
    /// Scroll history up by one line. Default: ↑
    ScrollUp,
    /// Scroll history down by one line. Default: ↓
    ScrollDown,
    /// Scroll history up by one page. Default: Page Up
    PageUp,
    /// Scroll history down by one page. Default: Page Down
    PageDown,
    /// Jump to the newest history line and resume following. Default: End
    ScrollToBottom,

    // Application
    /// Exit the application. Default: Ctrl+c
    Quit,
}
