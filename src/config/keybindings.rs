//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Keys without a binding fall through to text entry, so printable
/// characters are never bound here.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Only code and modifiers take part in the match; event kind and state
    /// flags are ignored.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();
        let mut bind = |code: KeyCode, modifiers: KeyModifiers, action: KeyAction| {
            bindings.insert(KeyEvent::new(code, modifiers), action);
        };

        // Editing
        bind(KeyCode::Enter, KeyModifiers::NONE, KeyAction::Submit);
        bind(KeyCode::Backspace, KeyModifiers::NONE, KeyAction::DeleteBefore);
        bind(KeyCode::Left, KeyModifiers::NONE, KeyAction::CursorLeft);
        bind(KeyCode::Right, KeyModifiers::NONE, KeyAction::CursorRight);

        // History scrolling
        bind(KeyCode::Up, KeyModifiers::NONE, KeyAction::ScrollUp);
        bind(KeyCode::Down, KeyModifiers::NONE, KeyAction::ScrollDown);
        bind(KeyCode::PageUp, KeyModifiers::NONE, KeyAction::PageUp);
        bind(KeyCode::PageDown, KeyModifiers::NONE, KeyAction::PageDown);
        bind(KeyCode::End, KeyModifiers::NONE, KeyAction::ScrollToBottom);

        // Application
        bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        Self { bindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    #[test]
    fn enter_submits() {
        let bindings = KeyBindings::default();
        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(bindings.get(key), Some(KeyAction::Submit));
    }

    #[test]
    fn ctrl_c_quits() {
        let bindings = KeyBindings::default();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(bindings.get(key), Some(KeyAction::Quit));
    }

    #[test]
    fn plain_characters_are_unbound() {
        let bindings = KeyBindings::default();
        for ch in ['c', 'j', 'k', 'q', '/', ' '] {
            let key = KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE);
            assert_eq!(bindings.get(key), None, "{:?} should reach the text box", ch);
        }
    }

    #[test]
    fn arrows_split_between_cursor_and_history() {
        let bindings = KeyBindings::default();
        let get = |code| bindings.get(KeyEvent::new(code, KeyModifiers::NONE));
        assert_eq!(get(KeyCode::Left), Some(KeyAction::CursorLeft));
        assert_eq!(get(KeyCode::Right), Some(KeyAction::CursorRight));
        assert_eq!(get(KeyCode::Up), Some(KeyAction::ScrollUp));
        assert_eq!(get(KeyCode::Down), Some(KeyAction::ScrollDown));
    }

    #[test]
    fn lookup_ignores_event_kind_and_state() {
        let bindings = KeyBindings::default();
        let key = KeyEvent {
            code: KeyCode::Backspace,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Repeat,
            state: KeyEventState::NUM_LOCK,
        };
        assert_eq!(bindings.get(key), Some(KeyAction::DeleteBefore));
    }
}
