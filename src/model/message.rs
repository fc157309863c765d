//! Operator messages and chat history entries.

use crate::model::error::MessageError;
use chrono::{DateTime, Local};

/// Maximum number of characters in a single transmitted message.
pub const MAX_MESSAGE_LEN: usize = 140;

/// An operator message awaiting encoding.
///
/// Length-bounded to [`MAX_MESSAGE_LEN`] characters. The character set is
/// checked by the codec, not here, so that unsupported input reports a
/// [`CodecError`](crate::model::CodecError) with the offending position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Message(String);

impl Message {
    /// Smart constructor enforcing the length bound.
    pub fn new(text: impl Into<String>) -> Result<Self, MessageError> {
        let text = text.into();
        let len = text.chars().count();
        if len > MAX_MESSAGE_LEN {
            return Err(MessageError::TooLong {
                len,
                limit: MAX_MESSAGE_LEN,
            });
        }
        Ok(Self(text))
    }

    /// Borrow the message text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters in the message.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// True for the empty message.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume into the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who produced a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Client notice (startup banner, device status, command feedback).
    System,
    /// A message the operator sent.
    User,
    /// A failure reported to the operator.
    Error,
}

/// One unit of chat history as originally appended.
///
/// Never mutated after creation. The wrapped display lines are derived
/// from [`LogicalEntry::rendered`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalEntry {
    kind: EntryKind,
    body: String,
    timestamp: DateTime<Local>,
}

impl LogicalEntry {
    /// Create an entry stamped with the current local time.
    pub fn new(kind: EntryKind, body: impl Into<String>) -> Self {
        Self::at(kind, body, Local::now())
    }

    /// Create an entry with an explicit timestamp.
    pub fn at(kind: EntryKind, body: impl Into<String>, timestamp: DateTime<Local>) -> Self {
        Self {
            kind,
            body: body.into(),
            timestamp,
        }
    }

    /// Shorthand for a [`EntryKind::System`] notice.
    pub fn system(body: impl Into<String>) -> Self {
        Self::new(EntryKind::System, body)
    }

    /// Shorthand for a [`EntryKind::Error`] notice.
    pub fn error(body: impl Into<String>) -> Self {
        Self::new(EntryKind::Error, body)
    }

    /// Shorthand for a sent operator message.
    pub fn user(message: &Message) -> Self {
        Self::new(EntryKind::User, message.as_str())
    }

    /// Entry kind.
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Raw body text without decoration.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// When the entry was appended.
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// The full line as shown in history, before wrapping.
    ///
    /// - System: `--- body ---`
    /// - User: `[HH:MM] You: body`
    /// - Error: `--- Error: body ---`
    pub fn rendered(&self) -> String {
        match self.kind {
            EntryKind::System => format!("--- {} ---", self.body),
            EntryKind::User => format!("[{}] You: {}", self.timestamp.format("%H:%M"), self.body),
            EntryKind::Error => format!("--- Error: {} ---", self.body),
        }
    }
}
