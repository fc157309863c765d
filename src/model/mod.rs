//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod key_action;
pub mod message;

// Re-export for convenience
pub use error::{
    AppError, BitParseError, CodecError, CommandError, MessageError, PresentationError,
    SchedulerError, TransportError, WrapError,
};
pub use key_action::KeyAction;
pub use message::{EntryKind, LogicalEntry, Message, MAX_MESSAGE_LEN};
