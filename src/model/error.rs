//! Error types for the mltc application.
//!
//! This module defines the error taxonomy using `thiserror` for structured error
//! handling. Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Session startup failures
//!   - [`TransportError`] - Serial device acquisition and write failures
//! - [`CodecError`] - Message compression / block decoding failures
//! - [`BitParseError`] - Malformed bitstrings
//! - [`SchedulerError`] - Invalid transmission frame rates
//! - [`WrapError`] - Internal word-wrap invariant violations
//! - [`PresentationError`] - Failures pushing a light state to the strobe sink
//! - [`CommandError`] - Malformed operator commands
//!
//! # Error Recovery Strategy
//!
//! Only terminal failures and a startup device failure in serial output mode
//! are fatal. Everything else is surfaced as an error entry in the chat
//! history and the session keeps running: a bad `/setfps` argument, a failed
//! device write, or a `/connect` that exhausts its probing budget leave the
//! session state unchanged apart from the appended error line.

use std::path::PathBuf;
use thiserror::Error;

/// Failure that stops the session before its event loop starts.
///
/// Configuration and terminal failures surface separately through
/// [`ConfigError`](crate::config::ConfigError) and
/// [`TuiError`](crate::view::TuiError).
#[derive(Debug, Error)]
pub enum AppError {
    /// Serial device could not be acquired at startup.
    ///
    /// Fatal only in serial output mode without `--debug`; everywhere else
    /// acquisition failures are reported in the history instead.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Errors produced by the dictionary codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The message contains a character outside printable ASCII.
    ///
    /// `position` is the character index (not byte index) of the first
    /// offending character.
    #[error("Unsupported character {ch:?} at position {position}")]
    UnsupportedInput {
        /// The rejected character.
        ch: char,
        /// Character index within the message.
        position: usize,
    },

    /// A compressed block references an unknown code or ends inside a
    /// verbatim sequence.
    #[error("Malformed compressed block at byte {offset}")]
    MalformedBlock {
        /// Byte offset of the first byte that could not be decoded.
        offset: usize,
    },

    /// A block decoded to text that is not a valid message.
    #[error("Decoded text is not a valid message: {0}")]
    InvalidMessage(#[from] MessageError),
}

/// Errors constructing a [`Message`](crate::model::Message).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MessageError {
    /// Message is longer than the transmit limit.
    #[error("Message is {len} characters long (limit {limit})")]
    TooLong {
        /// Actual length in characters.
        len: usize,
        /// Maximum accepted length.
        limit: usize,
    },
}

/// Errors parsing a textual bitstring back to bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BitParseError {
    /// Length is not a multiple of 8.
    #[error("Bitstring length {len} is not a multiple of 8")]
    BadLength {
        /// Number of characters in the rejected bitstring.
        len: usize,
    },

    /// A character other than `'0'` or `'1'` was found.
    #[error("Invalid bit symbol {symbol:?} at position {position}")]
    BadSymbol {
        /// The offending character.
        symbol: char,
        /// Character index of the offending symbol.
        position: usize,
    },
}

/// Errors configuring the transmission scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// Frame rate is zero, negative, or faster than millisecond resolution.
    #[error("InvalidRate: {fps} fps is outside 1..={max}")]
    InvalidRate {
        /// Requested frames per second.
        fps: i64,
        /// Highest accepted frame rate.
        max: u32,
    },
}

/// Internal invariant violations in the word-wrap algorithm.
///
/// These should never be observable; they exist so a broken invariant is
/// reported loudly instead of rendering a placeholder line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WrapError {
    /// A produced line exceeded the wrap width, or chunking left a remainder.
    #[error("Wrap invariant violated at width {width}: {detail}")]
    InvariantViolation {
        /// Wrap width in effect.
        width: usize,
        /// What went wrong.
        detail: String,
    },
}

/// Errors acquiring or writing to the serial device.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No device node matched after the bounded probe.
    #[error("Could not detect serial device ({prefix}0..{prefix}{scan_limit}, {attempts} attempts)")]
    NotFound {
        /// Device path prefix that was probed.
        prefix: String,
        /// Number of probe passes made.
        attempts: u32,
        /// Exclusive upper bound of the index scan.
        scan_limit: u32,
    },

    /// A device node exists but could not be opened for writing.
    #[error("Error opening serial connection at {path}: {source}")]
    Open {
        /// Device path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing to an open link failed.
    #[error("Error writing to {location}: {source}")]
    Write {
        /// Human-readable device location.
        location: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A send was attempted without an open link.
    #[error("Device is not connected")]
    Disconnected,
}

/// Failure pushing a light state to the presentation sink.
#[derive(Debug, Error)]
pub enum PresentationError {
    /// The terminal backing the strobe panel failed to draw.
    #[error("Strobe panel draw failed: {0}")]
    Draw(#[from] std::io::Error),
}

/// Errors parsing an operator command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// A `/`-prefixed line that names no known command.
    #[error("Unknown command: {0}")]
    Unknown(String),

    /// A command received a missing or non-numeric argument.
    #[error("Invalid argument for {command}: {reason}")]
    InvalidArgument {
        /// Command name including the leading slash.
        command: &'static str,
        /// Why the argument was rejected.
        reason: String,
    },

    /// `/setfps` received a rate the scheduler rejects.
    #[error(transparent)]
    Rate(#[from] SchedulerError),

    /// Plain text that cannot become a [`Message`](crate::model::Message).
    #[error(transparent)]
    Message(#[from] MessageError),
}
