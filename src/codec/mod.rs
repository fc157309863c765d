//! Message compression and binary packing (pure).
//!
//! A [`Message`] is compressed against a fixed substitution dictionary into a
//! [`CompressedBlock`], which [`bits`] then spells out as a `'0'`/`'1'`
//! [`Bitstring`] for the strobe.
//!
//! # Block format
//!
//! | Byte(s)          | Meaning                                       |
//! |------------------|-----------------------------------------------|
//! | `0..=253`        | Dictionary code, expands to `DICTIONARY[code]`|
//! | `254 b`          | One verbatim byte `b`                         |
//! | `255 n b0..=bn`  | Verbatim run of `n + 1` bytes                 |
//!
//! Encoding is a greedy longest match, which is not optimal but is cheap and
//! deterministic. `decode(encode(m)) == m` holds for every message drawn from
//! printable ASCII.

pub mod bits;
pub mod dictionary;

pub use bits::{from_bits, to_bits, Bitstring};

use crate::model::{CodecError, Message};
use dictionary::{reverse_index, DICTIONARY, MAX_ENTRY_LEN};

/// Escape byte introducing a single verbatim byte.
pub(crate) const VERBATIM_BYTE: u8 = 254;

/// Escape byte introducing a verbatim run.
pub(crate) const VERBATIM_RUN: u8 = 255;

/// Longest run a single `VERBATIM_RUN` escape can carry.
const MAX_RUN: usize = 256;

/// Opaque compressed form of a [`Message`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompressedBlock(Vec<u8>);

impl CompressedBlock {
    /// Borrow the raw block bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Block length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the block of the empty message.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume into the raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for CompressedBlock {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Whether `ch` belongs to the transmittable alphabet (printable ASCII).
pub fn is_supported(ch: char) -> bool {
    (' '..='~').contains(&ch)
}

/// Compress a message.
///
/// # Errors
///
/// Returns [`CodecError::UnsupportedInput`] for the first character outside
/// printable ASCII. The empty message yields an empty block.
pub fn encode(message: &Message) -> Result<CompressedBlock, CodecError> {
    let text = message.as_str();
    if let Some((position, ch)) = text.chars().enumerate().find(|(_, ch)| !is_supported(*ch)) {
        return Err(CodecError::UnsupportedInput { ch, position });
    }

    // Printable ASCII only from here on, so byte slices are valid str.
    let bytes = text.as_bytes();
    let index = reverse_index();
    let mut out = Vec::with_capacity(bytes.len());
    let mut pending = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let longest = MAX_ENTRY_LEN.min(bytes.len() - pos);
        let hit = (1..=longest).rev().find_map(|len| {
            std::str::from_utf8(&bytes[pos..pos + len])
                .ok()
                .and_then(|fragment| index.get(fragment))
                .map(|&code| (code, len))
        });

        match hit {
            Some((code, len)) => {
                flush_verbatim(&mut out, &mut pending);
                out.push(code);
                pos += len;
            }
            None => {
                pending.push(bytes[pos]);
                pos += 1;
                if pending.len() == MAX_RUN {
                    flush_verbatim(&mut out, &mut pending);
                }
            }
        }
    }
    flush_verbatim(&mut out, &mut pending);

    Ok(CompressedBlock(out))
}

fn flush_verbatim(out: &mut Vec<u8>, pending: &mut Vec<u8>) {
    match pending.len() {
        0 => {}
        1 => {
            out.push(VERBATIM_BYTE);
            out.push(pending[0]);
        }
        n => {
            out.push(VERBATIM_RUN);
            // n is in 2..=MAX_RUN, so n - 1 fits a byte
            out.push((n - 1) as u8);
            out.extend_from_slice(pending);
        }
    }
    pending.clear();
}

/// Decompress a block produced by [`encode`].
///
/// # Errors
///
/// Returns [`CodecError::MalformedBlock`] for codes outside the dictionary,
/// truncated escapes, or verbatim bytes outside printable ASCII, and
/// [`CodecError::InvalidMessage`] if the text exceeds the message limit.
pub fn decode(block: &CompressedBlock) -> Result<Message, CodecError> {
    let bytes = block.as_bytes();
    let mut text = String::with_capacity(bytes.len() * 2);
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            VERBATIM_BYTE => {
                let b = *bytes
                    .get(i + 1)
                    .ok_or(CodecError::MalformedBlock { offset: i })?;
                push_verbatim(&mut text, b, i + 1)?;
                i += 2;
            }
            VERBATIM_RUN => {
                let n = *bytes
                    .get(i + 1)
                    .ok_or(CodecError::MalformedBlock { offset: i })? as usize
                    + 1;
                let run = bytes
                    .get(i + 2..i + 2 + n)
                    .ok_or(CodecError::MalformedBlock { offset: i })?;
                for (k, &b) in run.iter().enumerate() {
                    push_verbatim(&mut text, b, i + 2 + k)?;
                }
                i += 2 + n;
            }
            code => {
                let entry = DICTIONARY
                    .get(code as usize)
                    .ok_or(CodecError::MalformedBlock { offset: i })?;
                text.push_str(entry);
                i += 1;
            }
        }
    }

    Ok(Message::new(text)?)
}

fn push_verbatim(text: &mut String, b: u8, offset: usize) -> Result<(), CodecError> {
    let ch = char::from(b);
    if !is_supported(ch) {
        return Err(CodecError::MalformedBlock { offset });
    }
    text.push(ch);
    Ok(())
}

/// Compress a message and spell the block out as a bitstring.
pub fn encode_to_bits(message: &Message) -> Result<(CompressedBlock, Bitstring), CodecError> {
    let block = encode(message)?;
    let bits = to_bits(block.as_bytes());
    Ok((block, bits))
}
