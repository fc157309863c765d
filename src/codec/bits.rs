//! Byte <-> textual bit sequence conversion.
//!
//! One character per bit, most-significant bit first, bytes concatenated in
//! order. No framing, start/stop bits or checksum.

use crate::model::BitParseError;

/// A validated sequence of `'0'`/`'1'` characters whose length is a
/// multiple of 8.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bitstring(String);

impl Bitstring {
    /// Validate a textual bitstring.
    pub fn parse(text: &str) -> Result<Self, BitParseError> {
        validate(text)?;
        Ok(Self(text.to_string()))
    }

    /// Borrow the `'0'`/`'1'` text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no bits.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bit value at `index`, if in range.
    pub fn bit(&self, index: usize) -> Option<bool> {
        self.0.as_bytes().get(index).map(|&b| b == b'1')
    }

    /// Iterate the bits in transmit order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.bytes().map(|b| b == b'1')
    }

    /// Append another bitstring (byte alignment is preserved).
    pub fn append(&mut self, other: &Bitstring) {
        self.0.push_str(&other.0);
    }
}

impl std::fmt::Display for Bitstring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Spell each byte as 8 characters, MSB first.
pub fn to_bits(bytes: &[u8]) -> Bitstring {
    let mut text = String::with_capacity(bytes.len() * 8);
    for byte in bytes {
        for shift in (0..8).rev() {
            text.push(if (byte >> shift) & 1 == 1 { '1' } else { '0' });
        }
    }
    Bitstring(text)
}

/// Inverse of [`to_bits`].
///
/// # Errors
///
/// [`BitParseError::BadLength`] when the character count is not a multiple
/// of 8 (checked first), [`BitParseError::BadSymbol`] for the first
/// character that is neither `'0'` nor `'1'`.
pub fn from_bits(text: &str) -> Result<Vec<u8>, BitParseError> {
    validate(text)?;
    Ok(text
        .as_bytes()
        .chunks(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &b| (acc << 1) | (b - b'0')))
        .collect())
}

fn validate(text: &str) -> Result<(), BitParseError> {
    let len = text.chars().count();
    if len % 8 != 0 {
        return Err(BitParseError::BadLength { len });
    }
    if let Some((position, symbol)) = text
        .chars()
        .enumerate()
        .find(|(_, c)| *c != '0' && *c != '1')
    {
        return Err(BitParseError::BadSymbol { symbol, position });
    }
    Ok(())
}
