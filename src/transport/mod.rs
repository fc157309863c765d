//! Byte transports to a serial-attached transceiver.
//!
//! [`Transport`] acquires a [`Link`]; the link is released when dropped.
//! Writes are fire-and-forget: no framing, acknowledgment, or retry.

#[cfg(test)]
pub mod memory;
pub mod serial;

#[cfg(test)]
pub use memory::MemoryTransport;
pub use serial::{LineSettings, Parity, SerialTransport};

use crate::model::TransportError;

/// An open, single-writer connection to a device.
pub trait Link {
    /// Write the whole buffer once.
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError>;

    /// Human-readable location, e.g. `/dev/ttyACM0`.
    fn location(&self) -> &str;
}

/// Something that can acquire a [`Link`].
pub trait Transport {
    /// Find and open a device.
    fn open(&mut self) -> Result<Box<dyn Link>, TransportError>;
}

impl std::fmt::Debug for dyn Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Link")
            .field("location", &self.location())
            .finish()
    }
}
