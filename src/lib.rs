//! Modulated Light Transceiver Client (mltc)
//!
//! Terminal chat client that compresses short text messages into a compact
//! byte form and transmits them as timed on/off light pulses, either on a
//! strobe panel in the terminal or by writing the compressed bytes to a
//! serial-attached transmitter.
//!
//! Follows a Pure Core / Impure Shell split: `codec`, `transmit` and `state`
//! are pure; `transport` and `view` perform I/O.

pub mod codec;
pub mod config;
pub mod logging;
pub mod model;
pub mod state;
pub mod transmit;
pub mod transport;
pub mod view;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
