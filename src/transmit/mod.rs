//! Timed strobe transmission.
//!
//! Turns a [`Bitstring`](crate::codec::Bitstring) into a paced sequence of
//! [`LightSignal`] assertions on a [`SignalSink`], using a millisecond
//! [`Clock`].

pub mod clock;
pub mod rate;
pub mod scheduler;
pub mod signal;

pub use clock::{Clock, ManualClock, SystemClock};
pub use rate::FrameRate;
pub use scheduler::{step, Step, Tick, Transmission, TransmissionReport};
pub use signal::{LightSignal, RecordingSink, Rgb, SignalSink, StrobePanel};

use serde::Deserialize;

/// How a submitted message's strobe is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransmitMode {
    /// One frame per UI loop iteration; input stays responsive.
    #[default]
    Interleaved,
    /// Run the whole strobe before handling more input.
    Blocking,
}

/// Where a submitted message goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Drive the strobe panel; also write the block to a connected device.
    #[default]
    Strobe,
    /// Write the block to the serial device only.
    Serial,
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strobe => f.write_str("strobe"),
            Self::Serial => f.write_str("serial"),
        }
    }
}

impl std::fmt::Display for TransmitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Interleaved => f.write_str("interleaved"),
            Self::Blocking => f.write_str("blocking"),
        }
    }
}
