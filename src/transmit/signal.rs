//! Light states and the presentation sink they are pushed to.

use crate::model::PresentationError;

/// State asserted on the strobe for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LightSignal {
    /// Bit `1`.
    On,
    /// Bit `0`, and the resting state after a transmission.
    Off,
    /// Nothing has been transmitted yet.
    #[default]
    Idle,
}

impl LightSignal {
    /// Signal for a single bit.
    pub fn from_bit(bit: bool) -> Self {
        if bit {
            Self::On
        } else {
            Self::Off
        }
    }

    /// Color shown on the strobe panel for this state.
    pub fn color(&self) -> Rgb {
        match self {
            Self::On => Rgb::GREEN,
            Self::Off => Rgb::RED,
            Self::Idle => Rgb::BLACK,
        }
    }
}

/// 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Color of an "on" frame.
    pub const GREEN: Self = Self { r: 0, g: 255, b: 0 };
    /// Color of an "off" frame.
    pub const RED: Self = Self { r: 255, g: 0, b: 0 };
    /// Idle color.
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };
}

/// Receiver of light-state assertions, one per scheduler frame.
pub trait SignalSink {
    /// Make `signal` visible now.
    fn assert_signal(&mut self, signal: LightSignal) -> Result<(), PresentationError>;
}

impl<F> SignalSink for F
where
    F: FnMut(LightSignal) -> Result<(), PresentationError>,
{
    fn assert_signal(&mut self, signal: LightSignal) -> Result<(), PresentationError> {
        self(signal)
    }
}

/// Sink that records every assertion in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink(pub Vec<LightSignal>);

impl SignalSink for RecordingSink {
    fn assert_signal(&mut self, signal: LightSignal) -> Result<(), PresentationError> {
        self.0.push(signal);
        Ok(())
    }
}

/// In-memory strobe panel state rendered by the view layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrobePanel {
    current: LightSignal,
    transitions: u64,
}

impl StrobePanel {
    /// Currently asserted state.
    pub fn current(&self) -> LightSignal {
        self.current
    }

    /// Number of assertions received since startup.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }
}

impl SignalSink for StrobePanel {
    fn assert_signal(&mut self, signal: LightSignal) -> Result<(), PresentationError> {
        self.current = signal;
        self.transitions += 1;
        Ok(())
    }
}
