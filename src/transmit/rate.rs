//! Frame rate newtype.

use crate::model::SchedulerError;

/// Frames per second driving the strobe, validated to `1..=MAX_FPS`.
///
/// The frame period is whole milliseconds (`1000 / fps`, truncated), so the
/// upper bound keeps the period at least 1 ms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameRate(u32);

impl FrameRate {
    /// Highest accepted frame rate.
    pub const MAX_FPS: u32 = 1000;

    /// Default rate: one bit every 100 ms.
    pub const DEFAULT: Self = Self(10);

    /// Smart constructor.
    ///
    /// Takes a signed value so operator input like `/setfps -5` is rejected
    /// with the same error as zero.
    pub fn new(fps: i64) -> Result<Self, SchedulerError> {
        match u32::try_from(fps) {
            Ok(fps) if (1..=Self::MAX_FPS).contains(&fps) => Ok(Self(fps)),
            _ => Err(SchedulerError::InvalidRate {
                fps,
                max: Self::MAX_FPS,
            }),
        }
    }

    /// Frames per second.
    pub fn fps(&self) -> u32 {
        self.0
    }

    /// Milliseconds between consecutive frames.
    pub fn period_ms(&self) -> u64 {
        1000 / u64::from(self.0)
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for FrameRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} fps", self.0)
    }
}
