//! Frame-paced transmission of a bitstring.
//!
//! The pacing rule lives in [`step`], a pure function of the current
//! deadline, the clock reading and the next bit. Both delivery modes call it:
//!
//! - [`Transmission::tick`] advances at most one frame per call and is driven
//!   by the UI loop (interleaved mode).
//! - [`Transmission::run_blocking`] repeats `tick` until the bitstring is
//!   exhausted, idling on the clock between frames (blocking mode).
//!
//! Deadlines advance by exactly one period per frame, never reset to `now`,
//! so lateness on one frame is absorbed by the following ones instead of
//! accumulating.

use crate::codec::Bitstring;
use crate::model::PresentationError;
use crate::transmit::{Clock, FrameRate, LightSignal, SignalSink};

/// Outcome of one pacing decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Less than one period has elapsed since the deadline.
    Wait,
    /// Assert `signal` and move the deadline forward.
    Emit {
        /// State for the consumed bit.
        signal: LightSignal,
        /// New deadline (`old + period`).
        deadline: u64,
    },
    /// No bits remain: assert the final off state and stop.
    Finish {
        /// New deadline (`old + period`).
        deadline: u64,
    },
}

/// Decide what happens at time `now` given the current `deadline`.
pub fn step(deadline: u64, now: u64, period_ms: u64, next_bit: Option<bool>) -> Step {
    if now.saturating_sub(deadline) < period_ms {
        return Step::Wait;
    }
    let deadline = deadline + period_ms;
    match next_bit {
        Some(bit) => Step::Emit {
            signal: LightSignal::from_bit(bit),
            deadline,
        },
        None => Step::Finish { deadline },
    }
}

/// Timing summary of a completed transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransmissionReport {
    /// Bit frames asserted (the final off assertion is not counted).
    pub frames: u64,
    /// Wall-clock milliseconds from start to the final assertion.
    pub elapsed_ms: u64,
}

impl TransmissionReport {
    /// Achieved frames per second; 0 when no time elapsed.
    pub fn fps(&self) -> f64 {
        if self.elapsed_ms == 0 {
            0.0
        } else {
            self.frames as f64 * 1000.0 / self.elapsed_ms as f64
        }
    }
}

/// Result of a single [`Transmission::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// Deadline not reached; nothing asserted.
    Waiting,
    /// One bit was asserted.
    Emitted(LightSignal),
    /// The final off state has been asserted.
    Finished(TransmissionReport),
}

/// An in-flight strobe transmission.
#[derive(Debug, Clone)]
pub struct Transmission {
    bits: Bitstring,
    next: usize,
    rate: FrameRate,
    started_at: u64,
    deadline: u64,
    frames: u64,
    report: Option<TransmissionReport>,
}

impl Transmission {
    /// Start a transmission at `now_ms`; the first bit fires one period later.
    pub fn new(bits: Bitstring, rate: FrameRate, now_ms: u64) -> Self {
        Self {
            bits,
            next: 0,
            rate,
            started_at: now_ms,
            deadline: now_ms,
            frames: 0,
            report: None,
        }
    }

    /// Queue more bits behind the pending ones. Ignored once finished.
    pub fn append(&mut self, bits: &Bitstring) {
        if self.report.is_none() {
            self.bits.append(bits);
        }
    }

    /// Frame rate this transmission was started with.
    pub fn rate(&self) -> FrameRate {
        self.rate
    }

    /// Bits asserted so far.
    pub fn frames_emitted(&self) -> u64 {
        self.frames
    }

    /// Bits not yet asserted.
    pub fn remaining(&self) -> usize {
        self.bits.len() - self.next
    }

    /// Current deadline in clock milliseconds.
    pub fn deadline(&self) -> u64 {
        self.deadline
    }

    /// Report, once the final off state has been asserted.
    pub fn report(&self) -> Option<TransmissionReport> {
        self.report
    }

    /// True after the final off assertion.
    pub fn is_finished(&self) -> bool {
        self.report.is_some()
    }

    /// Advance at most one frame.
    ///
    /// If the sink fails, the frame is not consumed and the deadline is left
    /// untouched, so the next tick retries it.
    pub fn tick<S>(&mut self, now_ms: u64, sink: &mut S) -> Result<Tick, PresentationError>
    where
        S: SignalSink + ?Sized,
    {
        if let Some(report) = self.report {
            return Ok(Tick::Finished(report));
        }

        match step(
            self.deadline,
            now_ms,
            self.rate.period_ms(),
            self.bits.bit(self.next),
        ) {
            Step::Wait => Ok(Tick::Waiting),
            Step::Emit { signal, deadline } => {
                sink.assert_signal(signal)?;
                self.deadline = deadline;
                self.next += 1;
                self.frames += 1;
                Ok(Tick::Emitted(signal))
            }
            Step::Finish { deadline } => {
                sink.assert_signal(LightSignal::Off)?;
                self.deadline = deadline;
                let report = TransmissionReport {
                    frames: self.frames,
                    elapsed_ms: now_ms.saturating_sub(self.started_at),
                };
                self.report = Some(report);
                Ok(Tick::Finished(report))
            }
        }
    }

    /// Run to completion, idling on `clock` between frames.
    pub fn run_blocking<C, S>(
        &mut self,
        clock: &C,
        sink: &mut S,
    ) -> Result<TransmissionReport, PresentationError>
    where
        C: Clock + ?Sized,
        S: SignalSink + ?Sized,
    {
        loop {
            match self.tick(clock.now_ms(), sink)? {
                Tick::Finished(report) => return Ok(report),
                Tick::Waiting => clock.idle(),
                Tick::Emitted(_) => {}
            }
        }
    }
}
