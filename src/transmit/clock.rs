//! Millisecond monotonic clock abstraction.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Source of monotonic milliseconds for the transmission scheduler.
///
/// `idle` is the suspension point of the blocking loop; test clocks advance
/// their time there so the loop makes progress without sleeping.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed epoch.
    fn now_ms(&self) -> u64;

    /// Give up the CPU while waiting for the next deadline.
    fn idle(&self) {
        std::thread::yield_now();
    }
}

/// Monotonic clock backed by `std::time::Instant`.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    /// Start a clock whose epoch is now.
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn idle(&self) {
        std::thread::sleep(std::time::Duration::from_millis(1));
    }
}

/// Hand-driven clock for tests and simulations.
///
/// Clones share the same time. Each `idle` call advances time by `step_ms`,
/// so a blocking loop driven by this clock terminates without real sleeps.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
    step_ms: u64,
}

impl ManualClock {
    /// Clock starting at `start_ms` that advances `step_ms` per idle.
    pub fn new(start_ms: u64, step_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
            step_ms,
        }
    }

    /// Move time forward.
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    /// Jump to an absolute time.
    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }

    fn idle(&self) {
        self.advance(self.step_ms);
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }

    fn idle(&self) {
        (**self).idle()
    }
}
