//! Busy-wait delays on top of a free-running counter.
//!
//! [`TickDelay`] spins on the calling core until the injected
//! [`TickCounter`] has advanced by the requested number of ticks. It never
//! yields and cannot be cancelled.

use embedded_hal::delay::DelayNs;
use log::trace;

use crate::counter::{TickCounter, TickWord};

/// Converts milliseconds to ticks of a `hz` counter, rounding down.
pub const fn ms_to_ticks(hz: u32, ms: u32) -> u64 {
    hz as u64 * ms as u64 / 1_000
}

/// Converts microseconds to ticks of a `hz` counter, rounding down.
pub const fn us_to_ticks(hz: u32, us: u32) -> u64 {
    hz as u64 * us as u64 / 1_000_000
}

/// Converts nanoseconds to ticks of a `hz` counter, rounding down.
pub const fn ns_to_ticks(hz: u32, ns: u32) -> u64 {
    hz as u64 * ns as u64 / 1_000_000_000
}

/// Blocking delay driven by a wrapping hardware counter.
pub struct TickDelay<C> {
    counter: C,
}

impl<C: TickCounter> TickDelay<C> {
    /// The counter must already be running.
    pub fn new(counter: C) -> Self {
        Self { counter }
    }

    pub fn counter(&self) -> &C {
        &self.counter
    }

    /// Releases the counter.
    pub fn free(self) -> C {
        self.counter
    }

    pub fn ticks_per_second(&self) -> u32 {
        self.counter.ticks_per_second()
    }

    /// Spins until at least `ticks` counter increments have passed.
    ///
    /// When `start + ticks` overflows the counter word, the counter first has
    /// to roll over (read back below `start`) before the target can be
    /// compared against it. Otherwise a rollover means the counter stepped
    /// past the target between two samples.
    #[inline(never)]
    pub fn delay_ticks(&self, ticks: C::Word) {
        if ticks == C::Word::ZERO {
            return;
        }

        let start = self.counter.now();
        let target = start.wrapping_add(ticks);
        trace!("delay {:?} ticks, {:?} -> {:?}", ticks, start, target);

        if target < start {
            while self.counter.now() >= start {}
            while self.counter.now() < target {}
        } else {
            loop {
                let now = self.counter.now();
                if now >= target || now < start {
                    break;
                }
            }
        }
    }

    pub fn delay_ms(&self, ms: u32) {
        self.wait(ms_to_ticks(self.ticks_per_second(), ms));
    }

    pub fn delay_us(&self, us: u32) {
        self.wait(us_to_ticks(self.ticks_per_second(), us));
    }

    pub fn delay_ns(&self, ns: u32) {
        self.wait(ns_to_ticks(self.ticks_per_second(), ns));
    }

    // Requests longer than one counter period are split up, otherwise the
    // target would alias a value the counter has already passed.
    fn wait(&self, ticks: u64) {
        let max = C::Word::MAX.to_u64();
        let mut remaining = ticks;
        while remaining > max {
            self.delay_ticks(C::Word::MAX);
            remaining -= max;
        }
        self.delay_ticks(C::Word::from_u64_truncating(remaining));
    }
}

impl<C: TickCounter> DelayNs for TickDelay<C> {
    fn delay_ns(&mut self, ns: u32) {
        self.wait(ns_to_ticks(self.ticks_per_second(), ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.wait(us_to_ticks(self.ticks_per_second(), us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.wait(ms_to_ticks(self.ticks_per_second(), ms));
    }
}
