//! Countdown latch
//!
//! Counts the readiness signals a resolution cycle still waits for. The latch
//! carries the generation of the cycle that created it so callbacks can tell
//! whether their cycle is still the consumer's current one.

use std::cell::Cell;

/// One-shot countdown latch
#[derive(Debug)]
pub struct CountdownLatch {
    remaining: Cell<usize>,
    released: Cell<bool>,
    generation: u64,
}

impl CountdownLatch {
    /// Latch waiting for `count` events of cycle `generation`
    pub fn new(count: usize, generation: u64) -> Self {
        Self {
            remaining: Cell::new(count),
            released: Cell::new(false),
            generation,
        }
    }

    /// Record one event
    ///
    /// Returns `true` exactly once: on the event that brings the count to
    /// zero.
    pub fn count_down(&self) -> bool {
        let remaining = self.remaining.get();
        if remaining == 0 {
            return false;
        }
        self.remaining.set(remaining - 1);
        if remaining == 1 && !self.released.replace(true) {
            return true;
        }
        false
    }

    /// Events still outstanding
    pub fn remaining(&self) -> usize {
        self.remaining.get()
    }

    /// Whether the latch has reached zero
    pub fn is_released(&self) -> bool {
        self.released.get()
    }

    /// Resolution cycle this latch belongs to
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
