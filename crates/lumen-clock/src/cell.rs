//! Seqlock-style published clock state.
//!
//! The monitor is the single writer; any thread may read. Readers must
//! never observe `epoch` advanced without the matching `low` (or vice
//! versa) — a torn pair would make elapsed-tick arithmetic go negative.
//! The sequence counter makes the `(low, epoch)` pair effectively one
//! atomically-updated unit: writes bracket the pair with odd/even
//! sequence values and readers retry until they see a stable even one.

use std::sync::atomic::{AtomicU64, Ordering};

use lumen_core::ExtendedStamp;

/// The shared cell the clock monitor publishes into.
#[derive(Debug, Default)]
pub struct ClockCell {
    seq: AtomicU64,
    low: AtomicU64,
    epoch: AtomicU64,
}

// Compile-time assertion: ClockCell must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<ClockCell>();
};

impl ClockCell {
    /// Create a cell holding the zero stamp.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a new `(low, epoch)` pair. Single-writer only.
    pub fn publish(&self, low: u64, epoch: u64) {
        let seq = self.seq.load(Ordering::Relaxed);
        // Odd sequence marks the pair as in-flight.
        self.seq.store(seq.wrapping_add(1), Ordering::SeqCst);
        self.low.store(low, Ordering::SeqCst);
        self.epoch.store(epoch, Ordering::SeqCst);
        self.seq.store(seq.wrapping_add(2), Ordering::SeqCst);
    }

    /// Read a consistent stamp. Lock-free; retries while the writer is
    /// mid-publish.
    pub fn load(&self) -> ExtendedStamp {
        loop {
            let before = self.seq.load(Ordering::SeqCst);
            if before % 2 != 0 {
                std::hint::spin_loop();
                continue;
            }
            let low = self.low.load(Ordering::SeqCst);
            let epoch = self.epoch.load(Ordering::SeqCst);
            let after = self.seq.load(Ordering::SeqCst);
            if before == after {
                return ExtendedStamp::new(low, epoch);
            }
            std::hint::spin_loop();
        }
    }
}
