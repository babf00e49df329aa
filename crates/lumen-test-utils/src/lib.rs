//! Test utilities and fake clocks for Lumen development.
//!
//! Provides a scripted raw counter ([`ScriptedCycleSource`]) for
//! driving the clock monitor deterministically, a manually-advanced
//! [`FakeClock`] for sweeps and saturation workers, and an in-memory
//! [`MemorySink`] for asserting on emitted throughput records.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use lumen_core::{CycleSource, ExtendedStamp, RecordSink, ThroughputRecord, TickSource};

/// A raw counter that replays a scripted sample sequence.
///
/// Once the script is exhausted, the last sample repeats forever, so a
/// monitor thread driven by this source settles on a stable stamp
/// instead of running off the end.
pub struct ScriptedCycleSource {
    samples: VecDeque<u64>,
    last: u64,
}

impl ScriptedCycleSource {
    /// Create a source replaying `samples` in order.
    pub fn new(samples: impl IntoIterator<Item = u64>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
            last: 0,
        }
    }
}

impl CycleSource for ScriptedCycleSource {
    fn sample(&mut self) -> u64 {
        if let Some(next) = self.samples.pop_front() {
            self.last = next;
        }
        self.last
    }
}

/// A manually-advanced extended clock.
///
/// `now()` is lock-free and safe to spin on from worker threads; the
/// test advances ticks (and, separately, the epoch) from the driving
/// thread. Advancing only one field at a time keeps readers from ever
/// observing a torn pair.
pub struct FakeClock {
    low: AtomicU64,
    epoch: AtomicU64,
}

impl FakeClock {
    /// Create a clock at the zero stamp.
    pub fn new() -> Self {
        Self {
            low: AtomicU64::new(0),
            epoch: AtomicU64::new(0),
        }
    }

    /// Create a clock starting at the given stamp.
    pub fn at(stamp: ExtendedStamp) -> Self {
        Self {
            low: AtomicU64::new(stamp.low),
            epoch: AtomicU64::new(stamp.epoch),
        }
    }

    /// Advance the low word by `ticks`.
    pub fn advance(&self, ticks: u64) {
        self.low.fetch_add(ticks, Ordering::SeqCst);
    }

    /// Simulate a wraparound: reset the low word and bump the epoch.
    ///
    /// The low word is written before the epoch. Combined with the
    /// epoch-before-low read order in `now()`, a racing reader can
    /// observe a stale pair (old epoch with the already-reset low) but
    /// never an inflated one (new epoch with the old high low).
    pub fn wrap_to(&self, low: u64) {
        self.low.store(low, Ordering::SeqCst);
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for FakeClock {
    fn now(&self) -> ExtendedStamp {
        // Epoch before low, mirroring wrap_to()'s low-before-epoch
        // write order: a read racing a wrap can come out stale (old
        // epoch, reset low) but never ahead of the clock (new epoch,
        // old high low). Spinning workers tolerate stale stamps; an
        // inflated one would end a busy-wait early.
        let epoch = self.epoch.load(Ordering::SeqCst);
        let low = self.low.load(Ordering::SeqCst);
        ExtendedStamp::new(low, epoch)
    }
}

/// A sink that buffers records in memory for test assertions.
#[derive(Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<ThroughputRecord>>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All records appended so far, in order.
    pub fn records(&self) -> Vec<ThroughputRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Number of records appended so far.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// Whether no records have been appended.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordSink for MemorySink {
    fn append(&mut self, record: &ThroughputRecord) {
        self.records.lock().unwrap().push(record.clone());
    }
}
