//! The clock monitor loop: fold raw counter samples into the extended
//! clock.
//!
//! One sample per iteration, no blocking, no yielding — the tight poll
//! minimises clock-update latency. A backward jump between consecutive
//! samples means the raw counter wrapped (or reset), so the epoch is
//! incremented; the design assumes wraparound occurs at most once per
//! read window.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use lumen_core::CycleSource;

use crate::cell::ClockCell;

/// The state owned by the clock monitor thread.
///
/// [`step`](ClockMonitor::step) is public so tests can drive the fold
/// with a scripted source, without a thread.
pub struct ClockMonitor {
    cell: Arc<ClockCell>,
    source: Box<dyn CycleSource>,
    stop: Arc<AtomicBool>,
    prev: u64,
    epoch: u64,
}

impl ClockMonitor {
    /// Create a monitor publishing into `cell` until `stop` is set.
    pub fn new(cell: Arc<ClockCell>, source: Box<dyn CycleSource>, stop: Arc<AtomicBool>) -> Self {
        Self {
            cell,
            source,
            stop,
            prev: 0,
            epoch: 0,
        }
    }

    /// Take one sample and publish the resulting extended state.
    pub fn step(&mut self) {
        let current = self.source.sample();
        if self.prev > current {
            // Raw counter wrapped or reset between samples.
            self.epoch += 1;
        }
        self.cell.publish(current, self.epoch);
        self.prev = current;
    }

    /// Run until the stop signal is set. Tight poll; never terminates
    /// on its own in normal operation.
    pub fn run(mut self) {
        while !self.stop.load(Ordering::Acquire) {
            self.step();
        }
    }

    /// Number of backward jumps observed so far.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}
