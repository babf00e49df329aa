//! The user-facing clock handle: spawn, read, stop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use lumen_core::{CycleSource, ExtendedStamp, TickSource};

use crate::cell::ClockCell;
use crate::counter::TscSource;
use crate::error::ClockError;
use crate::monitor::ClockMonitor;

/// A running extended cycle clock.
///
/// Owns the monitor thread. Reading via [`now`](CycleClock::now) is
/// lock-free from any thread. The monitor never terminates on its own;
/// [`stop`](CycleClock::stop) (or drop) sets the stop signal and joins.
/// If the monitor dies some other way, readers see a frozen stamp and
/// elapsed-tick deltas of zero — this degradation is silent and
/// undetected by design.
pub struct CycleClock {
    cell: Arc<ClockCell>,
    stop: Arc<AtomicBool>,
    monitor: Option<JoinHandle<()>>,
}

impl CycleClock {
    /// Start a clock over the given raw counter source.
    pub fn start(source: Box<dyn CycleSource>) -> Result<Self, ClockError> {
        let cell = Arc::new(ClockCell::new());
        let stop = Arc::new(AtomicBool::new(false));

        let monitor_cell = Arc::clone(&cell);
        let monitor_stop = Arc::clone(&stop);
        let monitor = std::thread::Builder::new()
            .name("lumen-clock".into())
            .spawn(move || {
                ClockMonitor::new(monitor_cell, source, monitor_stop).run();
            })
            .map_err(|e| ClockError::ThreadSpawnFailed {
                reason: e.to_string(),
            })?;

        Ok(Self {
            cell,
            stop,
            monitor: Some(monitor),
        })
    }

    /// Start a clock over the hardware cycle counter.
    pub fn start_hardware() -> Result<Self, ClockError> {
        Self::start(Box::new(TscSource::new()))
    }

    /// The current extended stamp.
    pub fn now(&self) -> ExtendedStamp {
        self.cell.load()
    }

    /// Stop the monitor and join its thread. Returns whether the join
    /// succeeded. Idempotent.
    pub fn stop(&mut self) -> bool {
        self.stop.store(true, Ordering::Release);
        match self.monitor.take() {
            Some(handle) => handle.join().is_ok(),
            None => true,
        }
    }

    /// Whether the monitor thread is still attached.
    pub fn is_running(&self) -> bool {
        self.monitor.is_some()
    }
}

impl Drop for CycleClock {
    fn drop(&mut self) {
        self.stop();
    }
}

impl TickSource for CycleClock {
    fn now(&self) -> ExtendedStamp {
        CycleClock::now(self)
    }
}
