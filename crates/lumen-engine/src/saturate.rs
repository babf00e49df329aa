//! The saturation benchmark: busy-wait workers with a completion
//! barrier.
//!
//! One worker per execution unit spins until a shared target number of
//! extended-clock ticks has elapsed from its own start stamp, then sets
//! its done flag exactly once. A supervisor thread spin-polls all
//! flags and emits a single completion notification when every worker
//! has finished. Cycle-based (not wall-clock) duration keeps the
//! workers synchronized to one logical clock and isolates the workload
//! from OS scheduling jitter.
//!
//! A started job is not cancellable; it runs to completion or until
//! process termination.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use smallvec::SmallVec;

use lumen_core::{spin_for_ticks, spin_until, TickSource};

use crate::error::UniverseError;

/// Extended-clock ticks per requested gigatick.
pub const TICKS_PER_GIGATICK: u128 = 1_000_000_000;

/// Injected completion callback, invoked exactly once by the
/// supervisor after all workers finish.
pub type CompletionNotify = Box<dyn FnOnce() + Send + 'static>;

/// Per-worker completion flag, padded to avoid false sharing.
///
/// The supervisor polls every flag in a tight loop; without padding,
/// adjacent workers' writes would invalidate each other's cache lines.
/// 128-byte alignment covers both 64-byte (x86) and 128-byte (Apple
/// M-series) cache line sizes.
#[repr(align(128))]
pub struct WorkerSlot {
    done: AtomicBool,
    #[allow(dead_code)]
    worker_id: u32,
}

// Compile-time assertion: WorkerSlot must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<WorkerSlot>();
};

impl WorkerSlot {
    /// Create a slot in the not-done state.
    pub fn new(worker_id: u32) -> Self {
        Self {
            done: AtomicBool::new(false),
            worker_id,
        }
    }

    /// Mark this worker finished. Written once, false to true.
    pub fn mark_done(&self) {
        self.done.store(true, Ordering::Release);
    }

    /// Whether this worker has finished.
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }
}

/// Whether every worker slot is done.
pub fn all_done(slots: &[WorkerSlot]) -> bool {
    slots.iter().all(WorkerSlot::is_done)
}

/// A running saturation job: the worker threads, their flags, and the
/// supervisor.
pub struct SaturationJob {
    slots: Arc<[WorkerSlot]>,
    workers: SmallVec<[JoinHandle<()>; 16]>,
    supervisor: Option<JoinHandle<()>>,
}

impl SaturationJob {
    /// Spawn `parallelism` busy-wait workers, each running for
    /// `giga_ticks * 10^9` extended-clock ticks, plus the supervisor
    /// that fires `notify` once when all of them are done.
    pub fn spawn(
        clock: Arc<dyn TickSource>,
        parallelism: usize,
        giga_ticks: u64,
        notify: CompletionNotify,
    ) -> Result<Self, UniverseError> {
        let target_ticks = u128::from(giga_ticks) * TICKS_PER_GIGATICK;
        let slots: Arc<[WorkerSlot]> = (0..parallelism as u32).map(WorkerSlot::new).collect();

        let mut workers = SmallVec::new();
        for i in 0..parallelism {
            let clock = Arc::clone(&clock);
            let slots = Arc::clone(&slots);
            let handle = std::thread::Builder::new()
                .name(format!("lumen-sat-{i}"))
                .spawn(move || {
                    spin_for_ticks(&*clock, target_ticks);
                    slots[i].mark_done();
                })
                .map_err(|e| UniverseError::ThreadSpawnFailed {
                    reason: format!("saturation worker {i}: {e}"),
                })?;
            workers.push(handle);
        }

        let supervisor_slots = Arc::clone(&slots);
        let supervisor = std::thread::Builder::new()
            .name("lumen-sat-supervisor".into())
            .spawn(move || {
                spin_until(|| all_done(&supervisor_slots));
                notify();
            })
            .map_err(|e| UniverseError::ThreadSpawnFailed {
                reason: format!("saturation supervisor: {e}"),
            })?;

        Ok(Self {
            slots,
            workers,
            supervisor: Some(supervisor),
        })
    }

    /// Whether every worker has set its done flag.
    pub fn is_complete(&self) -> bool {
        all_done(&self.slots)
    }

    /// Number of workers in the job.
    pub fn parallelism(&self) -> usize {
        self.workers.len()
    }

    /// Block until workers and supervisor have terminated. Returns the
    /// number of worker threads that joined cleanly.
    pub fn wait(mut self) -> usize {
        let mut joined = 0;
        for handle in self.workers.drain(..) {
            if handle.join().is_ok() {
                joined += 1;
            }
        }
        if let Some(supervisor) = self.supervisor.take() {
            let _ = supervisor.join();
        }
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_test_utils::FakeClock;
    use std::time::{Duration, Instant};

    #[test]
    fn worker_slot_flag_transitions_once() {
        let slot = WorkerSlot::new(0);
        assert!(!slot.is_done());
        slot.mark_done();
        assert!(slot.is_done());
        // Idempotent.
        slot.mark_done();
        assert!(slot.is_done());
    }

    #[test]
    fn worker_slot_is_cache_line_aligned() {
        assert!(std::mem::align_of::<WorkerSlot>() >= 128);
    }

    #[test]
    fn all_done_requires_every_flag() {
        let slots: Vec<WorkerSlot> = (0..4).map(WorkerSlot::new).collect();
        assert!(!all_done(&slots));

        // Any strict subset is not enough.
        for i in 0..3 {
            slots[i].mark_done();
            assert!(!all_done(&slots), "false completion with {} flags", i + 1);
        }
        slots[3].mark_done();
        assert!(all_done(&slots));
    }

    #[test]
    fn all_done_with_no_workers_is_trivially_true() {
        assert!(all_done(&[]));
    }

    #[test]
    fn completion_fires_only_after_all_workers_finish() {
        let clock = Arc::new(FakeClock::new());
        let (done_tx, done_rx) = crossbeam_channel::bounded(1);

        // 1 gigatick at the fake clock's scale: workers need 10^9
        // elapsed ticks.
        let job = SaturationJob::spawn(
            Arc::clone(&clock) as Arc<dyn TickSource>,
            3,
            1,
            Box::new(move || {
                let _ = done_tx.send(());
            }),
        )
        .unwrap();

        // Workers are spinning on a frozen clock: no completion.
        std::thread::sleep(Duration::from_millis(50));
        assert!(done_rx.try_recv().is_err(), "completion fired early");
        assert!(!job.is_complete());

        // Release the workers: jump the clock past the target, and
        // keep feeding ticks in case a worker stamped late.
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            clock.advance(u64::try_from(TICKS_PER_GIGATICK).unwrap() + 1);
            match done_rx.recv_timeout(Duration::from_millis(20)) {
                Ok(()) => break,
                Err(_) if Instant::now() < deadline => {}
                Err(_) => panic!("completion notification never arrived"),
            }
        }
        assert_eq!(job.wait(), 3);
    }

    #[test]
    fn notification_is_sent_exactly_once() {
        let clock = Arc::new(FakeClock::new());
        let (done_tx, done_rx) = crossbeam_channel::unbounded();

        let job = SaturationJob::spawn(
            Arc::clone(&clock) as Arc<dyn TickSource>,
            2,
            0,
            Box::new(move || {
                let _ = done_tx.send(());
            }),
        )
        .unwrap();

        // giga_ticks = 0: workers finish immediately.
        assert_eq!(job.wait(), 2);
        assert!(done_rx.recv_timeout(Duration::from_secs(5)).is_ok());
        // No second notification.
        assert!(done_rx.try_recv().is_err());
    }

    #[test]
    fn wraparound_during_busy_wait_counts_elapsed() {
        let clock = Arc::new(FakeClock::at(lumen_core::ExtendedStamp::new(
            u64::MAX - 5,
            0,
        )));
        let (done_tx, done_rx) = crossbeam_channel::bounded(1);

        let job = SaturationJob::spawn(
            Arc::clone(&clock) as Arc<dyn TickSource>,
            1,
            1,
            Box::new(move || {
                let _ = done_tx.send(());
            }),
        )
        .unwrap();

        // Give the worker time to take its start stamp, then bump the
        // epoch and reset the low word: the raw counter goes backwards
        // but the logical elapsed ticks jump past 10^9.
        std::thread::sleep(Duration::from_millis(100));
        clock.wrap_to(u64::try_from(TICKS_PER_GIGATICK).unwrap());

        // Keep feeding ticks in case the worker started late and
        // stamped after the wrap.
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            match done_rx.recv_timeout(Duration::from_millis(20)) {
                Ok(()) => break,
                Err(_) if Instant::now() < deadline => {
                    clock.advance(u64::try_from(TICKS_PER_GIGATICK).unwrap());
                }
                Err(_) => panic!("worker never observed the wrapped elapsed time"),
            }
        }
        assert_eq!(job.wait(), 1);
    }
}
