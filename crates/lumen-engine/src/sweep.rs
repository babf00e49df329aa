//! The throughput-estimation sweep ("light travel").
//!
//! A sweep walks a single active cell across the whole arena in a
//! tight loop. Each return of the index to 0 is a lap boundary; the
//! extended-clock delta between consecutive boundaries prices a
//! fixed-size unit of work in hardware cycles, yielding a throughput
//! estimate that is independent of sweep length and immune to OS
//! clock adjustments. Lap 0 is a discarded baseline — there is no
//! earlier boundary to delta against.
//!
//! At most one sweep runs at a time: it mutates the single shared
//! arena, and a concurrent sweep would corrupt lap-boundary detection.

use std::sync::Arc;
use std::thread::JoinHandle;

use lumen_arena::Arena;
use lumen_core::{elapsed_ticks, ExtendedStamp, RecordSink, TickSource};

use crate::error::UniverseError;
use crate::props::Properties;

/// One sweep invocation: owns its position, lap count, and sink.
pub struct Sweep {
    arena: Arc<Arena>,
    clock: Arc<dyn TickSource>,
    props: Arc<Properties>,
    sink: Box<dyn RecordSink>,
    position: u64,
    lap_count: u64,
    lap_start: ExtendedStamp,
}

impl Sweep {
    /// Create a sweep over `arena`, timed by `clock`, reporting into
    /// `props` and `sink`.
    pub fn new(
        arena: Arc<Arena>,
        clock: Arc<dyn TickSource>,
        props: Arc<Properties>,
        sink: Box<dyn RecordSink>,
    ) -> Self {
        Self {
            arena,
            clock,
            props,
            sink,
            position: 0,
            lap_count: 0,
            lap_start: ExtendedStamp::ZERO,
        }
    }

    /// Advance the active cell one step. Returns true when this step
    /// crossed a lap boundary.
    pub fn step(&mut self) -> bool {
        let capacity = self.arena.capacity();
        // Clear the previous cell (wraps to the last cell at position
        // 0, where it is a startup no-op on the zeroed arena).
        self.arena.clear((self.position + capacity - 1) % capacity);
        self.arena.set(self.position);

        let crossed = self.position == 0;
        if crossed {
            self.on_lap_boundary();
        }

        self.position = (self.position + 1) % capacity;
        crossed
    }

    fn on_lap_boundary(&mut self) {
        let stop = self.clock.now();
        if self.lap_count > 0 {
            let delta = elapsed_ticks(self.lap_start, stop);
            // A zero delta means the clock resolution was too coarse
            // for this lap; skip the record rather than report an
            // infinite throughput.
            if delta != 0 {
                let throughput = self.arena.capacity() as f64 / delta as f64;
                self.props.set_throughput(throughput);
                self.sink.append(&self.props.record());
            }
        }
        self.lap_start = stop;
        self.lap_count += 1;
    }

    /// Laps completed so far (including the baseline lap 0).
    pub fn lap_count(&self) -> u64 {
        self.lap_count
    }

    /// Current sweep position.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Run until `lap_limit` lap boundaries have been crossed.
    /// Non-yielding; the sweep is the unit of work being measured.
    pub fn run(mut self, lap_limit: u64) {
        while self.lap_count < lap_limit {
            self.step();
        }
    }
}

/// Handle to a sweep running on its own thread.
pub struct SweepJob {
    handle: Option<JoinHandle<()>>,
}

impl SweepJob {
    /// Spawn `sweep.run(lap_limit)` on a named thread.
    pub fn spawn(sweep: Sweep, lap_limit: u64) -> Result<Self, UniverseError> {
        let handle = std::thread::Builder::new()
            .name("lumen-sweep".into())
            .spawn(move || sweep.run(lap_limit))
            .map_err(|e| UniverseError::ThreadSpawnFailed {
                reason: format!("sweep thread: {e}"),
            })?;
        Ok(Self {
            handle: Some(handle),
        })
    }

    /// Block until the sweep finishes. Returns whether the thread
    /// joined cleanly.
    pub fn wait(mut self) -> bool {
        match self.handle.take() {
            Some(handle) => handle.join().is_ok(),
            None => true,
        }
    }
}
