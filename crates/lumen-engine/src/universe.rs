//! The universe: the explicit context object owning all shared state.
//!
//! Construction wires the whole engine in order: size the arena from
//! available memory, allocate it, start the cycle clock, and build the
//! property store. Every command-level operation hangs off the
//! [`Universe`] handle; there is no global state.

use std::path::PathBuf;
use std::sync::Arc;

use lumen_arena::{available_memory, select_capacity, Arena, CELL_SIZE};
use lumen_clock::CycleClock;
use lumen_core::{CommandError, RecordSink, TickSource};

use crate::command::parse_unsigned_arg;
use crate::error::UniverseError;
use crate::props::{Properties, DEFAULT_OUTPUT_PRECISION};
use crate::saturate::{CompletionNotify, SaturationJob};
use crate::sink::FileSink;
use crate::sweep::{Sweep, SweepJob};

/// Upper bound on resolved worker parallelism. Detection can report
/// inflated figures inside containers.
const MAX_PARALLELISM: usize = 512;

/// Configuration for [`Universe::initialize`].
#[derive(Clone, Debug)]
pub struct UniverseConfig {
    /// Free-memory figure handed to the sizer. `None` queries the
    /// platform.
    pub available_bytes: Option<u64>,
    /// Bytes per arena element for the sizing division.
    pub element_size: u64,
    /// Saturation worker count. `None` resolves to the detected
    /// execution-unit count.
    pub parallelism: Option<usize>,
    /// Decimal places when rendering throughput records.
    pub output_precision: usize,
    /// File that sweep records are appended to.
    pub record_path: PathBuf,
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            available_bytes: None,
            element_size: CELL_SIZE,
            parallelism: None,
            output_precision: DEFAULT_OUTPUT_PRECISION,
            record_path: PathBuf::from("records.csv"),
        }
    }
}

impl UniverseConfig {
    /// Check invariants that would otherwise surface as panics deeper
    /// in the engine.
    pub fn validate(&self) -> Result<(), UniverseError> {
        if self.element_size == 0 {
            return Err(CommandError::InvalidArgument {
                reason: "element_size must be non-zero".into(),
            }
            .into());
        }
        Ok(())
    }

    /// The worker count saturation jobs will use: the configured value,
    /// or the detected execution-unit count clamped to
    /// `1..=MAX_PARALLELISM`.
    pub fn resolved_parallelism(&self) -> usize {
        match self.parallelism {
            Some(n) => n.max(1),
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
                .clamp(1, MAX_PARALLELISM),
        }
    }
}

/// The engine context: running clock, shared arena, property store.
pub struct Universe {
    clock: Arc<CycleClock>,
    arena: Arc<Arena>,
    props: Arc<Properties>,
    config: UniverseConfig,
}

impl Universe {
    /// Initialize a universe over the hardware cycle counter.
    pub fn initialize(config: UniverseConfig) -> Result<Self, UniverseError> {
        config.validate()?;
        let clock = CycleClock::start_hardware()?;
        Self::initialize_with_clock(config, clock)
    }

    /// Initialize over an already-running clock. Seam for tests and
    /// embedders that supply their own counter source.
    pub fn initialize_with_clock(
        config: UniverseConfig,
        clock: CycleClock,
    ) -> Result<Self, UniverseError> {
        config.validate()?;
        let available = config.available_bytes.unwrap_or_else(available_memory);
        let (capacity, width) = select_capacity(available, config.element_size)?;
        let arena = Arc::new(Arena::for_class(width));
        let props = Arc::new(Properties::new(
            config.resolved_parallelism(),
            capacity,
            width,
            config.output_precision,
        ));
        Ok(Self {
            clock: Arc::new(clock),
            arena,
            props,
            config,
        })
    }

    /// Start a light sweep of `tours` full laps, appending records to
    /// the configured file.
    ///
    /// The lap limit is `tours + 1`: lap 0 is the discarded baseline,
    /// so the operator gets exactly `tours` measured laps.
    pub fn start_light_sweep(&self, tours: &str) -> Result<SweepJob, UniverseError> {
        let precision = self.props.output_precision();
        let sink = FileSink::open_append(&self.config.record_path, precision).map_err(|e| {
            UniverseError::SinkUnavailable {
                reason: format!("{}: {e}", self.config.record_path.display()),
            }
        })?;
        self.start_light_sweep_with_sink(tours, Box::new(sink))
    }

    /// Start a light sweep reporting into an explicit sink.
    pub fn start_light_sweep_with_sink(
        &self,
        tours: &str,
        sink: Box<dyn RecordSink>,
    ) -> Result<SweepJob, UniverseError> {
        let tours = parse_unsigned_arg(tours)?;
        let lap_limit = tours.checked_add(1).ok_or_else(|| {
            UniverseError::Command(CommandError::InvalidArgument {
                reason: format!("tour count {tours} leaves no room for the baseline lap"),
            })
        })?;
        let sweep = Sweep::new(
            Arc::clone(&self.arena),
            Arc::clone(&self.clock) as Arc<dyn TickSource>,
            Arc::clone(&self.props),
            sink,
        );
        SweepJob::spawn(sweep, lap_limit)
    }

    /// Start a saturation benchmark of `giga_ticks` billions of
    /// extended-clock ticks across the resolved worker count.
    pub fn start_saturation(
        &self,
        giga_ticks: &str,
        notify: CompletionNotify,
    ) -> Result<SaturationJob, UniverseError> {
        let giga_ticks = parse_unsigned_arg(giga_ticks)?;
        SaturationJob::spawn(
            Arc::clone(&self.clock) as Arc<dyn TickSource>,
            self.props.parallelism(),
            giga_ticks,
            notify,
        )
    }

    /// The running extended clock.
    pub fn clock(&self) -> &Arc<CycleClock> {
        &self.clock
    }

    /// The shared arena.
    pub fn arena(&self) -> &Arc<Arena> {
        &self.arena
    }

    /// The shared property store.
    pub fn props(&self) -> &Arc<Properties> {
        &self.props
    }

    /// The configuration this universe was built from.
    pub fn config(&self) -> &UniverseConfig {
        &self.config
    }

    /// Tear down: stop the clock monitor if this handle holds the last
    /// reference to the clock.
    ///
    /// Jobs that still hold clock references keep it alive; the monitor
    /// then stops when the last of them drops.
    pub fn shutdown(self) -> ShutdownReport {
        match Arc::try_unwrap(self.clock) {
            Ok(mut clock) => ShutdownReport {
                clock_joined: clock.stop(),
            },
            Err(_) => ShutdownReport {
                clock_joined: false,
            },
        }
    }
}

/// Outcome of [`Universe::shutdown`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShutdownReport {
    /// Whether the clock monitor thread was stopped and joined here.
    pub clock_joined: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::WidthClass;
    use lumen_test_utils::{MemorySink, ScriptedCycleSource};

    // 300 free bytes selects the 8-bit class: a 255-cell arena that
    // keeps these tests fast.
    fn small_config() -> UniverseConfig {
        UniverseConfig {
            available_bytes: Some(300),
            parallelism: Some(2),
            ..UniverseConfig::default()
        }
    }

    fn frozen_universe() -> Universe {
        let clock = CycleClock::start(Box::new(ScriptedCycleSource::new(vec![7]))).unwrap();
        Universe::initialize_with_clock(small_config(), clock).unwrap()
    }

    #[test]
    fn initialization_wires_sizer_into_arena_and_props() {
        let universe = frozen_universe();
        assert_eq!(universe.arena().capacity(), 255);
        assert_eq!(universe.arena().width(), WidthClass::W8);
        assert_eq!(universe.props().capacity(), 255);
        assert_eq!(universe.props().width(), WidthClass::W8);
        assert_eq!(universe.props().parallelism(), 2);
        assert!(universe.shutdown().clock_joined);
    }

    #[test]
    fn initialization_fails_when_memory_is_exhausted() {
        let clock = CycleClock::start(Box::new(ScriptedCycleSource::new(vec![7]))).unwrap();
        let config = UniverseConfig {
            available_bytes: Some(10),
            ..UniverseConfig::default()
        };
        match Universe::initialize_with_clock(config, clock) {
            Err(UniverseError::Sizer(_)) => {}
            other => panic!("expected sizer error, got {:?}", other.err()),
        }
    }

    #[test]
    fn zero_element_size_is_rejected_before_sizing() {
        let clock = CycleClock::start(Box::new(ScriptedCycleSource::new(vec![7]))).unwrap();
        let config = UniverseConfig {
            element_size: 0,
            ..small_config()
        };
        match Universe::initialize_with_clock(config, clock) {
            Err(UniverseError::Command(_)) => {}
            other => panic!("expected command error, got {:?}", other.err()),
        }
    }

    #[test]
    fn resolved_parallelism_is_at_least_one() {
        let config = UniverseConfig {
            parallelism: Some(0),
            ..UniverseConfig::default()
        };
        assert_eq!(config.resolved_parallelism(), 1);

        let detected = UniverseConfig::default().resolved_parallelism();
        assert!((1..=MAX_PARALLELISM).contains(&detected));
    }

    #[test]
    fn sweep_runs_requested_tours_plus_baseline() {
        let universe = frozen_universe();
        let sink = MemorySink::new();
        let job = universe
            .start_light_sweep_with_sink("2", Box::new(sink.clone()))
            .unwrap();
        assert!(job.wait());
        // The scripted clock is frozen, so every lap delta is zero and
        // no records survive; the job still runs its 3 lap boundaries.
        assert!(sink.is_empty());
        assert_eq!(universe.arena().active_count(), 1);
    }

    #[test]
    fn sweep_rejects_malformed_tour_count() {
        let universe = frozen_universe();
        let sink = MemorySink::new();
        match universe.start_light_sweep_with_sink("laps", Box::new(sink)) {
            Err(UniverseError::Command(_)) => {}
            other => panic!("expected command error, got {:?}", other.err()),
        }
    }

    #[test]
    fn sweep_rejects_tour_count_with_no_baseline_room() {
        let universe = frozen_universe();
        let sink = MemorySink::new();
        let tours = u64::MAX.to_string();
        match universe.start_light_sweep_with_sink(&tours, Box::new(sink)) {
            Err(UniverseError::Command(_)) => {}
            other => panic!("expected command error, got {:?}", other.err()),
        }
    }

    #[test]
    fn sweep_reports_unwritable_record_path() {
        let clock = CycleClock::start(Box::new(ScriptedCycleSource::new(vec![7]))).unwrap();
        let config = UniverseConfig {
            record_path: PathBuf::from("/nonexistent-lumen-dir/records.csv"),
            ..small_config()
        };
        let universe = Universe::initialize_with_clock(config, clock).unwrap();
        match universe.start_light_sweep("1") {
            Err(UniverseError::SinkUnavailable { .. }) => {}
            other => panic!("expected sink error, got {:?}", other.err()),
        }
    }

    #[test]
    fn saturation_of_zero_gigaticks_notifies() {
        let universe = frozen_universe();
        let (tx, rx) = crossbeam_channel::bounded(1);
        let job = universe
            .start_saturation(
                "0",
                Box::new(move || {
                    let _ = tx.send(());
                }),
            )
            .unwrap();
        assert_eq!(job.parallelism(), 2);
        assert_eq!(job.wait(), 2);
        assert!(rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .is_ok());
    }

    #[test]
    fn saturation_rejects_malformed_gigatick_count() {
        let universe = frozen_universe();
        match universe.start_saturation("many", Box::new(|| {})) {
            Err(UniverseError::Command(_)) => {}
            other => panic!("expected command error, got {:?}", other.err()),
        }
    }
}
