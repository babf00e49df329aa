//! Lumen: cycle-accurate load generation and throughput estimation.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Lumen sub-crates. For most users, adding `lumen` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use lumen::prelude::*;
//!
//! // Size the arena from an explicit memory figure: 300 free bytes
//! // selects the 8-bit index class and a 255-cell arena.
//! let config = UniverseConfig {
//!     available_bytes: Some(300),
//!     parallelism: Some(1),
//!     ..UniverseConfig::default()
//! };
//! let universe = Universe::initialize(config).unwrap();
//! assert_eq!(universe.arena().capacity(), 255);
//! assert_eq!(universe.arena().width(), WidthClass::W8);
//!
//! // Saturate one worker for zero gigaticks: the completion
//! // notification fires as soon as the worker starts.
//! let job = universe
//!     .start_saturation("0", Box::new(|| println!("saturation done")))
//!     .unwrap();
//! job.wait();
//! universe.shutdown();
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `lumen-core` | Stamps, width classes, records, core traits |
//! | [`clock`] | `lumen-clock` | The wraparound-folding extended cycle clock |
//! | [`arena`] | `lumen-arena` | Capacity sizing and the shared byte arena |
//! | [`engine`] | `lumen-engine` | The universe context, sweeps, and saturation |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Stamps, width classes, records, and core traits (`lumen-core`).
///
/// Contains [`types::ExtendedStamp`] and
/// [`types::elapsed_ticks`], the [`types::WidthClass`] index widths,
/// and the [`types::CycleSource`]/[`types::TickSource`]/
/// [`types::RecordSink`] traits at the crate seams.
pub use lumen_core as types;

/// The extended cycle clock (`lumen-clock`).
///
/// [`clock::CycleClock`] runs a monitor thread that folds raw-counter
/// wraparound into a monotone 128-bit logical timeline.
pub use lumen_clock as clock;

/// Capacity sizing and the shared byte arena (`lumen-arena`).
///
/// [`arena::select_capacity`] picks the index width class from a
/// free-memory figure; [`arena::Arena`] is the cell buffer sweeps walk.
pub use lumen_arena as arena;

/// The universe context, sweeps, and saturation (`lumen-engine`).
///
/// [`engine::Universe`] owns the running clock, arena, and property
/// store, and exposes the command-level operations.
pub use lumen_engine as engine;

/// Common imports for typical Lumen usage.
///
/// ```rust
/// use lumen::prelude::*;
/// ```
pub mod prelude {
    pub use lumen_arena::{select_capacity, Arena, SizerError, CELL_SIZE};
    pub use lumen_clock::{ClockError, CycleClock};
    pub use lumen_core::{
        elapsed_ticks, CommandError, CycleSource, ExtendedStamp, RecordSink, ThroughputRecord,
        TickSource, WidthClass,
    };
    pub use lumen_engine::{
        ChannelSink, CompletionNotify, FileSink, Properties, SaturationJob, ShutdownReport,
        SweepJob, Universe, UniverseConfig, UniverseError, TICKS_PER_GIGATICK,
    };
}
