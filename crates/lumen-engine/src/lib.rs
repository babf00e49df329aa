//! Throughput-estimation sweep and saturation benchmark engine.
//!
//! Orchestrates the Lumen core: the [`Universe`] context owns the
//! running cycle clock, the shared arena, and the property store, and
//! exposes the command-level operations — start a light sweep, start a
//! saturation job — to the console layer above.
//!
//! ```text
//! Console                 Universe                 Background threads
//!    |                        |                           |
//!    |--start_light_sweep---->| parse, open sink          |
//!    |                        |--spawn "lumen-sweep"----->| step cells,
//!    |                        |                           | record laps
//!    |--start_saturation----->| parse                     |
//!    |                        |--spawn workers + sup----->| spin for ticks,
//!    |<--completion notify-------------------------------/  barrier, notify
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod command;
pub mod error;
pub mod props;
pub mod saturate;
pub mod sink;
pub mod sweep;
pub mod universe;

pub use error::UniverseError;
pub use props::{Properties, DEFAULT_OUTPUT_PRECISION, SLOT_THROUGHPUT};
pub use saturate::{CompletionNotify, SaturationJob, WorkerSlot, TICKS_PER_GIGATICK};
pub use sink::{ChannelSink, FileSink};
pub use sweep::{Sweep, SweepJob};
pub use universe::{ShutdownReport, Universe, UniverseConfig};
