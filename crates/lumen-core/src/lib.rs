//! Core types and traits for the Lumen load-generation engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Lumen workspace:
//! the extended clock stamp and its tick arithmetic, index width
//! classes, throughput records, the clock source traits, spin-loop
//! helpers, and the command-boundary error type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod record;
pub mod spin;
pub mod stamp;
pub mod traits;
pub mod width;

pub use error::CommandError;
pub use record::{RecordSink, ThroughputRecord, RECORD_SLOT_COUNT};
pub use spin::{spin_for_ticks, spin_until};
pub use stamp::{elapsed_ticks, ExtendedStamp, RAW_WIDTH};
pub use traits::{CycleSource, TickSource};
pub use width::WidthClass;
