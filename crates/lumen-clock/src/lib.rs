//! Wraparound-safe extended cycle clock.
//!
//! A dedicated monitor thread polls the hardware cycle counter in a
//! tight, non-yielding loop, detects backward jumps (wraparound or
//! counter reset), and publishes a monotonically non-decreasing
//! extended stamp through a seqlock-style [`ClockCell`]. Readers on
//! any thread take consistent `(low, epoch)` pairs without locking.
//!
//! ```text
//! Monitor Thread                 ClockCell                Readers (N)
//!     |                              |                        |
//!     | source.sample()              |                        |
//!     | prev > current? epoch += 1   |                        |
//!     |--publish(current, epoch)---->|                        |
//!     |      (tight poll, no yield)  |<-----------load()------|
//!     |                              |   consistent pair      |
//! ```
//!
//! The monitor is intentionally a busy-spin: minimising clock-update
//! latency is the whole point, and any sleep or yield would put
//! scheduler jitter between raw samples.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod cell;
pub mod clock;
pub mod counter;
pub mod error;
pub mod monitor;

pub use cell::ClockCell;
pub use clock::CycleClock;
pub use counter::TscSource;
pub use error::ClockError;
pub use monitor::ClockMonitor;
