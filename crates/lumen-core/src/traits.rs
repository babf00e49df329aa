//! Clock source traits shared across the Lumen workspace.

use crate::stamp::ExtendedStamp;

/// A raw hardware cycle counter.
///
/// Implemented by the hardware counter in `lumen-clock` and by scripted
/// fakes in `lumen-test-utils`. Samples may wrap or reset backwards;
/// the clock monitor is responsible for folding them into a
/// monotonically non-decreasing extended stamp.
pub trait CycleSource: Send {
    /// Read the current raw counter value.
    fn sample(&mut self) -> u64;
}

/// A readable extended clock.
///
/// The running cycle clock implements this over its published state;
/// tests substitute a fake so that sweeps and saturation workers can
/// be driven deterministically.
pub trait TickSource: Send + Sync {
    /// The current extended stamp.
    fn now(&self) -> ExtendedStamp;
}
