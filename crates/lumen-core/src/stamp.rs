//! The extended clock stamp and wraparound-safe tick arithmetic.
//!
//! A raw hardware cycle counter is a free-running `u64` that can wrap
//! or reset. The clock monitor folds successive raw samples into an
//! [`ExtendedStamp`]: the latest raw value plus an epoch counter that
//! increments once per observed backward jump. Logical time is
//! `epoch * 2^64 + low`, computed as a `u128` and only ever used as a
//! difference between two stamps — never as absolute wall time.

use std::cmp::Ordering;
use std::fmt;

/// Bit width of the raw hardware cycle counter sample.
pub const RAW_WIDTH: u32 = 64;

/// A value snapshot of the extended cycle clock.
///
/// `epoch` only increases, and increases exactly when a newly sampled
/// raw value is numerically less than the previously sampled one
/// (counter wraparound or reset). Mutated exclusively by the clock
/// monitor; read by anything that needs an elapsed-cycle duration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ExtendedStamp {
    /// The most recent raw counter sample.
    pub low: u64,
    /// Number of backward jumps observed so far.
    pub epoch: u64,
}

impl ExtendedStamp {
    /// The zero stamp: no samples taken, no wraparounds observed.
    pub const ZERO: ExtendedStamp = ExtendedStamp { low: 0, epoch: 0 };

    /// Create a stamp from a raw sample and an epoch count.
    pub fn new(low: u64, epoch: u64) -> Self {
        Self { low, epoch }
    }

    /// The logical time of this stamp: `epoch * 2^64 + low`.
    ///
    /// Only meaningful as a difference between two stamps taken from
    /// the same clock.
    pub fn logical(self) -> u128 {
        (u128::from(self.epoch) << RAW_WIDTH) | u128::from(self.low)
    }
}

impl PartialOrd for ExtendedStamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ExtendedStamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.logical().cmp(&other.logical())
    }
}

impl fmt::Display for ExtendedStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.epoch, self.low)
    }
}

/// Elapsed ticks between two stamps, where `b` is the chronologically
/// later sample.
///
/// Computed as `b.logical() - a.logical()`, which equals
/// `(b.epoch - a.epoch) * 2^64 + (b.low - a.low)` in exact arithmetic.
/// Valid on the assumption that wraparound occurs at most once per read
/// window — raw counters have far higher resolution than any expected
/// interval between reads. Saturates at zero if the stamps are passed
/// out of order.
pub fn elapsed_ticks(a: ExtendedStamp, b: ExtendedStamp) -> u128 {
    b.logical().saturating_sub(a.logical())
}
