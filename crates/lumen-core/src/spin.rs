//! Spin-loop helpers.
//!
//! Every hot loop in Lumen is a non-yielding spin: clock sampling,
//! sweep stepping, saturation busy-wait, and completion polling.
//! Sub-microsecond timing precision requires avoiding scheduler-induced
//! latency, at the cost of burning CPU. The spin policy is isolated
//! here so callers share one implementation and tests can drive the
//! predicates with fake clocks.

use crate::stamp::elapsed_ticks;
use crate::traits::TickSource;

/// Spin until `ready` returns true. Never sleeps or yields.
pub fn spin_until<F: FnMut() -> bool>(mut ready: F) {
    while !ready() {
        std::hint::spin_loop();
    }
}

/// Spin until `ticks` extended-clock ticks have elapsed on `clock`,
/// measured from the moment of the call.
pub fn spin_for_ticks(clock: &dyn TickSource, ticks: u128) {
    let start = clock.now();
    spin_until(|| elapsed_ticks(start, clock.now()) >= ticks);
}
