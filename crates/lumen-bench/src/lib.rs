//! Benchmark profiles and utilities for the Lumen engine.
//!
//! Provides deterministic inputs for the criterion benches:
//!
//! - [`RampSource`]: a wrapping synthetic raw counter for driving the
//!   clock monitor fold without hardware timing noise
//! - [`scattered_indices`]: a seeded random cell-access pattern for
//!   arena benches

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use lumen_core::CycleSource;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A synthetic raw counter climbing by a fixed stride and wrapping at
/// the 64-bit boundary.
///
/// With a large stride this exercises the monitor's wraparound fold at
/// a controlled rate, something the hardware counter cannot do on a
/// bench timescale.
pub struct RampSource {
    next: u64,
    stride: u64,
}

impl RampSource {
    /// Create a ramp starting at `start`, advancing `stride` per sample.
    pub fn new(start: u64, stride: u64) -> Self {
        Self {
            next: start,
            stride,
        }
    }
}

impl CycleSource for RampSource {
    fn sample(&mut self) -> u64 {
        let sample = self.next;
        self.next = self.next.wrapping_add(self.stride);
        sample
    }
}

/// A deterministic scattered cell-access pattern: `len` indices drawn
/// from `0..capacity` with a seeded ChaCha8 generator.
///
/// # Panics
///
/// Panics if `capacity` is zero.
pub fn scattered_indices(capacity: u64, len: usize, seed: u64) -> Vec<u64> {
    assert!(capacity > 0, "capacity must be non-zero");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len).map(|_| rng.next_u64() % capacity).collect()
}
