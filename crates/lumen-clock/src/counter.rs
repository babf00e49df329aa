//! Raw hardware cycle counter access.
//!
//! This is the only module in the workspace that touches `unsafe`: the
//! architecture intrinsics for reading the cycle counter. Each use
//! carries a `// SAFETY:` comment. Everything above this module works
//! with plain `u64` samples.

#![allow(unsafe_code)]

use lumen_core::CycleSource;

/// Read the raw hardware cycle counter.
///
/// On x86_64 this is `RDTSC` fenced against speculative reordering; on
/// aarch64 it is `CNTVCT_EL0`, the fixed-frequency virtual timer
/// readable from userspace. Other targets fall back to a monotonic
/// nanosecond count so the crate builds everywhere, at reduced
/// resolution.
#[inline(always)]
pub fn read_raw_cycles() -> u64 {
    #[cfg(target_arch = "x86_64")]
    {
        read_raw_cycles_x86_64()
    }

    #[cfg(target_arch = "aarch64")]
    {
        read_raw_cycles_aarch64()
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        read_raw_cycles_fallback()
    }
}

#[cfg(target_arch = "x86_64")]
#[inline(always)]
fn read_raw_cycles_x86_64() -> u64 {
    use core::arch::x86_64::{_rdtsc, _mm_lfence};
    // SAFETY: RDTSC and LFENCE are unprivileged and have no memory
    // operands. The fences keep speculative execution from hoisting
    // work across the read.
    unsafe {
        _mm_lfence();
        let cycles = _rdtsc();
        _mm_lfence();
        cycles
    }
}

#[cfg(target_arch = "aarch64")]
#[inline(always)]
fn read_raw_cycles_aarch64() -> u64 {
    let val: u64;
    // SAFETY: CNTVCT_EL0 is readable from EL0 and the asm has no side
    // effects beyond writing the output register.
    unsafe {
        core::arch::asm!("mrs {}, cntvct_el0", out(reg) val, options(nomem, nostack));
    }
    val
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
fn read_raw_cycles_fallback() -> u64 {
    use std::sync::OnceLock;
    use std::time::Instant;
    static BASELINE: OnceLock<Instant> = OnceLock::new();
    let baseline = BASELINE.get_or_init(Instant::now);
    Instant::now().duration_since(*baseline).as_nanos() as u64
}

/// The hardware cycle counter as a [`CycleSource`].
#[derive(Clone, Copy, Debug, Default)]
pub struct TscSource;

impl TscSource {
    /// Create a hardware counter source.
    pub fn new() -> Self {
        TscSource
    }
}

impl CycleSource for TscSource {
    #[inline(always)]
    fn sample(&mut self) -> u64 {
        read_raw_cycles()
    }
}
