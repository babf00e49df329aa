//! The shared property store.
//!
//! Process-wide state readable across all components: parallelism,
//! arena capacity, width class, output precision, and the ordered
//! extension-slot table whose first slot holds the last throughput
//! estimate. Initialized once at startup; each slot has a single
//! writer (the estimator writes the throughput slot, nothing writes
//! the reserved ones) and any number of readers.

use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use lumen_core::{ThroughputRecord, WidthClass};

/// Name of the slot the throughput estimator writes.
pub const SLOT_THROUGHPUT: &str = "throughput";

/// Names of the reserved extension slots, in emission order after the
/// throughput slot. Always zero in this core.
pub const RESERVED_SLOTS: [&str; 3] = ["ext1", "ext2", "ext3"];

/// Decimal places used when rendering records.
pub const DEFAULT_OUTPUT_PRECISION: usize = 20;

/// The shared property store.
///
/// Slot values are `f64` bits in `AtomicU64`s so a single writer can
/// update them in place while readers snapshot without locks. The slot
/// table is never resized after construction; iteration order is
/// insertion order and defines the record column order.
pub struct Properties {
    parallelism: usize,
    capacity: u64,
    width: WidthClass,
    output_precision: usize,
    slots: IndexMap<&'static str, AtomicU64>,
}

// Compile-time assertion: Properties must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<Properties>();
};

impl Properties {
    /// Build the store for a freshly initialized universe.
    pub fn new(
        parallelism: usize,
        capacity: u64,
        width: WidthClass,
        output_precision: usize,
    ) -> Self {
        let mut slots = IndexMap::new();
        slots.insert(SLOT_THROUGHPUT, AtomicU64::new(0.0f64.to_bits()));
        for name in RESERVED_SLOTS {
            slots.insert(name, AtomicU64::new(0.0f64.to_bits()));
        }
        Self {
            parallelism,
            capacity,
            width,
            output_precision,
            slots,
        }
    }

    /// Number of execution units saturation jobs will use.
    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    /// Observable arena capacity in cells.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// The arena's index width class.
    pub fn width(&self) -> WidthClass {
        self.width
    }

    /// Decimal places for record rendering.
    pub fn output_precision(&self) -> usize {
        self.output_precision
    }

    /// Store a new throughput estimate. Estimator only.
    pub fn set_throughput(&self, value: f64) {
        self.slots[SLOT_THROUGHPUT].store(value.to_bits(), Ordering::Release);
    }

    /// The last stored throughput estimate.
    pub fn throughput(&self) -> f64 {
        f64::from_bits(self.slots[SLOT_THROUGHPUT].load(Ordering::Acquire))
    }

    /// Snapshot all slot values in emission order.
    pub fn slot_values(&self) -> Vec<f64> {
        self.slots
            .values()
            .map(|bits| f64::from_bits(bits.load(Ordering::Acquire)))
            .collect()
    }

    /// Build a record from the current slot values.
    pub fn record(&self) -> ThroughputRecord {
        ThroughputRecord::from_slots(self.slot_values())
    }
}
