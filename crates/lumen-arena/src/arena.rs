//! The shared byte arena.
//!
//! A contiguous zero-initialized cell buffer, created once from the
//! sizer's decision and never resized. During a sweep exactly one cell
//! is active (value 1) and all others are 0; the sweep owns that
//! invariant, the arena just provides race-free cell stores. At most
//! one sweep mutates the arena at a time — that is a caller convention,
//! documented rather than enforced, because concurrent sweeps would
//! corrupt each other's lap-boundary detection anyway.

use std::sync::atomic::{AtomicU8, Ordering};

use lumen_core::WidthClass;

/// The shared cell buffer.
///
/// Cells are `AtomicU8` so the sweep thread can write through a shared
/// reference; all accesses are relaxed single-byte stores and loads.
pub struct Arena {
    cells: Box<[AtomicU8]>,
    width: WidthClass,
}

// Compile-time assertion: Arena must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<Arena>();
};

impl Arena {
    /// Create an arena with an explicit capacity, tagged with the index
    /// width class that covers it.
    ///
    /// Production arenas come from [`for_class`](Arena::for_class); this
    /// constructor exists so tests and benchmarks can build small
    /// arenas without allocating a full class range.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize, width: WidthClass) -> Self {
        assert!(capacity > 0, "arena capacity must be non-zero");
        let cells = (0..capacity).map(|_| AtomicU8::new(0)).collect();
        Self { cells, width }
    }

    /// Create the full-range arena for a width class: capacity equals
    /// the class's maximum value.
    ///
    /// # Panics
    ///
    /// Panics if the class's range does not fit `usize` on this target.
    pub fn for_class(width: WidthClass) -> Self {
        let capacity = usize::try_from(width.max_value())
            .unwrap_or_else(|_| panic!("width class {width} exceeds usize on this target"));
        Self::with_capacity(capacity, width)
    }

    /// Number of cells.
    pub fn capacity(&self) -> u64 {
        self.cells.len() as u64
    }

    /// The index width class this arena was sized for.
    pub fn width(&self) -> WidthClass {
        self.width
    }

    /// Mark the cell at `index` active.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below the capacity.
    #[inline]
    pub fn set(&self, index: u64) {
        self.cells[index as usize].store(1, Ordering::Relaxed);
    }

    /// Mark the cell at `index` inactive.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below the capacity.
    #[inline]
    pub fn clear(&self, index: u64) {
        self.cells[index as usize].store(0, Ordering::Relaxed);
    }

    /// Read the cell at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below the capacity.
    #[inline]
    pub fn get(&self, index: u64) -> u8 {
        self.cells[index as usize].load(Ordering::Relaxed)
    }

    /// Number of active cells. Full scan; diagnostics and tests only.
    pub fn active_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.load(Ordering::Relaxed) != 0)
            .count()
    }
}
