//! Capacity sizing and the shared byte arena.
//!
//! The sizer turns a free-memory figure into an index width class and
//! an "observable" capacity; the arena is the contiguous zero-filled
//! cell buffer of that capacity, created once at startup and shared
//! for the lifetime of the process.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod error;
pub mod mem;
pub mod sizer;

pub use arena::Arena;
pub use error::SizerError;
pub use mem::available_memory;
pub use sizer::{select_capacity, CELL_SIZE};
