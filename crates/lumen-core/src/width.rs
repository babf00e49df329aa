//! Runtime-tagged index width classes for arena capacity selection.
//!
//! The arena's index type is chosen once at creation time from the
//! available memory, rather than instantiated generically per width.
//! [`WidthClass`] is the tag; the arena stores positions as `u64` and
//! the class bounds the valid range.

use std::fmt;

/// Supported unsigned index widths, ordered narrowest to widest.
///
/// The derived `Ord` follows declaration order, so `W8 < W16 < W32 <
/// W64` and sorting ascends by maximum representable value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WidthClass {
    /// 8-bit index, maximum value 255.
    W8,
    /// 16-bit index, maximum value 65_535.
    W16,
    /// 32-bit index, maximum value 4_294_967_295.
    W32,
    /// 64-bit index.
    W64,
}

impl WidthClass {
    /// All classes in ascending order of maximum representable value.
    pub const ASCENDING: [WidthClass; 4] =
        [WidthClass::W8, WidthClass::W16, WidthClass::W32, WidthClass::W64];

    /// The maximum value representable in this width.
    pub fn max_value(self) -> u64 {
        match self {
            WidthClass::W8 => u64::from(u8::MAX),
            WidthClass::W16 => u64::from(u16::MAX),
            WidthClass::W32 => u64::from(u32::MAX),
            WidthClass::W64 => u64::MAX,
        }
    }

    /// The width in bits.
    pub fn bits(self) -> u32 {
        match self {
            WidthClass::W8 => 8,
            WidthClass::W16 => 16,
            WidthClass::W32 => 32,
            WidthClass::W64 => 64,
        }
    }
}

impl fmt::Display for WidthClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u{}", self.bits())
    }
}
