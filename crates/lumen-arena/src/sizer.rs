//! Capacity selection: pick the index width class for the arena.

use lumen_core::WidthClass;

use crate::error::SizerError;

/// Size of one arena cell in bytes.
pub const CELL_SIZE: u64 = 1;

/// Select the observable capacity and index width class for the given
/// free-memory figure.
///
/// `max_elements = available_bytes / element_size` is the theoretical
/// maximum cell count. Scanning the width classes in ascending order of
/// maximum representable value, the selection keeps the largest class
/// whose full range is **strictly less than** `max_elements`. The
/// observable capacity is that class's maximum value: the widest index
/// type whose entire range is guaranteed to fit in available memory,
/// one size class of headroom below the true fit. A class that could
/// merely *count* `max_elements` is deliberately not chosen.
///
/// Returns [`SizerError::ResourceExhausted`] when not even the 8-bit
/// class's range fits.
///
/// # Panics
///
/// Panics if `element_size` is zero.
pub fn select_capacity(
    available_bytes: u64,
    element_size: u64,
) -> Result<(u64, WidthClass), SizerError> {
    assert!(element_size > 0, "element_size must be non-zero");
    let max_elements = available_bytes / element_size;

    let mut selected = None;
    for class in WidthClass::ASCENDING {
        if class.max_value() < max_elements {
            selected = Some(class);
        }
    }

    match selected {
        Some(class) => Ok((class.max_value(), class)),
        None => Err(SizerError::ResourceExhausted {
            available_bytes,
            element_size,
            minimum_elements: WidthClass::W8.max_value(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn three_hundred_elements_selects_w8() {
        // 255 < 300 holds, 65535 < 300 does not: the 8-bit class wins
        // even though 300 elements would fit a 16-bit index.
        let (capacity, class) = select_capacity(300, 1).unwrap();
        assert_eq!(class, WidthClass::W8);
        assert_eq!(capacity, 255);
    }

    #[test]
    fn exact_class_max_is_not_enough() {
        // 255 < 255 is false; nothing satisfies.
        assert!(select_capacity(255, 1).is_err());
        // One element more and the 8-bit class fits.
        let (capacity, class) = select_capacity(256, 1).unwrap();
        assert_eq!((capacity, class), (255, WidthClass::W8));
    }

    #[test]
    fn w16_boundary() {
        let (_, class) = select_capacity(65_535, 1).unwrap();
        assert_eq!(class, WidthClass::W8);
        let (capacity, class) = select_capacity(65_536, 1).unwrap();
        assert_eq!((capacity, class), (65_535, WidthClass::W16));
    }

    #[test]
    fn w32_boundary() {
        let max32 = u64::from(u32::MAX);
        let (_, class) = select_capacity(max32, 1).unwrap();
        assert_eq!(class, WidthClass::W16);
        let (capacity, class) = select_capacity(max32 + 1, 1).unwrap();
        assert_eq!((capacity, class), (max32, WidthClass::W32));
    }

    #[test]
    fn w64_is_unreachable() {
        // max_elements is itself a u64, so u64::MAX < max_elements can
        // never hold; the widest selectable class is 32-bit.
        let (capacity, class) = select_capacity(u64::MAX, 1).unwrap();
        assert_eq!(class, WidthClass::W32);
        assert_eq!(capacity, u64::from(u32::MAX));
    }

    #[test]
    fn element_size_divides_available_bytes() {
        // 2048 bytes at 8 bytes/element is 256 elements: the 8-bit
        // class fits.
        let (capacity, class) = select_capacity(2048, 8).unwrap();
        assert_eq!((capacity, class), (255, WidthClass::W8));
        // 2040 bytes is 255 elements: nothing fits.
        assert!(select_capacity(2040, 8).is_err());
    }

    #[test]
    fn zero_available_is_exhausted() {
        match select_capacity(0, 1) {
            Err(SizerError::ResourceExhausted {
                available_bytes, ..
            }) => assert_eq!(available_bytes, 0),
            other => panic!("expected ResourceExhausted, got {other:?}"),
        }
    }

    #[test]
    #[should_panic(expected = "element_size must be non-zero")]
    fn zero_element_size_panics() {
        let _ = select_capacity(1024, 0);
    }

    proptest! {
        /// The selected class max is always strictly below the element
        /// count, and the next wider class (if any) is not.
        #[test]
        fn selection_is_largest_strictly_below(available in 0u64..u64::MAX) {
            let max_elements = available; // element_size = 1
            match select_capacity(available, 1) {
                Ok((capacity, class)) => {
                    prop_assert!(capacity < max_elements);
                    prop_assert_eq!(capacity, class.max_value());
                    let wider = WidthClass::ASCENDING
                        .iter()
                        .find(|c| c.max_value() > class.max_value());
                    if let Some(wider) = wider {
                        prop_assert!(wider.max_value() >= max_elements);
                    }
                }
                Err(_) => {
                    prop_assert!(max_elements <= WidthClass::W8.max_value());
                }
            }
        }
    }
}
