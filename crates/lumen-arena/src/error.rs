//! Sizer-specific error types.

use std::error::Error;
use std::fmt;

/// Errors from capacity selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SizerError {
    /// Available memory is too small to satisfy even the narrowest
    /// supported index width class.
    ResourceExhausted {
        /// Bytes available at selection time.
        available_bytes: u64,
        /// Size of one arena element in bytes.
        element_size: u64,
        /// Element count the narrowest class would need to exceed.
        minimum_elements: u64,
    },
}

impl fmt::Display for SizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResourceExhausted {
                available_bytes,
                element_size,
                minimum_elements,
            } => {
                write!(
                    f,
                    "resource exhausted: {available_bytes} bytes at {element_size} bytes/element \
                     cannot exceed the minimum of {minimum_elements} elements"
                )
            }
        }
    }
}

impl Error for SizerError {}
