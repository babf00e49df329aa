//! Clock-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur while starting the cycle clock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClockError {
    /// The monitor thread could not be spawned.
    ThreadSpawnFailed {
        /// Description of the spawn failure.
        reason: String,
    },
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThreadSpawnFailed { reason } => {
                write!(f, "clock monitor thread spawn failed: {reason}")
            }
        }
    }
}

impl Error for ClockError {}
