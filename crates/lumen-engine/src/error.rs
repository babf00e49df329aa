//! Engine-level error types.

use std::error::Error;
use std::fmt;

use lumen_arena::SizerError;
use lumen_clock::ClockError;
use lumen_core::CommandError;

/// Errors from constructing a [`Universe`](crate::Universe) or starting
/// one of its operations.
#[derive(Debug)]
pub enum UniverseError {
    /// Capacity selection failed: available memory too small for the
    /// narrowest index width class. Fatal at initialization, but a
    /// user-correctable per-command condition for sweep startup.
    Sizer(SizerError),
    /// The clock monitor could not be started.
    Clock(ClockError),
    /// A command argument failed validation. Recovered at the command
    /// boundary; never reaches a spawned worker.
    Command(CommandError),
    /// A sweep or saturation thread could not be spawned.
    ThreadSpawnFailed {
        /// Description of which thread failed.
        reason: String,
    },
    /// The record sink could not be opened.
    SinkUnavailable {
        /// Description of the sink failure.
        reason: String,
    },
}

impl fmt::Display for UniverseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sizer(e) => write!(f, "sizer: {e}"),
            Self::Clock(e) => write!(f, "clock: {e}"),
            Self::Command(e) => write!(f, "command: {e}"),
            Self::ThreadSpawnFailed { reason } => {
                write!(f, "thread spawn failed: {reason}")
            }
            Self::SinkUnavailable { reason } => {
                write!(f, "record sink unavailable: {reason}")
            }
        }
    }
}

impl Error for UniverseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sizer(e) => Some(e),
            Self::Clock(e) => Some(e),
            Self::Command(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SizerError> for UniverseError {
    fn from(e: SizerError) -> Self {
        Self::Sizer(e)
    }
}

impl From<ClockError> for UniverseError {
    fn from(e: ClockError) -> Self {
        Self::Clock(e)
    }
}

impl From<CommandError> for UniverseError {
    fn from(e: CommandError) -> Self {
        Self::Command(e)
    }
}
