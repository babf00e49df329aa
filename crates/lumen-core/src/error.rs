//! The command-boundary error type.
//!
//! Argument-validation errors are raised synchronously at the command
//! invocation boundary and reported to the operator there; no error
//! ever crosses into a spawned sweep or saturation worker.

use std::error::Error;
use std::fmt;

/// Errors from parsing and validating command arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandError {
    /// The argument is malformed or has the wrong arity.
    InvalidArgument {
        /// Description of what was wrong with the argument.
        reason: String,
    },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { reason } => {
                write!(f, "invalid argument: {reason}")
            }
        }
    }
}

impl Error for CommandError {}
