//! Command-argument parsing.
//!
//! Both engine operations take a single unsigned integer rendered as
//! text (tour count, gigatick count). Validation happens here, at the
//! command boundary, so a spawned worker never sees a malformed
//! argument.

use lumen_core::CommandError;

/// Parse a command argument expected to hold exactly one unsigned
/// decimal integer.
///
/// Surrounding whitespace is tolerated; empty input and multi-token
/// input are arity errors.
pub fn parse_unsigned_arg(input: &str) -> Result<u64, CommandError> {
    let mut tokens = input.split_whitespace();
    let token = tokens.next().ok_or_else(|| CommandError::InvalidArgument {
        reason: "expected one unsigned integer, got empty input".into(),
    })?;
    if tokens.next().is_some() {
        return Err(CommandError::InvalidArgument {
            reason: format!("expected one unsigned integer, got extra input after {token:?}"),
        });
    }
    token
        .parse::<u64>()
        .map_err(|e| CommandError::InvalidArgument {
            reason: format!("{token:?} is not an unsigned integer: {e}"),
        })
}
