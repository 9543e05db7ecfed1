//! Construction errors.

use core::fmt;

/// A sequence could not be constructed from the given parameters.
///
/// Returned by the fallible `try_*` constructors. The infallible
/// constructors produce an inert, already-exhausted sequence instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqError {
    /// A range was requested with a step of zero.
    ZeroStep {
        /// Requested first value.
        start: i64,
        /// Requested exclusive bound.
        end: i64,
    },
    /// A zip was requested over no inner sequences.
    EmptyZip,
}

impl fmt::Display for SeqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeqError::ZeroStep { start, end } => {
                write!(f, "range {start}..{end} has a step of zero")
            }
            SeqError::EmptyZip => write!(f, "zip needs at least one inner sequence"),
        }
    }
}

impl std::error::Error for SeqError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let err = SeqError::ZeroStep { start: 1, end: 9 };
        assert_eq!(err.to_string(), "range 1..9 has a step of zero");
        assert_eq!(
            SeqError::EmptyZip.to_string(),
            "zip needs at least one inner sequence"
        );
    }
}
