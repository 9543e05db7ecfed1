//! Cursor state shared by the sequence variants.
//!
//! Every sequence is in exactly one of three states: nothing produced yet,
//! positioned on an element, or exhausted. Exhaustion is terminal until an
//! explicit rewind.

/// Cursor position of an [`ArraySeq`](crate::ArraySeq).
///
/// # Example
///
/// ```
/// use nexus_seq::{ArraySeq, Position, Sequence};
///
/// let mut data = [7u32, 8];
/// let mut seq = ArraySeq::new(&mut data);
///
/// assert_eq!(seq.position(), Position::Before);
/// seq.advance();
/// assert_eq!(seq.position(), Position::At(0));
/// seq.advance();
/// seq.advance();
/// assert_eq!(seq.position(), Position::Done);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Position {
    /// No element has been produced yet.
    #[default]
    Before,
    /// Positioned on the given table slot.
    At(usize),
    /// Traversal finished.
    Done,
}

impl Position {
    /// Returns the slot index if positioned on an element.
    #[inline]
    pub const fn slot(self) -> Option<usize> {
        match self {
            Position::At(slot) => Some(slot),
            _ => None,
        }
    }

    /// Returns `true` once traversal has finished.
    #[inline]
    pub const fn is_done(self) -> bool {
        matches!(self, Position::Done)
    }

    /// Position after one step over a table of `len` slots.
    #[inline]
    pub(crate) const fn step(self, len: usize) -> Self {
        match self {
            Position::Before if len > 0 => Position::At(0),
            Position::At(slot) if slot + 1 < len => Position::At(slot + 1),
            _ => Position::Done,
        }
    }
}

/// Lifecycle of the variants that have no slot index of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Phase {
    #[default]
    Fresh,
    Live,
    Exhausted,
}

impl Phase {
    #[inline]
    pub(crate) fn is_live(self) -> bool {
        self == Phase::Live
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_walks_table() {
        let mut pos = Position::Before;
        pos = pos.step(3);
        assert_eq!(pos, Position::At(0));
        pos = pos.step(3);
        pos = pos.step(3);
        assert_eq!(pos, Position::At(2));
        pos = pos.step(3);
        assert_eq!(pos, Position::Done);
    }

    #[test]
    fn step_empty_table() {
        assert_eq!(Position::Before.step(0), Position::Done);
    }

    #[test]
    fn done_is_terminal() {
        assert_eq!(Position::Done.step(100), Position::Done);
        assert!(Position::Done.is_done());
        assert_eq!(Position::Done.slot(), None);
    }
}
