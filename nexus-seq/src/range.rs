//! Arithmetic integer progression with no backing storage.

use crate::error::SeqError;
use crate::position::Phase;
use crate::seq::{Checkpoint, Identity, Kind, Snapshot, mismatched_checkpoint, sealed};
use crate::Sequence;

/// Sequence of `start, start + step, ...` stopping before `end`.
///
/// The step may be negative. A step of zero yields an inert range that
/// never produces a value.
///
/// [`reset`](Sequence::reset) lands on `start` only when `start` lies
/// before `end`; an empty range such as `Range::new(5, 5, 1)` resets to
/// exhausted and returns `false`.
///
/// # Example
///
/// ```
/// use nexus_seq::{Range, Sequence};
///
/// assert_eq!(Range::new(0, 10, 2).materialize(), vec![0, 2, 4, 6, 8]);
/// assert_eq!(Range::new(10, 0, -3).materialize(), vec![10, 7, 4, 1]);
/// assert!(Range::new(0, 10, 0).materialize().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    start: i64,
    end: i64,
    step: i64,
    current: i64,
    phase: Phase,
}

impl Range {
    /// Creates a range from `start` (inclusive) to `end` (exclusive).
    ///
    /// A zero `step` produces an inert range.
    pub fn new(start: i64, end: i64, step: i64) -> Self {
        match Self::try_new(start, end, step) {
            Ok(range) => range,
            Err(err) => {
                tracing::debug!(%err, "constructing inert range");
                Self {
                    start,
                    end,
                    step: 0,
                    current: start,
                    phase: Phase::Exhausted,
                }
            }
        }
    }

    /// Creates a range, failing if `step` is zero.
    pub fn try_new(start: i64, end: i64, step: i64) -> Result<Self, SeqError> {
        if step == 0 {
            return Err(SeqError::ZeroStep { start, end });
        }
        Ok(Self {
            start,
            end,
            step,
            current: start,
            phase: Phase::Fresh,
        })
    }

    /// Returns the first value.
    #[inline]
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Returns the exclusive bound.
    #[inline]
    pub fn end(&self) -> i64 {
        self.end
    }

    /// Returns the step, zero for an inert range.
    #[inline]
    pub fn step(&self) -> i64 {
        self.step
    }

    /// Returns `true` if the range was built with a zero step.
    #[inline]
    pub fn is_inert(&self) -> bool {
        self.step == 0
    }

    /// Returns `true` if `value` lies on the producing side of `end`.
    #[inline]
    fn in_bounds(&self, value: i64) -> bool {
        if self.step > 0 {
            value < self.end
        } else {
            value > self.end
        }
    }
}

impl sealed::Sealed for Range {}

impl Sequence for Range {
    type Item = i64;

    #[inline]
    fn kind(&self) -> Kind {
        Kind::Range
    }

    fn advance(&mut self) -> bool {
        let next = match self.phase {
            Phase::Fresh => Some(self.start),
            Phase::Live => self.current.checked_add(self.step),
            Phase::Exhausted => return false,
        };

        match next {
            Some(value) if self.in_bounds(value) => {
                self.current = value;
                self.phase = Phase::Live;
                true
            }
            // Overflow crosses any bound.
            _ => {
                self.phase = Phase::Exhausted;
                false
            }
        }
    }

    #[inline]
    fn current(&self) -> Option<&i64> {
        self.phase.is_live().then_some(&self.current)
    }

    fn rewind(&mut self) {
        if self.is_inert() {
            return;
        }
        self.current = self.start;
        self.phase = Phase::Fresh;
    }

    fn identity(&self) -> Identity {
        Identity::Range {
            current: self.current().copied(),
            end: self.end,
            step: self.step,
        }
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint::new(
            Kind::Range,
            Snapshot::Range {
                phase: self.phase,
                current: self.current,
            },
        )
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        match checkpoint.snapshot {
            Snapshot::Range { phase, current } if checkpoint.kind == Kind::Range => {
                self.phase = phase;
                self.current = current;
            }
            _ => mismatched_checkpoint(Kind::Range, &checkpoint),
        }
    }
}
