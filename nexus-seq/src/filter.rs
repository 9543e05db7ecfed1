//! Filter combinator.

use crate::position::Phase;
use crate::seq::{Checkpoint, Identity, Kind, Snapshot, mismatched_checkpoint, sealed};
use crate::Sequence;

/// Yields the elements of an inner sequence that satisfy a predicate.
///
/// The current element is borrowed from the inner sequence.
///
/// # Example
///
/// ```
/// use nexus_seq::{ArraySeq, Filter, Sequence};
///
/// let mut data = [1, 2, 3, 4, 5, 6];
/// let mut evens = Filter::new(ArraySeq::new(&mut data), |x: &i32| x % 2 == 0);
///
/// assert_eq!(evens.materialize(), vec![2, 4, 6]);
/// ```
pub struct Filter<S, P> {
    inner: S,
    predicate: P,
    phase: Phase,
}

impl<S, P> Filter<S, P>
where
    S: Sequence,
    P: FnMut(&S::Item) -> bool,
{
    /// Wraps `inner`, taking ownership of it.
    pub fn new(inner: S, predicate: P) -> Self {
        Self {
            inner,
            predicate,
            phase: Phase::Fresh,
        }
    }

    /// Returns a reference to the wrapped sequence.
    #[inline]
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwraps the filter, returning the inner sequence.
    #[inline]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, P> sealed::Sealed for Filter<S, P> {}

impl<S, P> Sequence for Filter<S, P>
where
    S: Sequence,
    P: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;

    #[inline]
    fn kind(&self) -> Kind {
        Kind::Filter
    }

    fn advance(&mut self) -> bool {
        if self.phase == Phase::Exhausted {
            return false;
        }

        while self.inner.advance() {
            let matched = match self.inner.current() {
                Some(item) => (self.predicate)(item),
                None => false,
            };
            if matched {
                self.phase = Phase::Live;
                return true;
            }
        }

        self.phase = Phase::Exhausted;
        false
    }

    #[inline]
    fn current(&self) -> Option<&S::Item> {
        if self.phase.is_live() {
            self.inner.current()
        } else {
            None
        }
    }

    fn rewind(&mut self) {
        self.inner.rewind();
        self.phase = Phase::Fresh;
    }

    fn identity(&self) -> Identity {
        Identity::Filter(Box::new(self.inner.identity()))
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint::new(
            Kind::Filter,
            Snapshot::Adapter {
                phase: self.phase,
                inner: Box::new(self.inner.checkpoint()),
            },
        )
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        match checkpoint.snapshot {
            Snapshot::Adapter { phase, inner } if checkpoint.kind == Kind::Filter => {
                self.inner.restore(*inner);
                self.phase = phase;
            }
            _ => mismatched_checkpoint(Kind::Filter, &checkpoint),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArraySeq, Range};

    #[test]
    fn keeps_matching() {
        let mut data = [1, 2, 3, 4, 5, 6];
        let mut evens = ArraySeq::new(&mut data).filter(|x| x % 2 == 0);

        let mut out = Vec::new();
        while evens.advance() {
            out.push(*evens.current().unwrap());
        }
        assert_eq!(out, vec![2, 4, 6]);
        assert!(!evens.advance());
        assert_eq!(evens.current(), None);
    }

    #[test]
    fn nothing_matches() {
        let mut seq = Range::new(0, 10, 1).filter(|x| *x > 100);
        assert!(!seq.advance());
        assert!(!seq.advance());
        assert_eq!(seq.current(), None);
    }

    #[test]
    fn exhaustion_does_not_reinvoke_predicate() {
        let mut calls = 0;
        let mut seq = Range::new(0, 3, 1).filter(|_| {
            calls += 1;
            false
        });
        assert!(!seq.advance());
        assert!(!seq.advance());
        drop(seq);
        assert_eq!(calls, 3);
    }

    #[test]
    fn current_empty_before_first_advance() {
        let mut inner = Range::new(0, 10, 1);
        inner.advance();
        let seq = inner.filter(|_| true);
        assert_eq!(seq.current(), None);
    }

    #[test]
    fn reset_skips_to_first_match() {
        let mut seq = Range::new(1, 10, 1).filter(|x| x % 3 == 0);
        seq.advance_by(2);
        assert_eq!(seq.current(), Some(&6));

        assert!(seq.reset());
        assert_eq!(seq.current(), Some(&3));
    }

    #[test]
    fn identity_follows_inner() {
        let mut a = Range::new(0, 10, 1).filter(|x| x % 2 == 0);
        let b = Range::new(0, 10, 1).filter(|x| x % 2 == 0);
        assert_eq!(a.identity(), b.identity());
        a.advance();
        assert_ne!(a.identity(), b.identity());
        assert_eq!(a.kind(), Kind::Filter);
    }

    #[test]
    fn into_inner_returns_wrapped() {
        let mut seq = Range::new(0, 10, 1).filter(|x| *x == 4);
        seq.advance();
        let inner = seq.into_inner();
        assert_eq!(inner.current(), Some(&4));
    }
}
