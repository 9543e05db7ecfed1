//! Map combinator.

use core::cell::Cell;

use crate::position::Phase;
use crate::seq::{Checkpoint, Identity, Kind, Snapshot, mismatched_checkpoint, sealed};
use crate::Sequence;

/// Applies a transform to every element of an inner sequence.
///
/// The transformed value is owned by the `Map` and replaced on each
/// advance. The transform runs exactly once per produced element, and never
/// once the inner sequence is exhausted.
///
/// Restoring the most recent [`checkpoint`](Sequence::checkpoint) hands back
/// the value that was current when it was taken, so
/// [`materialize`](Sequence::materialize) never re-runs the transform.
/// Older checkpoints re-derive the value from the inner sequence.
///
/// # Example
///
/// ```
/// use nexus_seq::{ArraySeq, Map, Sequence};
///
/// let mut data = [1, 2, 3];
/// let mut squares = Map::new(ArraySeq::new(&mut data), |x: &i32| x * x);
///
/// assert_eq!(squares.materialize(), vec![1, 4, 9]);
///
/// // The element type may change.
/// let mut labels = Map::new(ArraySeq::new(&mut data), |x: &i32| format!("#{x}"));
/// assert!(labels.advance());
/// assert_eq!(labels.current().map(String::as_str), Some("#1"));
/// ```
pub struct Map<S, F, U> {
    inner: S,
    transform: F,
    current: Option<U>,
    phase: Phase,
    /// Names `current`; fresh for every value the transform produces.
    epoch: u64,
    /// Last epoch handed out, for minting fresh ones.
    minted: u64,
    /// Epoch recorded by the latest live checkpoint.
    pinned: Cell<Option<u64>>,
    /// The pinned value, set aside once an advance replaces it.
    stash: Option<(u64, U)>,
}

impl<S, F, U> Map<S, F, U>
where
    S: Sequence,
    F: FnMut(&S::Item) -> U,
{
    /// Wraps `inner`, taking ownership of it.
    pub fn new(inner: S, transform: F) -> Self {
        Self {
            inner,
            transform,
            current: None,
            phase: Phase::Fresh,
            epoch: 0,
            minted: 0,
            pinned: Cell::new(None),
            stash: None,
        }
    }

    /// Returns a reference to the wrapped sequence.
    #[inline]
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwraps the map, returning the inner sequence.
    #[inline]
    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Drops the current value, or sets it aside if a checkpoint names it.
    fn retire_current(&mut self) {
        let Some(value) = self.current.take() else {
            return;
        };
        if self.pinned.get() == Some(self.epoch) {
            self.pinned.set(None);
            self.stash = Some((self.epoch, value));
        }
    }

    /// Re-derives the current value from the inner sequence.
    fn refresh(&mut self) -> bool {
        self.retire_current();
        self.minted += 1;
        self.epoch = self.minted;
        self.current = match self.inner.current() {
            Some(item) => Some((self.transform)(item)),
            None => None,
        };
        self.phase = if self.current.is_some() {
            Phase::Live
        } else {
            Phase::Exhausted
        };
        self.phase.is_live()
    }
}

impl<S, F, U> sealed::Sealed for Map<S, F, U> {}

impl<S, F, U> Sequence for Map<S, F, U>
where
    S: Sequence,
    F: FnMut(&S::Item) -> U,
{
    type Item = U;

    #[inline]
    fn kind(&self) -> Kind {
        Kind::Map
    }

    fn advance(&mut self) -> bool {
        if self.phase == Phase::Exhausted {
            return false;
        }
        if self.inner.advance() {
            return self.refresh();
        }
        self.retire_current();
        self.phase = Phase::Exhausted;
        false
    }

    #[inline]
    fn current(&self) -> Option<&U> {
        self.current.as_ref()
    }

    fn rewind(&mut self) {
        self.inner.rewind();
        self.current = None;
        self.stash = None;
        self.pinned.set(None);
        self.phase = Phase::Fresh;
    }

    fn identity(&self) -> Identity {
        Identity::Map(Box::new(self.inner.identity()))
    }

    fn checkpoint(&self) -> Checkpoint {
        if self.phase.is_live() {
            self.pinned.set(Some(self.epoch));
        }
        Checkpoint::new(
            Kind::Map,
            Snapshot::Map {
                phase: self.phase,
                epoch: self.epoch,
                inner: Box::new(self.inner.checkpoint()),
            },
        )
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        let (phase, epoch, inner) = match checkpoint.snapshot {
            Snapshot::Map {
                phase,
                epoch,
                inner,
            } if checkpoint.kind == Kind::Map => (phase, epoch, inner),
            _ => return mismatched_checkpoint(Kind::Map, &checkpoint),
        };

        self.inner.restore(*inner);
        if phase != Phase::Live {
            self.current = None;
            self.stash = None;
            self.phase = phase;
            return;
        }

        if self.phase.is_live() && self.epoch == epoch {
            // Nothing advanced since the checkpoint.
            return;
        }
        match self.stash.take() {
            Some((saved, value)) if saved == epoch => {
                self.current = Some(value);
                self.epoch = epoch;
                self.phase = Phase::Live;
            }
            _ => {
                self.refresh();
            }
        }
    }
}
