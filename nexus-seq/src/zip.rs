//! Multi-way zip: advance N sequences in lockstep.
//!
//! ```text
//! inner[0]:  1  2  3
//! inner[1]:  4  5  6  7
//! inner[2]:  7  8  9
//! zip:      [1,4,7] [2,5,8] [3,6,9]  -- stops when inner[0] runs out
//! ```

use crate::error::SeqError;
use crate::position::Phase;
use crate::seq::{Checkpoint, Identity, Kind, Snapshot, mismatched_checkpoint, sealed};
use crate::Sequence;

/// Advances several sequences together, yielding one tuple per tick.
///
/// The tuple is a slice with one element per inner sequence, in inner
/// order. It lives in a buffer owned by the zip and is overwritten on the
/// next advance. The first inner sequence to run out ends the zip, even if
/// the others could continue.
///
/// Mixed variants can be zipped through `Box<dyn Sequence<Item = T>>`.
///
/// # Example
///
/// ```
/// use nexus_seq::{ArraySeq, Range, Sequence, Zip};
///
/// let mut data = [10i64, 20, 30];
/// let inners: Vec<Box<dyn Sequence<Item = i64> + '_>> = vec![
///     Box::new(ArraySeq::new(&mut data)),
///     Box::new(Range::new(0, 100, 1)),
/// ];
/// let mut zip = Zip::new(inners);
///
/// assert!(zip.advance());
/// assert_eq!(zip.current(), Some(&[10, 0][..]));
/// assert_eq!(zip.count_remaining(), 2);
/// ```
pub struct Zip<S: Sequence>
where
    S::Item: Sized,
{
    inners: Vec<S>,
    /// Per-inner liveness; cleared for the inner that ran out.
    live: Vec<bool>,
    /// Tuple for the current tick, capacity fixed at `inners.len()`.
    buffer: Vec<S::Item>,
    phase: Phase,
}

impl<S> Zip<S>
where
    S: Sequence,
    S::Item: Clone,
{
    /// Zips `inners`, taking ownership of them.
    ///
    /// Zipping no sequences yields an inert zip.
    pub fn new(inners: Vec<S>) -> Self {
        let phase = if inners.is_empty() {
            tracing::debug!(err = %SeqError::EmptyZip, "constructing inert zip");
            Phase::Exhausted
        } else {
            Phase::Fresh
        };
        Self::assemble(inners, phase)
    }

    /// Zips `inners`, failing if there are none.
    pub fn try_new(inners: Vec<S>) -> Result<Self, SeqError> {
        if inners.is_empty() {
            return Err(SeqError::EmptyZip);
        }
        Ok(Self::assemble(inners, Phase::Fresh))
    }

    fn assemble(inners: Vec<S>, phase: Phase) -> Self {
        let width = inners.len();
        Self {
            inners,
            live: vec![true; width],
            buffer: Vec::with_capacity(width),
            phase,
        }
    }

    /// Returns the number of zipped sequences.
    #[inline]
    pub fn width(&self) -> usize {
        self.inners.len()
    }

    /// Returns `false` for the inner sequence that ended the zip.
    ///
    /// Returns `false` for out-of-range indices.
    #[inline]
    pub fn is_slot_live(&self, index: usize) -> bool {
        self.live.get(index).copied().unwrap_or(false)
    }

    /// Returns the zipped sequences.
    #[inline]
    pub fn inners(&self) -> &[S] {
        &self.inners
    }

    /// Unwraps the zip, returning the inner sequences.
    #[inline]
    pub fn into_inners(self) -> Vec<S> {
        self.inners
    }

    /// Refills the tuple from the inners' current elements.
    fn gather(&mut self) -> bool {
        self.buffer.clear();
        for inner in &self.inners {
            match inner.current() {
                Some(item) => self.buffer.push(item.clone()),
                None => {
                    self.buffer.clear();
                    return false;
                }
            }
        }
        true
    }
}

impl<S> sealed::Sealed for Zip<S>
where
    S: Sequence,
    S::Item: Sized,
{
}

impl<S> Sequence for Zip<S>
where
    S: Sequence,
    S::Item: Clone,
{
    type Item = [S::Item];

    #[inline]
    fn kind(&self) -> Kind {
        Kind::Zip
    }

    fn advance(&mut self) -> bool {
        if self.phase == Phase::Exhausted {
            return false;
        }

        self.buffer.clear();
        for (slot, inner) in self.inners.iter_mut().enumerate() {
            let item = if inner.advance() { inner.current() } else { None };
            match item {
                Some(item) => self.buffer.push(item.clone()),
                None => {
                    // Remaining inners keep their previous position.
                    self.live[slot] = false;
                    self.buffer.clear();
                    self.phase = Phase::Exhausted;
                    return false;
                }
            }
        }

        self.phase = Phase::Live;
        true
    }

    #[inline]
    fn current(&self) -> Option<&[S::Item]> {
        if self.phase.is_live() {
            Some(self.buffer.as_slice())
        } else {
            None
        }
    }

    fn rewind(&mut self) {
        if self.inners.is_empty() {
            return;
        }
        for inner in &mut self.inners {
            inner.rewind();
        }
        self.live.fill(true);
        self.buffer.clear();
        self.phase = Phase::Fresh;
    }

    fn identity(&self) -> Identity {
        Identity::Zip(self.inners.iter().map(Sequence::identity).collect())
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint::new(
            Kind::Zip,
            Snapshot::Zip {
                phase: self.phase,
                live: self.live.clone(),
                inners: self.inners.iter().map(Sequence::checkpoint).collect(),
            },
        )
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        let (phase, live, inners) = match checkpoint.snapshot {
            Snapshot::Zip {
                phase,
                live,
                inners,
            } if checkpoint.kind == Kind::Zip && inners.len() == self.inners.len() => {
                (phase, live, inners)
            }
            _ => return mismatched_checkpoint(Kind::Zip, &checkpoint),
        };

        for (inner, saved) in self.inners.iter_mut().zip(inners) {
            inner.restore(saved);
        }
        self.live = live;
        self.phase = phase;
        if phase.is_live() && !self.gather() {
            self.phase = Phase::Exhausted;
        }
        if !phase.is_live() {
            self.buffer.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArraySeq, Range};

    #[test]
    fn stops_at_shortest() {
        let mut a = [1, 2, 3];
        let mut b = [4, 5, 6, 7];
        let mut c = [7, 8, 9];
        let mut zip = Zip::new(vec![
            ArraySeq::new(&mut a),
            ArraySeq::new(&mut b),
            ArraySeq::new(&mut c),
        ]);

        let mut tuples = Vec::new();
        while zip.advance() {
            tuples.push(zip.current().unwrap().to_vec());
        }
        assert_eq!(tuples, vec![vec![1, 4, 7], vec![2, 5, 8], vec![3, 6, 9]]);
        assert!(!zip.is_slot_live(0));
        assert!(zip.is_slot_live(1));
        assert!(zip.is_slot_live(2));
    }

    #[test]
    fn aborted_tick_leaves_later_inners() {
        let mut zip = Zip::new(vec![Range::new(0, 1, 1), Range::new(0, 10, 1)]);
        assert!(zip.advance());
        assert!(!zip.advance());

        let inners = zip.into_inners();
        // Second inner was not advanced on the failing tick.
        assert_eq!(inners[1].current(), Some(&0));
    }

    #[test]
    fn exhausted_is_idempotent() {
        let mut zip = Zip::new(vec![Range::new(0, 1, 1), Range::new(0, 10, 1)]);
        zip.advance();
        for _ in 0..3 {
            assert!(!zip.advance());
            assert_eq!(zip.current(), None);
        }
        assert_eq!(zip.inners()[1].current(), Some(&0));
    }

    #[test]
    fn buffer_is_reused() {
        let mut zip = Zip::new(vec![Range::new(0, 100, 1), Range::new(0, 100, 2)]);
        zip.advance();
        let ptr = zip.current().unwrap().as_ptr();
        zip.advance_by(20);
        assert_eq!(zip.current().unwrap().as_ptr(), ptr);
        assert_eq!(zip.current(), Some(&[20, 40][..]));
    }

    #[test]
    fn empty_zip_is_inert() {
        let mut zip: Zip<Range> = Zip::new(Vec::new());
        assert!(!zip.advance());
        assert!(!zip.reset());
        assert_eq!(zip.width(), 0);
        assert!(matches!(
            Zip::<Range>::try_new(Vec::new()),
            Err(SeqError::EmptyZip)
        ));
    }

    #[test]
    fn reset_produces_first_tuple() {
        let mut zip = Zip::new(vec![Range::new(0, 3, 1), Range::new(10, 20, 5)]);
        assert!(zip.advance());
        assert!(zip.advance());
        assert!(!zip.advance());
        assert!(!zip.is_slot_live(1));

        assert!(zip.reset());
        assert_eq!(zip.current(), Some(&[0, 10][..]));
        assert!(zip.is_slot_live(1));
    }

    #[test]
    fn materialize_restores_tuple() {
        let mut zip = Zip::new(vec![Range::new(0, 3, 1), Range::new(5, 8, 1)]);
        zip.advance();

        assert_eq!(zip.materialize(), vec![vec![1, 6], vec![2, 7]]);
        assert_eq!(zip.current(), Some(&[0, 5][..]));
        assert!(zip.is_slot_live(0));
    }

    #[test]
    fn identity_compares_each_inner() {
        let mut a = Zip::new(vec![Range::new(0, 3, 1), Range::new(0, 3, 1)]);
        let b = Zip::new(vec![Range::new(0, 3, 1), Range::new(0, 3, 1)]);
        let c = Zip::new(vec![Range::new(0, 3, 1)]);
        assert!(a.identity_eq(&b));
        assert!(!a.identity_eq(&c));
        a.advance();
        assert!(!a.identity_eq(&b));
    }
}
