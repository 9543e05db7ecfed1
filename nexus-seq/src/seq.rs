//! The sequence facade: one capability set shared by every variant.
//!
//! A [`Sequence`] is a cursor that produces elements one at a time. Unlike
//! [`Iterator`], the element stays readable through [`Sequence::current`]
//! until the next advance, which lets the array variant hand out references
//! into caller storage and lets combinators look at their inner element
//! without taking it.
//!
//! ```text
//! construct ──► advance ──► current ──► advance ──► ... ──► advance == false
//!     │            ▲                                             │
//!     └── rewind ──┴──────────────── reset ◄─────────────────────┘
//! ```

use core::cmp::Ordering;

use crate::position::{Phase, Position};
use crate::{Filter, Map};

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// Variant tag of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// [`ArraySeq`](crate::ArraySeq)
    Array,
    /// [`Range`](crate::Range)
    Range,
    /// [`Filter`]
    Filter,
    /// [`Map`]
    Map,
    /// [`Zip`](crate::Zip)
    Zip,
}

/// Structural identity of a sequence, used for equality checks.
///
/// Identities of different variants never compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identity {
    /// Storage address and cursor of an array sequence.
    Array {
        /// Start of the caller storage.
        storage: *const (),
        /// Cursor position.
        position: Position,
    },
    /// Current value and bounds of a range.
    Range {
        /// Current value, `None` when not positioned on a value.
        current: Option<i64>,
        /// Exclusive bound.
        end: i64,
        /// Step.
        step: i64,
    },
    /// Identity of the sequence wrapped by a filter.
    Filter(Box<Identity>),
    /// Identity of the sequence wrapped by a map.
    Map(Box<Identity>),
    /// Identities of the zipped sequences, in order.
    Zip(Vec<Identity>),
}

impl Identity {
    /// Returns the variant this identity was taken from.
    pub fn kind(&self) -> Kind {
        match self {
            Identity::Array { .. } => Kind::Array,
            Identity::Range { .. } => Kind::Range,
            Identity::Filter(_) => Kind::Filter,
            Identity::Map(_) => Kind::Map,
            Identity::Zip(_) => Kind::Zip,
        }
    }
}

/// Saved traversal position of a sequence.
///
/// Obtained from [`Sequence::checkpoint`] and handed back to
/// [`Sequence::restore`] on the same sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    pub(crate) kind: Kind,
    pub(crate) snapshot: Snapshot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Snapshot {
    Array(Position),
    Range {
        phase: Phase,
        current: i64,
    },
    Adapter {
        phase: Phase,
        inner: Box<Checkpoint>,
    },
    /// `epoch` names the transformed value that was current.
    Map {
        phase: Phase,
        epoch: u64,
        inner: Box<Checkpoint>,
    },
    Zip {
        phase: Phase,
        live: Vec<bool>,
        inners: Vec<Checkpoint>,
    },
}

impl Checkpoint {
    #[inline]
    pub(crate) fn new(kind: Kind, snapshot: Snapshot) -> Self {
        Self { kind, snapshot }
    }

    /// Returns the variant this checkpoint was taken from.
    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }
}

/// Logs a checkpoint that does not belong to the sequence it is restored on.
#[cold]
pub(crate) fn mismatched_checkpoint(expected: Kind, checkpoint: &Checkpoint) {
    tracing::warn!(
        ?expected,
        found = ?checkpoint.kind,
        "ignoring checkpoint taken from a different sequence"
    );
}

/// Uniform interface over every sequence variant.
///
/// The trait is sealed: the variant set is closed. Heterogeneous
/// collections of sequences use `Box<dyn Sequence<Item = T>>`, which
/// implements the trait by forwarding.
///
/// # Lifecycle
///
/// - Before the first [`advance`](Sequence::advance), [`current`](Sequence::current)
///   is `None`.
/// - Each successful advance exposes exactly one element.
/// - After exhaustion `current` is `None` and further advances return
///   `false` without side effects.
/// - Combinators take their inner sequences by value; dropping the outer
///   sequence drops the inners.
///
/// # Example
///
/// ```
/// use nexus_seq::{ArraySeq, Sequence};
///
/// let mut data = [1, 2, 3, 4, 5, 6];
/// let mut evens = ArraySeq::new(&mut data)
///     .filter(|x| x % 2 == 0)
///     .map(|x| x * 10);
///
/// assert_eq!(evens.materialize(), vec![20, 40, 60]);
///
/// assert!(evens.advance());
/// assert_eq!(evens.current(), Some(&20));
/// ```
pub trait Sequence: sealed::Sealed {
    /// Element type produced by the sequence.
    type Item: ?Sized;

    /// Returns the variant tag.
    fn kind(&self) -> Kind;

    /// Moves to the next element.
    ///
    /// Returns `true` if an element is now available through
    /// [`current`](Sequence::current). The first call after construction
    /// produces the first element.
    fn advance(&mut self) -> bool;

    /// Returns the current element without advancing.
    fn current(&self) -> Option<&Self::Item>;

    /// Returns to the state before the first element, without producing one.
    fn rewind(&mut self);

    /// Returns the structural identity of this sequence.
    fn identity(&self) -> Identity;

    /// Captures the traversal position.
    fn checkpoint(&self) -> Checkpoint;

    /// Restores a position captured by [`checkpoint`](Sequence::checkpoint).
    ///
    /// A checkpoint taken from a different variant is ignored.
    fn restore(&mut self, checkpoint: Checkpoint);

    /// Returns `true` if an element is currently available.
    #[inline]
    fn is_live(&self) -> bool {
        self.current().is_some()
    }

    /// Returns `true` if both sequences have the same structural identity.
    #[inline]
    fn identity_eq(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        self.identity() == other.identity()
    }

    /// Drops the sequence and every sequence it owns.
    #[inline]
    fn release(self)
    where
        Self: Sized,
    {
        drop(self);
    }

    /// Advances `n` times.
    ///
    /// Returns `false` as soon as an advance reports exhaustion, leaving
    /// the sequence where it stopped.
    fn advance_by(&mut self, n: usize) -> bool {
        for _ in 0..n {
            if !self.advance() {
                return false;
            }
        }
        true
    }

    /// Rewinds and produces the first element.
    ///
    /// Returns `true` if the sequence is non-empty, in which case
    /// [`current`](Sequence::current) is valid right away.
    fn reset(&mut self) -> bool {
        self.rewind();
        self.advance()
    }

    /// Collects owned copies of the remaining elements.
    ///
    /// The traversal position is restored afterwards.
    fn materialize(&mut self) -> Vec<<Self::Item as ToOwned>::Owned>
    where
        Self: Sized,
        Self::Item: ToOwned,
    {
        let checkpoint = self.checkpoint();
        let items = self.drain().collect();
        self.restore(checkpoint);
        items
    }

    /// Returns an [`Iterator`] over owned copies of the remaining elements.
    #[inline]
    fn drain(&mut self) -> Drain<'_, Self>
    where
        Self: Sized,
        Self::Item: ToOwned,
    {
        Drain { seq: self }
    }

    /// Advances to exhaustion, returning how many elements were produced.
    fn count_remaining(&mut self) -> usize
    where
        Self: Sized,
    {
        let mut count = 0;
        while self.advance() {
            count += 1;
        }
        count
    }

    /// Calls `action` on every remaining element.
    fn for_each<F>(&mut self, mut action: F)
    where
        Self: Sized,
        F: FnMut(&Self::Item),
    {
        while self.advance() {
            if let Some(item) = self.current() {
                action(item);
            }
        }
    }

    /// Advances until `compare(item, value)` reports [`Ordering::Equal`].
    ///
    /// Returns the matching element and leaves the sequence positioned on
    /// it, or returns `None` once exhausted.
    fn find<Q, F>(&mut self, value: &Q, mut compare: F) -> Option<&Self::Item>
    where
        Self: Sized,
        Q: ?Sized,
        F: FnMut(&Self::Item, &Q) -> Ordering,
    {
        loop {
            if !self.advance() {
                return None;
            }
            if self
                .current()
                .is_some_and(|item| compare(item, value).is_eq())
            {
                break;
            }
        }
        self.current()
    }

    /// Returns `true` if any remaining element satisfies `predicate`.
    ///
    /// Stops at the first match.
    fn any<P>(&mut self, mut predicate: P) -> bool
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        while self.advance() {
            if self.current().is_some_and(&mut predicate) {
                return true;
            }
        }
        false
    }

    /// Returns `true` if every remaining element satisfies `predicate`.
    ///
    /// Stops at the first violation. An exhausted sequence returns `true`.
    fn all<P>(&mut self, mut predicate: P) -> bool
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        while self.advance() {
            if self.current().is_some_and(|item| !predicate(item)) {
                return false;
            }
        }
        true
    }

    /// Wraps this sequence in a [`Filter`].
    #[inline]
    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        Filter::new(self, predicate)
    }

    /// Wraps this sequence in a [`Map`].
    #[inline]
    fn map<U, F>(self, transform: F) -> Map<Self, F, U>
    where
        Self: Sized,
        F: FnMut(&Self::Item) -> U,
    {
        Map::new(self, transform)
    }
}

impl<S: Sequence + ?Sized> sealed::Sealed for Box<S> {}

impl<S: Sequence + ?Sized> Sequence for Box<S> {
    type Item = S::Item;

    #[inline]
    fn kind(&self) -> Kind {
        (**self).kind()
    }

    #[inline]
    fn advance(&mut self) -> bool {
        (**self).advance()
    }

    #[inline]
    fn current(&self) -> Option<&Self::Item> {
        (**self).current()
    }

    #[inline]
    fn rewind(&mut self) {
        (**self).rewind();
    }

    #[inline]
    fn identity(&self) -> Identity {
        (**self).identity()
    }

    #[inline]
    fn checkpoint(&self) -> Checkpoint {
        (**self).checkpoint()
    }

    #[inline]
    fn restore(&mut self, checkpoint: Checkpoint) {
        (**self).restore(checkpoint);
    }

    #[inline]
    fn is_live(&self) -> bool {
        (**self).is_live()
    }
}

/// Iterator over owned copies of a sequence's remaining elements.
///
/// Created by [`Sequence::drain`]. Each call to `next` advances the
/// underlying sequence.
pub struct Drain<'a, S: Sequence + ?Sized> {
    seq: &'a mut S,
}

impl<S> Iterator for Drain<'_, S>
where
    S: Sequence + ?Sized,
    S::Item: ToOwned,
{
    type Item = <S::Item as ToOwned>::Owned;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.seq.advance() {
            self.seq.current().map(ToOwned::to_owned)
        } else {
            None
        }
    }
}
