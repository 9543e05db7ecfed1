//! Array sequence: traversal over caller-owned contiguous storage.
//!
//! The sequence never copies element payloads. It keeps an indirection
//! table of slot indices into the borrowed storage, and reordering (e.g.
//! [`sort`](crate::sort)) permutes the table rather than the elements:
//!
//! ```text
//! storage:  [ 30 | 10 | 20 ]      physical order, untouched
//! table:    [  1 |  2 |  0 ]      traversal order after sorting
//! yields:     10   20   30
//! ```

use core::mem;

use crate::position::Position;
use crate::seq::{Checkpoint, Identity, Kind, Snapshot, mismatched_checkpoint, sealed};
use crate::Sequence;

/// Sequence over a borrowed slice, traversed through an indirection table.
///
/// Writes through [`current_mut`](ArraySeq::current_mut) land in the
/// caller's storage.
///
/// # Example
///
/// ```
/// use nexus_seq::{ArraySeq, Sequence};
///
/// let mut data = [1, 2, 3];
/// let mut seq = ArraySeq::new(&mut data);
///
/// while seq.advance() {
///     *seq.current_mut().unwrap() *= 2;
/// }
/// drop(seq);
///
/// assert_eq!(data, [2, 4, 6]);
/// ```
pub struct ArraySeq<'a, T> {
    storage: &'a mut [T],
    /// Slot indices into `storage`, in traversal order.
    table: Vec<usize>,
    position: Position,
}

impl<'a, T> ArraySeq<'a, T> {
    /// Creates a sequence over `storage`, in storage order.
    pub fn new(storage: &'a mut [T]) -> Self {
        let table = (0..storage.len()).collect();
        Self {
            storage,
            table,
            position: Position::Before,
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the sequence has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the byte stride between elements in storage.
    #[inline]
    pub const fn element_size(&self) -> usize {
        mem::size_of::<T>()
    }

    /// Returns the cursor position.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns a mutable reference to the current element.
    ///
    /// The write goes straight to the caller's storage.
    #[inline]
    pub fn current_mut(&mut self) -> Option<&mut T> {
        let slot = self.position.slot()?;
        Some(&mut self.storage[self.table[slot]])
    }

    /// Returns the element at `slot` in traversal order.
    #[inline]
    pub fn get(&self, slot: usize) -> Option<&T> {
        self.table.get(slot).map(|&idx| &self.storage[idx])
    }

    /// Returns the indirection table: storage indices in traversal order.
    #[inline]
    pub fn slots(&self) -> &[usize] {
        &self.table
    }

    /// Returns the underlying storage in physical order.
    #[inline]
    pub fn storage(&self) -> &[T] {
        &*self.storage
    }

    /// Returns an iterator over all elements in traversal order.
    ///
    /// Independent of the cursor.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.table.iter().map(|&idx| &self.storage[idx])
    }

    /// Splits into the storage and the table for in-place reordering.
    #[inline]
    pub(crate) fn parts_mut(&mut self) -> (&[T], &mut [usize]) {
        (&*self.storage, self.table.as_mut_slice())
    }

    /// Positions the cursor on the first slot, if any.
    #[inline]
    pub(crate) fn seek_first(&mut self) {
        self.position = Position::Before.step(self.table.len());
    }
}

/// Creates an array sequence over string slices.
///
/// # Example
///
/// ```
/// use nexus_seq::{Sequence, strings};
///
/// let mut names = ["ada", "grace", "barbara"];
/// let mut seq = strings(&mut names);
///
/// assert_eq!(seq.find("grace", |a, b| (*a).cmp(b)), Some(&"grace"));
/// ```
pub fn strings<'a, 's>(items: &'a mut [&'s str]) -> ArraySeq<'a, &'s str> {
    ArraySeq::new(items)
}

impl<T> sealed::Sealed for ArraySeq<'_, T> {}

impl<T> Sequence for ArraySeq<'_, T> {
    type Item = T;

    #[inline]
    fn kind(&self) -> Kind {
        Kind::Array
    }

    #[inline]
    fn advance(&mut self) -> bool {
        self.position = self.position.step(self.table.len());
        !self.position.is_done()
    }

    #[inline]
    fn current(&self) -> Option<&T> {
        let slot = self.position.slot()?;
        Some(&self.storage[self.table[slot]])
    }

    #[inline]
    fn rewind(&mut self) {
        self.position = Position::Before;
    }

    fn identity(&self) -> Identity {
        Identity::Array {
            storage: self.storage.as_ptr().cast(),
            position: self.position,
        }
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint::new(Kind::Array, Snapshot::Array(self.position))
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        match checkpoint.snapshot {
            // A slot past the table end came from a longer array.
            Snapshot::Array(position)
                if checkpoint.kind == Kind::Array
                    && position.slot().is_none_or(|slot| slot < self.table.len()) =>
            {
                self.position = position;
            }
            _ => mismatched_checkpoint(Kind::Array, &checkpoint),
        }
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for ArraySeq<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ArraySeq")
            .field("position", &self.position)
            .field("elements", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}
