//! Introspective sort over an array sequence's indirection table.
//!
//! Quicksort (Lomuto partition, last element as pivot) with two escape
//! hatches:
//!
//! ```text
//! range len < threshold      -> insertion sort on that range
//! depth budget spent         -> heapsort on that range   (O(n log n) bound)
//! otherwise                  -> partition, recurse on both sides
//! ```
//!
//! Only table entries move. Element payloads stay where the caller put
//! them, so the result is always a permutation of the input even when the
//! comparator is not a total order.

use core::cmp::Ordering;

use crate::ArraySeq;

/// Ranges shorter than this are insertion sorted.
pub const DEFAULT_INSERTION_THRESHOLD: usize = 16;

/// Depth budget is `depth_factor * floor(log2(n))`.
pub const DEFAULT_DEPTH_FACTOR: usize = 2;

/// Tuning for [`sort_with`].
///
/// # Example
///
/// ```
/// use nexus_seq::{ArraySeq, SortConfig, sort_with};
///
/// let mut data: Vec<u32> = (0..64).rev().collect();
/// let mut seq = ArraySeq::new(&mut data);
///
/// let config = SortConfig::default().insertion_threshold(8).depth_factor(1);
/// let stats = sort_with(&mut seq, &config, |a, b| a.cmp(b));
///
/// assert!(seq.iter().is_sorted());
/// assert!(stats.partitions > 0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortConfig {
    insertion_threshold: usize,
    depth_factor: usize,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            insertion_threshold: DEFAULT_INSERTION_THRESHOLD,
            depth_factor: DEFAULT_DEPTH_FACTOR,
        }
    }
}

impl SortConfig {
    /// Ranges with fewer elements than this are insertion sorted. Default: 16.
    pub fn insertion_threshold(mut self, len: usize) -> Self {
        self.insertion_threshold = len;
        self
    }

    /// Multiplier on `floor(log2(n))` for the quicksort depth budget.
    /// Default: 2. Zero sends every range at or above the threshold
    /// straight to heapsort.
    pub fn depth_factor(mut self, factor: usize) -> Self {
        self.depth_factor = factor;
        self
    }

    /// Returns the insertion sort threshold.
    #[inline]
    pub fn threshold(&self) -> usize {
        self.insertion_threshold
    }

    /// Returns the depth budget for `len` elements.
    #[inline]
    pub fn depth_budget(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.depth_factor.saturating_mul(len.ilog2() as usize)
    }
}

/// Counters describing one sort run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortStats {
    /// Quicksort partition passes.
    pub partitions: usize,
    /// Ranges finished by insertion sort.
    pub insertion_runs: usize,
    /// Ranges finished by heapsort after the depth budget ran out.
    pub heapsort_fallbacks: usize,
}

/// Sorts an array sequence in place with the default configuration.
///
/// `compare` must be a total order for the output to be ordered; any
/// comparator still yields a permutation. Sequences with fewer than two
/// elements are left untouched. Otherwise the cursor is placed on the
/// first (smallest) element afterwards.
///
/// # Example
///
/// ```
/// use nexus_seq::{ArraySeq, Sequence, sort};
///
/// let mut data = [10, 20, 30, 40, 25, 15, 5];
/// let mut seq = ArraySeq::new(&mut data);
/// sort(&mut seq, |a, b| a.cmp(b));
///
/// assert_eq!(seq.current(), Some(&5));
/// assert_eq!(seq.materialize(), vec![10, 15, 20, 25, 30, 40]);
///
/// // Storage itself is not reordered.
/// assert_eq!(seq.storage(), &[10, 20, 30, 40, 25, 15, 5]);
/// ```
pub fn sort<T, F>(seq: &mut ArraySeq<'_, T>, compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    sort_with(seq, &SortConfig::default(), compare);
}

/// Sorts an array sequence in place, returning what the sort did.
pub fn sort_with<T, F>(
    seq: &mut ArraySeq<'_, T>,
    config: &SortConfig,
    mut compare: F,
) -> SortStats
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut stats = SortStats::default();
    let len = seq.len();
    if len <= 1 {
        return stats;
    }

    let budget = config.depth_budget(len);
    {
        let (storage, table) = seq.parts_mut();
        let mut introsort = Introsort {
            storage,
            table,
            compare: &mut compare,
            threshold: config.insertion_threshold,
            stats: &mut stats,
        };
        introsort.sort_range(0, len - 1, budget);
    }
    seq.seek_first();

    tracing::debug!(
        len,
        budget,
        partitions = stats.partitions,
        insertion_runs = stats.insertion_runs,
        heapsort_fallbacks = stats.heapsort_fallbacks,
        "sorted array sequence"
    );
    stats
}

struct Introsort<'s, T, F> {
    storage: &'s [T],
    table: &'s mut [usize],
    compare: &'s mut F,
    threshold: usize,
    stats: &'s mut SortStats,
}

impl<T, F> Introsort<'_, T, F>
where
    F: FnMut(&T, &T) -> Ordering,
{
    /// Compares the elements behind two storage indices.
    #[inline]
    fn cmp_idx(&mut self, a: usize, b: usize) -> Ordering {
        (self.compare)(&self.storage[a], &self.storage[b])
    }

    /// Compares the elements at two table slots.
    #[inline]
    fn cmp_slots(&mut self, a: usize, b: usize) -> Ordering {
        self.cmp_idx(self.table[a], self.table[b])
    }

    /// Sorts table slots `lo..=hi`.
    fn sort_range(&mut self, lo: usize, hi: usize, depth: usize) {
        let len = hi - lo + 1;

        if len < self.threshold {
            self.stats.insertion_runs += 1;
            self.insertion_sort(lo, hi);
            return;
        }

        if depth == 0 {
            tracing::trace!(lo, hi, "depth budget spent, falling back to heapsort");
            self.stats.heapsort_fallbacks += 1;
            self.heap_sort(lo, hi);
            return;
        }

        let pivot = self.partition(lo, hi);
        if pivot > lo + 1 {
            self.sort_range(lo, pivot - 1, depth - 1);
        }
        if pivot + 1 < hi {
            self.sort_range(pivot + 1, hi, depth - 1);
        }
    }

    fn insertion_sort(&mut self, lo: usize, hi: usize) {
        for i in lo + 1..=hi {
            let mut j = i;
            while j > lo && self.cmp_slots(j - 1, j).is_gt() {
                self.table.swap(j, j - 1);
                j -= 1;
            }
        }
    }

    /// Lomuto partition of `lo..=hi` around the element at `hi`.
    ///
    /// Returns the pivot's final slot.
    fn partition(&mut self, lo: usize, hi: usize) -> usize {
        self.stats.partitions += 1;

        let pivot = self.table[hi];
        let mut store = lo;
        for j in lo..hi {
            if self.cmp_idx(self.table[j], pivot).is_le() {
                self.table.swap(store, j);
                store += 1;
            }
        }
        self.table.swap(store, hi);
        store
    }

    /// Heapsort of `lo..=hi` using a max-heap rooted at `lo`.
    fn heap_sort(&mut self, lo: usize, hi: usize) {
        let len = hi - lo + 1;

        for root in (0..len / 2).rev() {
            self.sift_down(lo, root, len);
        }

        for end in (1..len).rev() {
            self.table.swap(lo, lo + end);
            self.sift_down(lo, 0, end);
        }
    }

    /// Restores the max-heap property below `pos` in a heap of `len` slots
    /// starting at table slot `base`.
    fn sift_down(&mut self, base: usize, pos: usize, len: usize) {
        let idx = self.table[base + pos];
        let mut hole = pos;

        // Phase 1: Descend to leaf, always following the larger child
        loop {
            let left = 2 * hole + 1;
            if left >= len {
                break;
            }

            let right = left + 1;
            let larger = if right < len && self.cmp_slots(base + right, base + left).is_gt()
            {
                right
            } else {
                left
            };

            self.table[base + hole] = self.table[base + larger];
            hole = larger;
        }

        // Phase 2: Sift up from leaf position
        while hole > pos {
            let parent = (hole - 1) / 2;
            let parent_idx = self.table[base + parent];
            if self.cmp_idx(idx, parent_idx).is_gt() {
                self.table[base + hole] = parent_idx;
                hole = parent;
            } else {
                break;
            }
        }

        // Place element in final position
        self.table[base + hole] = idx;
    }
}
