//! Uniform sequences over caller storage, with an in-place introsort.
//!
//! This crate provides one cursor-style interface, [`Sequence`], over a
//! small closed set of variants. The key idea: separate traversal order from
//! storage.
//!
//! ```text
//! &mut [T]      - owned by the caller, never reallocated or moved
//! ArraySeq      - borrows it, traverses an indirection table of slots
//! Filter / Map  - own one inner sequence, adapt its output lazily
//! Zip           - owns N inner sequences, advances them in lockstep
//! ```
//!
//! Benefits:
//! - **No payload copies**: sorting permutes `usize` slots, not elements
//! - **In-place writes**: [`ArraySeq::current_mut`] writes caller storage
//! - **Readable current element**: the element stays available until the
//!   next advance, so combinators inspect it without taking it
//! - **Ownership cascade**: combinators own their inners; dropping the
//!   outermost sequence releases the whole tree
//!
//! # Quick Start
//!
//! ```
//! use nexus_seq::{ArraySeq, Sequence};
//!
//! let mut data = [1, 2, 3, 4, 5, 6];
//! let mut seq = ArraySeq::new(&mut data)
//!     .filter(|x| x % 2 == 0)
//!     .map(|x| x * x);
//!
//! while seq.advance() {
//!     println!("{}", seq.current().unwrap());
//! }
//! ```
//!
//! # Sorting
//!
//! ```
//! use nexus_seq::{ArraySeq, Sequence, sort};
//!
//! let mut prices = [101.5f64, 99.25, 100.0];
//! let mut seq = ArraySeq::new(&mut prices);
//!
//! sort(&mut seq, |a, b| a.total_cmp(b));
//!
//! // Cursor is on the smallest element right after sorting.
//! assert_eq!(seq.current(), Some(&99.25));
//! ```
//!
//! # Lifecycle
//!
//! | State | `current()` | `advance()` |
//! |-------|-------------|-------------|
//! | Constructed | `None` | produces the first element |
//! | Positioned | `Some` | moves to the next element |
//! | Exhausted | `None` | `false`, no side effects |
//!
//! [`Sequence::reset`] returns any state to "positioned on the first
//! element".
//!
//! # Variants
//!
//! | Variant | Item | Notes |
//! |---------|------|-------|
//! | [`ArraySeq`] | `T` | Caller slice, mutable, sortable |
//! | [`Range`] | `i64` | Arithmetic progression, signed step |
//! | [`Filter`] | inner item | Skips non-matching elements |
//! | [`Map`] | `U` | Owns each transformed value |
//! | [`Zip`] | `[T]` | One clone per inner, reused buffer |
//!
//! # Failure
//!
//! Constructors never panic. Invalid parameters (zero range step, empty
//! zip) produce an inert sequence that is already exhausted; the `try_*`
//! constructors report [`SeqError`] instead.
//!
//! # Threading
//!
//! Sequences are single-threaded, synchronous cursors. Nothing blocks or
//! yields.

#![warn(missing_docs)]

mod array;
mod error;
mod filter;
mod map;
mod position;
mod range;
mod seq;
mod sort;
mod zip;

pub use array::{ArraySeq, strings};
pub use error::SeqError;
pub use filter::Filter;
pub use map::Map;
pub use position::Position;
pub use range::Range;
pub use seq::{Checkpoint, Drain, Identity, Kind, Sequence};
pub use sort::{
    DEFAULT_DEPTH_FACTOR, DEFAULT_INSERTION_THRESHOLD, SortConfig, SortStats, sort, sort_with,
};
pub use zip::Zip;
