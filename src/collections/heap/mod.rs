//! A module containing [`KAryHeap`], a priority queue with a configurable number of children per
//! node, built on top of [`Vector`](crate::collections::contiguous::Vector).
//!
//! Owned iteration uses the [`IntoIter`] of the underlying Vector, and yields elements in level
//! order rather than sorted order. See [`KAryHeap::into_sorted_vector`] for sorted extraction.

mod iter;
mod k_ary_heap;
mod tests;

pub use iter::*;
pub use k_ary_heap::*;
