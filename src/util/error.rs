//! Error types shared by the collections in this crate.
//!
//! Contract violations (such as indexing out of bounds or popping an empty collection) are
//! reported by panicking with one of these errors, while fallible allocation is reported by
//! returning a [`TryReserveError`] from the `try_*` family of methods.

use std::alloc::Layout;

use derive_more::{Display, Error, From, IsVariant, TryInto};

/// An index was outside of the initialized range of a collection.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("Index {index} out of bounds for collection with {len} elements!")]
pub struct IndexOutOfBounds {
    /// The offending index.
    pub index: usize,
    /// The length of the collection at the time of access.
    pub len: usize,
}

/// An element was requested from or removed from an empty collection.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("Attempted to access or remove an element of an empty collection!")]
pub struct Underflow;

/// A heap was constructed with a branching factor that can't form a tree.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("A heap requires an arity of at least 2, got {arity}!")]
pub struct InvalidArity {
    /// The rejected arity.
    pub arity: usize,
}

/// The requested capacity would produce an allocation larger than [`isize::MAX`] bytes.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("Capacity overflow!")]
pub struct CapacityOverflow;

/// The global allocator was unable to provide memory for the requested layout.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("Failed to allocate memory for layout {layout:?}!")]
pub struct AllocationFailure {
    /// The layout which couldn't be allocated.
    pub layout: Layout,
}

/// The reason that a request for more memory failed. Whenever this is returned, the collection it
/// was returned from is left exactly as it was before the call.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq, From, TryInto, IsVariant)]
pub enum TryReserveError {
    /// See [`CapacityOverflow`].
    CapacityOverflow(CapacityOverflow),
    /// See [`AllocationFailure`].
    AllocationFailure(AllocationFailure),
}
