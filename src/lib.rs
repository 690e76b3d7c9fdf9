//! A growable vector and a k-ary heap, written from scratch on top of the global allocator.
//!
//! # Purpose
//! This crate implements a couple of classic generic data structures as a learning exercise:
//! [`Vector`](collections::contiguous::Vector), a dynamic array with amortized `O(1)` pushes, and
//! [`KAryHeap`](collections::heap::KAryHeap), a min-heap with a configurable number of children
//! per node that stores its tree in a Vector.
//!
//! # Method
//! Neither type uses [`Vec`] internally. Memory is requested directly from the global allocator
//! through [`Array`](collections::contiguous::Array), an owned buffer that is sized at runtime and
//! forms the storage of a Vector. A Vector owns its buffer exclusively: cloning one copies every
//! element into a new buffer, and `clone_from` builds that copy completely before swapping it in.
//!
//! # Error Handling
//! Misusing a collection, such as indexing out of bounds or removing from an empty one, is a bug in
//! the caller, so it panics with a typed error from [`error`] rather than returning a default
//! value. Running out of memory isn't a bug though, so each method that may allocate has a `try_*`
//! counterpart that returns a [`TryReserveError`](error::TryReserveError) and leaves the collection
//! unchanged. The infallible methods call [`handle_alloc_error`](std::alloc::handle_alloc_error)
//! instead, the same as the collections in [`std`].
//!
//! When this crate employs errors via [`Result`]s, it does so in a method that is strongly typed,
//! using enums for static dispatch rather than dynamic, with structs (often ZSTs) that implement
//! [`Error`](std::error::Error).
//!
//! # Features
//! - `contiguous`: [`Array`](collections::contiguous::Array) and
//!   [`Vector`](collections::contiguous::Vector).
//! - `heap`: [`KAryHeap`](collections::heap::KAryHeap), which requires `contiguous`.
//! - `collections-all` (default): all of the above.

// #![warn(missing_docs)]
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

#[cfg(feature = "collections")]
pub mod collections;

pub(crate) mod util;

pub use util::error;
