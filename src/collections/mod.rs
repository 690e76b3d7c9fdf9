//! Various general-purpose collection types.
//!
//! # Purpose
//! These types are written from scratch on top of the global allocator, to explore manual buffer
//! ownership, amortized growth and heap ordering.
//!
//! # Method
//! Applicable types here implement [`Deref<Target = [T]>`](std::ops::Deref) (and DerefMut), which
//! saves me from writing some of the more repetitive functionality.

#[cfg(feature = "contiguous")]
pub mod contiguous;
#[cfg(feature = "heap")]
pub mod heap;
