use std::fmt::{self, Debug, Display, Formatter};
use std::slice::Iter;

use crate::collections::contiguous::Vector;
use crate::util::error::{InvalidArity, TryReserveError, Underflow};
use crate::util::result::ResultExtension;

const DEFAULT_ARITY: usize = 2;

/// A min-heap where every node has up to `k` children, stored in level order in a [`Vector`].
///
/// The element at index `i` has its parent at `(i - 1) / k` and its children at `k * i + 1` to
/// `k * i + k`. After every method returns, no element is smaller than its parent, so the minimum
/// is always at index 0. The arity `k` is chosen at construction and never changes.
///
/// A larger arity makes the tree shallower, which speeds up [`insert`](KAryHeap::insert) at the
/// cost of comparing more children during [`remove_min`](KAryHeap::remove_min).
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the KAryHeap.
/// - `k`: The arity of the KAryHeap.
///
/// | Method | Complexity |
/// |-|-|
/// | `get_min` | `O(1)` |
/// | `len` | `O(1)` |
/// | `insert` | `O(log_k n)`*, `O(n)` |
/// | `remove_min` | `O(k log_k n)` |
/// | `from_vector` | `O(n)` |
/// | `into_sorted_vector` | `O(n k log_k n)` |
///
/// \* If the underlying Vector has to grow, `insert` will take `O(n)`.
///
/// # Examples
/// ```
/// # use kary_collections::collections::heap::KAryHeap;
/// let mut heap = KAryHeap::with_arity(3);
/// for i in [9, 1, 4, 2, 8] {
///     heap.insert(i);
/// }
/// assert_eq!(*heap.get_min(), 1);
/// assert_eq!(&*heap.into_sorted_vector(), &[1, 2, 4, 8, 9]);
/// ```
pub struct KAryHeap<T: Ord> {
    pub(crate) data: Vector<T>,
    pub(crate) arity: usize,
}

impl<T: Ord> KAryHeap<T> {
    /// Creates a new, empty binary heap (arity 2).
    ///
    /// # Examples
    /// ```
    /// # use kary_collections::collections::heap::KAryHeap;
    /// let heap: KAryHeap<u8> = KAryHeap::new();
    /// assert!(heap.is_empty());
    /// assert_eq!(heap.arity(), 2);
    /// ```
    pub fn new() -> KAryHeap<T> {
        Self::with_arity(DEFAULT_ARITY)
    }

    /// Creates a new, empty heap where each node has up to `arity` children.
    ///
    /// # Panics
    /// Panics with [`InvalidArity`] if `arity` is less than 2.
    pub fn with_arity(arity: usize) -> KAryHeap<T> {
        Self::from_vector_with_arity(Vector::new(), arity)
    }

    /// Creates a binary heap from the contents of `vec`, arranging them in `O(n)`.
    pub fn from_vector(vec: Vector<T>) -> KAryHeap<T> {
        Self::from_vector_with_arity(vec, DEFAULT_ARITY)
    }

    /// Creates a heap with the provided arity from the contents of `vec`, arranging them in
    /// `O(n)` by sifting down every node with children, starting from the last.
    ///
    /// # Panics
    /// Panics with [`InvalidArity`] if `arity` is less than 2.
    ///
    /// # Examples
    /// ```
    /// # use kary_collections::collections::contiguous::Vector;
    /// # use kary_collections::collections::heap::KAryHeap;
    /// let heap = KAryHeap::from_vector_with_arity(Vector::from([5, 3, 8, 1]), 4);
    /// assert_eq!(*heap.get_min(), 1);
    /// ```
    pub fn from_vector_with_arity(vec: Vector<T>, arity: usize) -> KAryHeap<T> {
        if arity < 2 {
            Err(InvalidArity { arity }).throw()
        }

        let mut heap = KAryHeap {
            data: vec,
            arity,
        };

        if heap.data.len() > 1 {
            let last_parent = heap.parent(heap.data.len() - 1);
            for index in (0..=last_parent).rev() {
                heap.sift_down(index);
            }
        }

        heap
    }

    /// Returns the arity of the heap, the maximum number of children of each node.
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// Returns the number of elements in the heap.
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the heap contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Inserts `value` into the heap, moving it towards the root until its parent is no larger.
    ///
    /// # Panics
    /// Panics if the memory layout of the underlying Vector would have a size that exceeds
    /// [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use kary_collections::collections::heap::KAryHeap;
    /// let mut heap = KAryHeap::new();
    /// heap.insert(10);
    /// heap.insert(5);
    /// heap.insert(15);
    /// assert_eq!(*heap.get_min(), 5);
    /// ```
    pub fn insert(&mut self, value: T) {
        self.data.push_back(value);
        self.sift_up(self.data.len() - 1);
    }

    /// Inserts `value` into the heap, returning an error instead of panicking or aborting if the
    /// underlying Vector can't grow. On error the heap is unchanged.
    ///
    /// # Errors
    /// Returns [`TryReserveError`] if more memory is needed and can't be allocated.
    pub fn try_insert(&mut self, value: T) -> Result<(), TryReserveError> {
        self.data.try_push_back(value)?;
        self.sift_up(self.data.len() - 1);
        Ok(())
    }

    /// Ensures that the heap has capacity for at least `extra` more elements, so that the next
    /// `extra` insertions won't reallocate.
    ///
    /// # Panics
    /// Panics if the memory layout of the underlying Vector would have a size that exceeds
    /// [`isize::MAX`].
    pub fn reserve(&mut self, extra: usize) {
        self.data.reserve(extra);
    }

    /// Ensures that the heap has capacity for at least `extra` more elements. On error the heap
    /// is unchanged.
    ///
    /// # Errors
    /// Returns [`TryReserveError`] if the new capacity overflows or can't be allocated.
    pub fn try_reserve(&mut self, extra: usize) -> Result<(), TryReserveError> {
        self.data.try_reserve(extra)
    }

    /// Returns a reference to the smallest element in the heap.
    ///
    /// # Panics
    /// Panics with [`Underflow`] if the heap is empty.
    pub fn get_min(&self) -> &T {
        self.try_get_min().throw()
    }

    /// Returns a reference to the smallest element in the heap.
    ///
    /// # Errors
    /// Returns [`Underflow`] if the heap is empty.
    pub fn try_get_min(&self) -> Result<&T, Underflow> {
        self.data.first().ok_or(Underflow)
    }

    /// Returns a reference to the smallest element in the heap, or [`None`] if it is empty.
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Removes and returns the smallest element in the heap.
    ///
    /// # Panics
    /// Panics with [`Underflow`] if the heap is empty.
    ///
    /// # Examples
    /// ```
    /// # use kary_collections::collections::heap::KAryHeap;
    /// let mut heap: KAryHeap<_> = [20, 15, 30, 5, 10].into_iter().collect();
    /// assert_eq!(heap.remove_min(), 5);
    /// assert_eq!(*heap.get_min(), 10);
    /// ```
    pub fn remove_min(&mut self) -> T {
        self.try_remove_min().throw()
    }

    /// Removes and returns the smallest element in the heap. The last element takes the place of
    /// the root and is then moved towards the leaves until none of its children are smaller.
    ///
    /// # Errors
    /// Returns [`Underflow`] if the heap is empty.
    pub fn try_remove_min(&mut self) -> Result<T, Underflow> {
        let last = self.data.try_pop_back()?;

        if self.data.is_empty() {
            return Ok(last);
        }

        let min = self.data.replace(0, last);
        self.sift_down(0);
        Ok(min)
    }

    /// Removes every element from the heap, keeping the capacity of the underlying Vector.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Returns the elements of the heap in level order, with the minimum first.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns an iterator over the elements of the heap in level order, which isn't sorted.
    pub fn iter(&self) -> Iter<'_, T> {
        self.data.iter()
    }

    /// Consumes the heap, returning the underlying Vector in level order.
    pub fn into_vector(self) -> Vector<T> {
        self.data
    }

    /// Consumes the heap, returning its elements in non-decreasing order.
    pub fn into_sorted_vector(mut self) -> Vector<T> {
        let mut sorted = Vector::with_cap(self.len());

        while let Ok(min) = self.try_remove_min() {
            // SAFETY: sorted has capacity for every element that was in the heap.
            unsafe { sorted.push_unchecked(min); }
        }

        sorted
    }

    pub(crate) const fn parent(&self, index: usize) -> usize {
        (index - 1) / self.arity
    }

    pub(crate) const fn first_child(&self, index: usize) -> usize {
        self.arity.saturating_mul(index).saturating_add(1)
    }

    /// Moves the element at `index` towards the root while it is strictly smaller than its
    /// parent.
    pub(crate) fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = self.parent(index);

            if self.data[index] >= self.data[parent] {
                break;
            }

            self.data.swap(index, parent);
            index = parent;
        }
    }

    /// Moves the element at `index` towards the leaves, swapping it with its smallest child while
    /// that child is strictly smaller. Ties between children go to the lowest index.
    pub(crate) fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();

        loop {
            let first = self.first_child(index);
            if first >= len {
                break;
            }

            let end = first.saturating_add(self.arity).min(len);
            let mut min = first;
            for child in first + 1..end {
                if self.data[child] < self.data[min] {
                    min = child;
                }
            }

            if self.data[min] >= self.data[index] {
                break;
            }

            self.data.swap(index, min);
            index = min;
        }
    }
}

impl<T: Ord> Default for KAryHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Extend<T> for KAryHeap<T> {
    fn extend<A: IntoIterator<Item = T>>(&mut self, iter: A) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: Ord> FromIterator<T> for KAryHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vector(iter.into_iter().collect())
    }
}

impl<T: Ord> From<Vector<T>> for KAryHeap<T> {
    fn from(value: Vector<T>) -> Self {
        Self::from_vector(value)
    }
}

impl<T: Ord + Clone> KAryHeap<T> {
    /// Creates an independent copy of the heap with the same arity, returning an error if the
    /// memory for it can't be provided.
    ///
    /// # Errors
    /// Returns [`TryReserveError`] if the allocation for the copy fails.
    ///
    /// # Examples
    /// ```
    /// # use kary_collections::collections::heap::KAryHeap;
    /// let heap: KAryHeap<_> = [3, 1, 2].into_iter().collect();
    /// let copy = heap.try_clone().unwrap();
    /// assert_eq!(copy.as_slice(), heap.as_slice());
    /// ```
    pub fn try_clone(&self) -> Result<KAryHeap<T>, TryReserveError> {
        Ok(KAryHeap {
            data: self.data.try_clone()?,
            arity: self.arity,
        })
    }
}

impl<T: Ord + Clone> Clone for KAryHeap<T> {
    fn clone(&self) -> Self {
        KAryHeap {
            data: self.data.clone(),
            arity: self.arity,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.data.clone_from(&source.data);
        self.arity = source.arity;
    }
}

impl<T: Ord + Debug> Debug for KAryHeap<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("KAryHeap")
            .field("contents", &&*self.data)
            .field("arity", &self.arity)
            .finish()
    }
}

impl<T: Ord + Debug> Display for KAryHeap<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
