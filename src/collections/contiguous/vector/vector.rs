use std::borrow::{Borrow, BorrowMut};
use std::cmp;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::mem::{self, MaybeUninit};
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use crate::collections::contiguous::Array;
use crate::util::error::{CapacityOverflow, IndexOutOfBounds, TryReserveError, Underflow};
use crate::util::result::{ReserveResultExtension, ResultExtension};

pub(crate) const MIN_CAP: usize = 2;

const GROWTH_FACTOR: usize = 2;

/// A variable size contiguous collection, based on [`Array<T>`].
///
/// A new Vector starts with a capacity of 2 and doubles its capacity whenever a push would exceed
/// it, so that any sequence of pushes takes amortized `O(1)` per element. Elements are accessed by
/// index through [`Deref<Target = [T]>`](Deref), which also provides `iter`, `iter_mut` and
/// `contains`. Borrowed iterators hold a borrow of the Vector, so it can't reallocate underneath
/// them.
///
/// Accessing or removing an element of an empty Vector, or indexing out of bounds, is a bug in the
/// caller and panics. Running out of memory is reported by the `try_*` methods as a
/// [`TryReserveError`], leaving the Vector exactly as it was.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Vector.
///
/// | Method | Complexity |
/// |-|-|
/// | `get` | `O(1)` |
/// | `len` | `O(1)` |
/// | `push_back` | `O(1)`*, `O(n)` |
/// | `pop_back` | `O(1)` |
/// | `front` / `back` | `O(1)` |
/// | `replace` | `O(1)` |
/// | `reserve` | `O(n)`**, `O(1)` |
/// | `clear` | `O(n)` |
/// | `contains` | `O(n)` |
/// | `clone` | `O(n)` |
///
/// \* If the Vector doesn't have enough capacity for the new element, `push_back` will take `O(n)`.
///
/// \** If the Vector has enough capacity for the additional items already, `reserve` is `O(1)`.
pub struct Vector<T> {
    pub(crate) arr: Array<MaybeUninit<T>>,
    pub(crate) len: usize,
}

impl<T> Vector<T> {
    /// Creates a new, empty Vector with a capacity of 2.
    ///
    /// # Panics
    /// Aborts through [`handle_alloc_error`](std::alloc::handle_alloc_error) if the initial
    /// allocation fails.
    ///
    /// # Examples
    /// ```
    /// # use kary_collections::collections::contiguous::Vector;
    /// let vec: Vector<u8> = Vector::new();
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.cap(), 2);
    /// ```
    pub fn new() -> Vector<T> {
        Self::with_cap(MIN_CAP)
    }

    /// Creates a new, empty Vector with a capacity of 2, returning an error if the allocation
    /// fails.
    ///
    /// # Errors
    /// Returns [`TryReserveError::AllocationFailure`] if the allocator fails.
    ///
    /// # Examples
    /// ```
    /// # use kary_collections::collections::contiguous::Vector;
    /// let vec: Vector<u8> = Vector::try_new().unwrap();
    /// assert!(vec.is_empty());
    /// assert_eq!(vec.cap(), 2);
    /// ```
    pub fn try_new() -> Result<Vector<T>, TryReserveError> {
        Self::try_with_cap(MIN_CAP)
    }

    /// Creates a new Vector with capacity exactly equal to the provided value, allowing values to
    /// be added without reallocation.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use kary_collections::collections::contiguous::Vector;
    /// let mut vec: Vector<u8> = Vector::with_cap(5);
    /// assert_eq!(vec.cap(), 5);
    /// vec.extend([1_u8, 2, 3, 4, 5]);
    /// assert_eq!(vec.cap(), 5);
    /// ```
    pub fn with_cap(cap: usize) -> Vector<T> {
        Self::try_with_cap(cap).handle()
    }

    /// Creates a new Vector with capacity exactly equal to the provided value, returning an error
    /// if the memory can't be provided.
    ///
    /// # Errors
    /// Returns [`TryReserveError::CapacityOverflow`] if the memory layout size would exceed
    /// [`isize::MAX`], or [`TryReserveError::AllocationFailure`] if the allocator fails.
    pub fn try_with_cap(cap: usize) -> Result<Vector<T>, TryReserveError> {
        Ok(Vector {
            arr: Array::try_new_uninit(cap)?,
            len: 0,
        })
    }

    /// Returns the length of the Vector.
    ///
    /// # Examples
    /// ```
    /// # use kary_collections::collections::contiguous::Vector;
    /// let vec = Vector::from([1_u8, 2, 3]);
    /// assert_eq!(vec.len(), 3);
    /// ```
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the Vector contains no elements.
    ///
    /// # Examples
    /// ```
    /// # use kary_collections::collections::contiguous::Vector;
    /// let mut vec: Vector<u8> = Vector::new();
    /// assert!(vec.is_empty());
    /// vec.push_back(1);
    /// assert!(!vec.is_empty())
    /// ```
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current capacity of the Vector. Unlike [`Vec`], the capacity is guaranteed to be
    /// exactly the value provided to any of the various capacity manipulation functions, or the
    /// result of doubling it.
    ///
    /// # Examples
    /// ```
    /// # use kary_collections::collections::contiguous::Vector;
    /// let vec: Vector<u8> = Vector::with_cap(5);
    /// assert_eq!(vec.cap(), 5);
    /// ```
    pub const fn cap(&self) -> usize {
        self.arr.size()
    }

    /// Push the provided value onto the end of the Vector, doubling the capacity if required.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use kary_collections::collections::contiguous::Vector;
    /// let mut vec = Vector::<u8>::new();
    /// for i in 0..=5 {
    ///     vec.push_back(i);
    /// }
    /// assert_eq!(&*vec, &[0, 1, 2, 3, 4, 5]);
    /// assert_eq!(vec.cap(), 8);
    /// ```
    pub fn push_back(&mut self, value: T) {
        if self.len == self.cap() {
            self.grow();
        }
        // SAFETY: The capacity has just been adjusted to support the addition of the new item.
        unsafe { self.push_unchecked(value) }
    }

    /// Push the provided value onto the end of the Vector, returning an error instead of
    /// panicking or aborting if the Vector needs to grow and can't. When an error is returned,
    /// `value` is dropped and the Vector is unchanged.
    ///
    /// # Errors
    /// Returns [`TryReserveError`] if the Vector is full and can't be grown.
    pub fn try_push_back(&mut self, value: T) -> Result<(), TryReserveError> {
        if self.len == self.cap() {
            self.try_grow()?;
        }
        // SAFETY: The capacity has just been adjusted to support the addition of the new item.
        unsafe { self.push_unchecked(value) }
        Ok(())
    }

    /// Push the provided value onto the end of the Vector, assuming that there is enough capacity
    /// to do so.
    ///
    /// # Safety
    /// It is up to the caller to ensure that the Vector has enough capacity to add the provided
    /// value, using methods like [`reserve`](Vector::reserve) or [`with_cap`](Vector::with_cap) to
    /// do so. Using this method on a Vector without enough capacity is undefined behavior.
    pub unsafe fn push_unchecked(&mut self, value: T) {
        // SAFETY: It is up to the caller to ensure that the Vector has enough capacity for this
        // push, leading to the pointer write being in bounds of the object.
        unsafe { self.arr.ptr.add(self.len).write(MaybeUninit::new(value)); }
        self.len += 1;
    }

    /// Pops the last value off the end of the Vector, returning it. The capacity is never reduced.
    ///
    /// # Panics
    /// Panics with [`Underflow`] if the Vector is empty.
    ///
    /// # Examples
    /// ```
    /// # use kary_collections::collections::contiguous::Vector;
    /// let mut vec = Vector::from([10, 20]);
    /// assert_eq!(vec.pop_back(), 20);
    /// assert_eq!(vec.len(), 1);
    /// assert_eq!(*vec.back(), 10);
    /// ```
    pub fn pop_back(&mut self) -> T {
        self.try_pop_back().throw()
    }

    /// Pops the last value off the end of the Vector, returning an owned value if the Vector has
    /// length greater than 0.
    ///
    /// # Errors
    /// Returns [`Underflow`] if the Vector is empty.
    ///
    /// # Examples
    /// ```
    /// # use kary_collections::collections::contiguous::Vector;
    /// let mut vec: Vector<_> = (0..5).collect();
    /// for i in (0..vec.len()).rev() {
    ///     assert_eq!(vec.try_pop_back(), Ok(i));
    /// }
    /// assert!(vec.try_pop_back().is_err());
    /// ```
    pub fn try_pop_back(&mut self) -> Result<T, Underflow> {
        if self.len == 0 {
            return Err(Underflow);
        }

        // Decrement len before reading.
        self.len -= 1;

        // SAFETY: len has just been decremented and is within the capacity of the Vector, and all
        // values < the old len are initialized. We make a bitwise copy of the value and then treat
        // the slot as uninitialized, which moves the value out of the buffer.
        let value = unsafe { self.arr.ptr.add(self.len).read().assume_init() };
        Ok(value)
    }

    /// Returns a reference to the first element.
    ///
    /// # Panics
    /// Panics with [`Underflow`] if the Vector is empty.
    pub fn front(&self) -> &T {
        self.first().ok_or(Underflow).throw()
    }

    /// Returns a mutable reference to the first element.
    ///
    /// # Panics
    /// Panics with [`Underflow`] if the Vector is empty.
    pub fn front_mut(&mut self) -> &mut T {
        self.first_mut().ok_or(Underflow).throw()
    }

    /// Returns a reference to the last element.
    ///
    /// # Panics
    /// Panics with [`Underflow`] if the Vector is empty.
    ///
    /// # Examples
    /// ```
    /// # use kary_collections::collections::contiguous::Vector;
    /// let vec = Vector::from(["first", "last"]);
    /// assert_eq!(*vec.front(), "first");
    /// assert_eq!(*vec.back(), "last");
    /// ```
    pub fn back(&self) -> &T {
        self.last().ok_or(Underflow).throw()
    }

    /// Returns a mutable reference to the last element.
    ///
    /// # Panics
    /// Panics with [`Underflow`] if the Vector is empty.
    pub fn back_mut(&mut self) -> &mut T {
        self.last_mut().ok_or(Underflow).throw()
    }

    /// Replaces the element at the provided index with `new_value`, returning the old value.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    pub fn replace(&mut self, index: usize, new_value: T) -> T {
        self.check_index(index);

        // SAFETY: index is < len and all values < len are initialized.
        unsafe {
            mem::replace(
                &mut self.arr[index],
                MaybeUninit::new(new_value)
            ).assume_init()
        }
    }

    /// Drops every element of the Vector, leaving its capacity unchanged.
    pub fn clear(&mut self) {
        let len = self.len;
        // Set len first, so that a panicking drop can't lead to a double drop.
        self.len = 0;

        for i in 0..len {
            // SAFETY: All values less than the old len are initialized, and are no longer
            // reachable through self.
            unsafe { self.arr.ptr.add(i).as_mut().assume_init_drop(); }
        }
    }

    /// Ensures that the Vector has capacity to hold an additional `extra` elements. After invoking
    /// this method, the capacity will be >= len + extra.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    pub fn reserve(&mut self, extra: usize) {
        self.try_reserve(extra).handle()
    }

    /// Ensures that the Vector has capacity to hold an additional `extra` elements, returning an
    /// error if it can't. On error, the Vector is unchanged.
    ///
    /// # Errors
    /// Returns [`TryReserveError`] if the required capacity overflows or can't be allocated.
    ///
    /// # Examples
    /// ```
    /// # use kary_collections::collections::contiguous::Vector;
    /// let mut vec = Vector::from([1_u32, 2, 3]);
    /// assert!(vec.try_reserve(usize::MAX).unwrap_err().is_capacity_overflow());
    /// assert_eq!(&*vec, &[1, 2, 3]);
    /// ```
    pub fn try_reserve(&mut self, extra: usize) -> Result<(), TryReserveError> {
        let new_cap = self.len.checked_add(extra).ok_or(CapacityOverflow)?;

        if new_cap <= self.cap() { return Ok(()); }

        self.arr.try_realloc(new_cap)
    }

    /// Grows the internal Array to allow for the insertion of additional elements. After calling
    /// this, the Vector can take at least one more element.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    pub(crate) fn grow(&mut self) {
        self.try_grow().handle()
    }

    /// Doubles the capacity of the internal Array, or sets it to the minimum capacity if it was
    /// previously empty.
    ///
    /// # Errors
    /// Returns [`TryReserveError`] if the doubled capacity overflows or can't be allocated, in
    /// which case the Vector is unchanged.
    pub(crate) fn try_grow(&mut self) -> Result<(), TryReserveError> {
        let new_cap = cmp::max(
            self.cap().checked_mul(GROWTH_FACTOR).ok_or(CapacityOverflow)?,
            MIN_CAP,
        );

        self.arr.try_realloc(new_cap)
    }

    /// Checks that the provided index is within the bounds of self.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    pub(crate) fn check_index(&self, index: usize) {
        if index >= self.len {
            Err(IndexOutOfBounds {
                index,
                len: self.len
            }).throw()
        }
    }
}

impl<T: Clone> Vector<T> {
    /// Creates an independent copy of the Vector, with the same capacity, returning an error if
    /// the memory for it can't be provided.
    ///
    /// # Errors
    /// Returns [`TryReserveError`] if the allocation for the copy fails.
    pub fn try_clone(&self) -> Result<Vector<T>, TryReserveError> {
        let mut vec = Self::try_with_cap(self.cap())?;

        for value in self.iter() {
            // SAFETY: vec has been created with enough capacity for every element of self.
            unsafe { vec.push_unchecked(value.clone()); }
        }

        Ok(vec)
    }
}

impl<T> Extend<T> for Vector<T> {
    fn extend<A: IntoIterator<Item = T>>(&mut self, iter: A) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(value: I) -> Self {
        let iter = value.into_iter();
        let mut vec = Vector::with_cap(cmp::max(iter.size_hint().0, MIN_CAP));

        for item in iter {
            vec.push_back(item);
        }

        vec
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {
    fn from(value: [T; N]) -> Self {
        value.into_iter().collect()
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Vector<T> {
    fn drop(&mut self) {
        // Call drop on all initialized values in place.
        self.clear();

        // Implicitly drop self.arr, containing only MaybeUninit values without a no-op drop.
        // Doing so also deallocates the owned memory.
    }
}

impl<T> Deref for Vector<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: Vector is valid as a slice for len values, which are all initialized. The pointer
        // is nonnull, properly aligned and the range entirely contained within this Vector.
        // The borrow checker enforces that self isn't mutated due to this function taking a &self.
        // The total size is < isize::MAX as the result of being a valid Vector.
        unsafe {
            slice::from_raw_parts(
                // Reinterpret *mut MaybeUninit<T> as *mut T for all values < len.
                self.arr.ptr.as_ptr().cast(),
                self.len,
            )
        }
    }
}

impl<T> DerefMut for Vector<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: Vector is valid as a slice for len values, which are all initialized. The pointer
        // is nonnull, properly aligned and the range entirely contained within this Vector.
        // The borrow checker enforces that self isn't accessed due to this function taking a
        // &mut self. The total size is < isize::MAX as the result of being a valid Vector.
        unsafe {
            slice::from_raw_parts_mut(
                // Reinterpret *mut MaybeUninit<T> as *mut T for all values < len.
                self.arr.ptr.as_ptr().cast(),
                self.len,
            )
        }
    }
}

impl<T> AsRef<[T]> for Vector<T> {
    fn as_ref(&self) -> &[T] {
        self.deref()
    }
}

impl<T> AsMut<[T]> for Vector<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.deref_mut()
    }
}

impl<T> Borrow<[T]> for Vector<T> {
    fn borrow(&self) -> &[T] {
        self.as_ref()
    }
}

impl<T> BorrowMut<[T]> for Vector<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut()
    }
}

// SAFETY: Vectors, when used safely rely on unique pointers and are therefore safe for Send when T:
// Send.
unsafe impl<T: Send> Send for Vector<T> {}
// SAFETY: Vector's safe API obeys all rules of the borrow checker, so no interior mutability
// occurs. This means that Vector<T> can safely implement Sync when T: Sync.
unsafe impl<T: Sync> Sync for Vector<T> {}

impl<T: Clone> Clone for Vector<T> {
    fn clone(&self) -> Self {
        self.try_clone().handle()
    }

    /// Copy-and-swap: a complete copy of `source` is built before self is touched, so a panic
    /// while cloning an element leaves self exactly as it was.
    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        mem::swap(self, &mut copy);
    }
}

impl<T> From<Vector<T>> for Array<T> {
    fn from(mut value: Vector<T>) -> Self {
        // Dealloc all uninit values > len.
        value.arr.realloc(value.len);

        // SAFETY: value is forgotten straight after, so the Array is only owned once.
        let arr = unsafe { ptr::read(&value.arr) };
        mem::forget(value);

        // SAFETY: The Array now has exactly len values, all of which are initialized.
        unsafe { arr.assume_init() }
    }
}

impl<T> From<Array<T>> for Vector<T> {
    fn from(value: Array<T>) -> Self {
        let len = value.size();
        Vector {
            arr: value.forget_init(),
            len,
        }
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T: Hash> Hash for Vector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug> Debug for Vector<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("contents", &&**self)
            .field("len", &self.len)
            .field("cap", &self.cap())
            .finish()
    }
}

impl<T: Debug> Display for Vector<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
