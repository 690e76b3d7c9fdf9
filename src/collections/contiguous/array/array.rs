use std::alloc::{self, Layout};
use std::borrow::{Borrow, BorrowMut};
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem::{self, MaybeUninit};
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};
use std::slice;

use crate::collections::contiguous::Vector;
use crate::util::error::{AllocationFailure, CapacityOverflow, TryReserveError};
use crate::util::result::ReserveResultExtension;

/// An implementation of an array that is sized at runtime. Similar to a [`Box<[T]>`](Box<T>).
///
/// Array is the owned buffer underneath [`Vector`]. It doesn't track which of its elements are
/// initialized, so a partially initialized buffer is represented as an `Array<MaybeUninit<T>>`.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Array.
///
/// | Method | Complexity |
/// |-|-|
/// | `get` | `O(1)` |
/// | `size` | `O(1)` |
/// | `realloc` | `O(n)`*, `O(1)` |
/// | `contains` | `O(n)` |
///
/// \* The allocator may be able to resize in place, but this isn't guaranteed.
pub struct Array<T> {
    pub(crate) ptr: NonNull<T>,
    pub(crate) size: usize,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T> Array<T> {
    /// Creates a new Array with size 0, without allocating.
    ///
    /// # Examples
    /// ```
    /// # use kary_collections::collections::contiguous::Array;
    /// let arr: Array<u8> = Array::new();
    /// assert_eq!(arr.size(), 0);
    /// assert!(arr.is_empty());
    /// ```
    pub const fn new() -> Array<T> {
        Array {
            ptr: NonNull::dangling(),
            size: 0,
            _phantom: PhantomData,
        }
    }

    /// Returns the size of the Array.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Creates a new Array of [`MaybeUninit<T>`] with the provided `size`. All values are
    /// uninitialized.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use kary_collections::collections::contiguous::Array;
    /// # use std::mem::MaybeUninit;
    /// let arr: Array<MaybeUninit<u8>> = Array::new_uninit(5);
    /// assert_eq!(arr.size(), 5);
    /// ```
    pub fn new_uninit(size: usize) -> Array<MaybeUninit<T>> {
        Self::try_new_uninit(size).handle()
    }

    /// Creates a new Array of [`MaybeUninit<T>`] with the provided `size`, returning an error
    /// rather than panicking or aborting if the memory can't be provided.
    ///
    /// # Errors
    /// Returns [`TryReserveError::CapacityOverflow`] if the memory layout size would exceed
    /// [`isize::MAX`], or [`TryReserveError::AllocationFailure`] if the allocator fails.
    pub fn try_new_uninit(size: usize) -> Result<Array<MaybeUninit<T>>, TryReserveError> {
        let layout = Array::<MaybeUninit<T>>::make_layout(size)?;
        let ptr = Array::<MaybeUninit<T>>::make_ptr(layout)?;

        Ok(Array {
            ptr,
            size,
            _phantom: PhantomData,
        })
    }

    /// Decomposes an `Array<T>` into its raw components, a [`NonNull<T>`] pointer to the contained
    /// data and a [`usize`] representing the size.
    ///
    /// After calling this function, the caller is responsible for the allocated data. The parts
    /// can be used to reconstruct an Array with [`Array::from_parts`], allowing it to be used again
    /// and dropped normally.
    pub fn into_parts(self) -> (NonNull<T>, usize) {
        let ret = (self.ptr, self.size);
        mem::forget(self);
        ret
    }

    /// Creates an `Array<T>` from its raw components, a [`NonNull<T>`] pointer to the contained
    /// data and a [`usize`] representing the size.
    ///
    /// # Safety
    /// Nothing is checked during construction. For the produced value to be valid:
    /// - `ptr` needs to be allocated in the global allocator with the layout of `[T; size]`, or be
    ///   dangling if that layout has a size of zero.
    /// - `ptr` needs to refer to `size` properly initialized values of `T`.
    /// - `size * size_of::<T>()` needs to be less than or equal to [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use kary_collections::collections::contiguous::Array;
    /// let arr: Array<u8> = Array::repeat_default(3);
    /// let (ptr, size) = arr.into_parts();
    /// // SAFETY: The parts were just produced by a valid Array.
    /// let arr = unsafe { Array::from_parts(ptr, size) };
    /// assert_eq!(&*arr, &[0, 0, 0]);
    /// ```
    pub const unsafe fn from_parts(ptr: NonNull<T>, size: usize) -> Array<T> {
        Array {
            ptr,
            size,
            _phantom: PhantomData,
        }
    }

    /// Interprets self as an `Array<MaybeUninit<T>>`. This method acts as a counterpart to
    /// [`Array::assume_init`] and allows [`Array::realloc`] to be called on a previously
    /// initialized Array.
    ///
    /// Note that the values themselves are forgotten too: dropping the returned Array won't drop
    /// any of them.
    pub fn forget_init(self) -> Array<MaybeUninit<T>> {
        let (ptr, size) = self.into_parts();
        // SAFETY: MaybeUninit<T> has the same layout as T and every T is a valid MaybeUninit<T>.
        unsafe { Array::from_parts(ptr.cast(), size) }
    }

    /// A helper function to create a [`Layout`] for use during allocation, containing `size` number
    /// of elements of type `T`.
    ///
    /// # Errors
    /// Returns [`CapacityOverflow`] if memory layout size exceeds [`isize::MAX`].
    pub(crate) fn make_layout(size: usize) -> Result<Layout, CapacityOverflow> {
        Layout::array::<T>(size).map_err(|_| CapacityOverflow)
    }

    /// A helper function to create a [`NonNull`] for the provided [`Layout`]. Returns a dangling
    /// pointer for a zero-sized layout.
    ///
    /// # Errors
    /// Returns [`AllocationFailure`] if the allocator returns a null pointer.
    pub(crate) fn make_ptr(layout: Layout) -> Result<NonNull<T>, AllocationFailure> {
        if layout.size() == 0 {
            Ok(NonNull::dangling())
        } else {
            NonNull::new(
                // SAFETY: Zero-sized layouts have been guarded against.
                unsafe { alloc::alloc(layout).cast() }
            ).ok_or(AllocationFailure { layout })
        }
    }
}

impl<T: Default> Array<T> {
    /// Creates a new `Array<T>` by repeating the default value of `T` `count` times.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    pub fn repeat_default(count: usize) -> Array<T> {
        let mut vec = Vector::with_cap(count);

        for _ in 0..count {
            vec.push_back(T::default());
        }

        vec.into()
    }
}

impl<T> Array<MaybeUninit<T>> {
    /// Assume that all values of an `Array<MaybeUninit<T>>` are initialized.
    ///
    /// # Safety
    /// It is up to the caller to guarantee that the Array is properly initialized. Failing to do so
    /// is undefined behavior.
    ///
    /// # Examples
    /// ```
    /// # use kary_collections::collections::contiguous::Array;
    /// # use std::mem::MaybeUninit;
    /// let mut arr = Array::new_uninit(5);
    /// for i in 0..5 {
    ///     arr[i] = MaybeUninit::new(i);
    /// }
    /// assert_eq!(&*unsafe { arr.assume_init() }, &[0, 1, 2, 3, 4]);
    /// ```
    pub unsafe fn assume_init(self) -> Array<T> {
        let (ptr, size) = self.into_parts();
        // SAFETY: MaybeUninit<T> has the same layout as T, the caller guarantees that all values
        // are initialized.
        unsafe { Array::from_parts(ptr.cast(), size) }
    }

    /// Reallocate the Array to have size equal to `new_size`, with new locations uninitialized.
    /// The first `min(size, new_size)` slots keep their contents.
    ///
    /// # Panics
    /// Panics if the memory layout of the new allocation would have a size that exceeds
    /// [`isize::MAX`]. (`new_size * size_of::<T>() > isize::MAX`)
    ///
    /// # Examples
    /// ```
    /// # use kary_collections::collections::contiguous::Array;
    /// # use std::mem::MaybeUninit;
    /// let mut arr: Array<MaybeUninit<u8>> = Array::new_uninit(2);
    /// arr[0] = MaybeUninit::new(7);
    /// arr.realloc(4);
    /// assert_eq!(arr.size(), 4);
    /// // SAFETY: Index 0 was initialized before reallocating.
    /// assert_eq!(unsafe { arr[0].assume_init() }, 7);
    /// ```
    pub fn realloc(&mut self, new_size: usize) {
        self.try_realloc(new_size).handle()
    }

    /// Reallocate the Array to have size equal to `new_size`, returning an error if the
    /// allocation can't be made. If an error is returned, the Array is unchanged and still owns
    /// its original allocation.
    ///
    /// # Errors
    /// Returns [`TryReserveError::CapacityOverflow`] if the new layout would exceed
    /// [`isize::MAX`] bytes, or [`TryReserveError::AllocationFailure`] if the allocator fails.
    pub fn try_realloc(&mut self, new_size: usize) -> Result<(), TryReserveError> {
        let new_layout = Self::make_layout(new_size)?;

        let new_ptr = match (self.size, new_size) {
            (_, _) if size_of::<T>() == 0 => {
                // Zero-sized types never allocate, keep the existing dangling pointer and just
                // update the size.
                self.ptr
            },
            (old, new) if old == new => {
                // The sizes are equal, there is no need to reallocate.
                return Ok(());
            },
            (0, _) => {
                // If the Array previously had a size of zero, we need a new allocation.
                Self::make_ptr(new_layout)?
            },
            (_, 0) => {
                // The new size is zero, free the old allocation and use a dangling pointer.
                let old_layout = Self::make_layout(self.size)?;

                // SAFETY: ptr was allocated in the global allocator with old_layout, which has a
                // non-zero size because both zero-sized types and zero sizes are guarded against.
                unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), old_layout) };

                NonNull::dangling()
            },
            (_, _) => {
                // Otherwise, use realloc to handle moving or in-place size changing. If realloc
                // fails, the old block is left allocated and untouched.
                let old_layout = Self::make_layout(self.size)?;

                // SAFETY: The same layout and allocator are used for the allocation, and the new
                // layout size is > 0 and <= isize::MAX.
                let raw_ptr: *mut MaybeUninit<T> = unsafe {
                    alloc::realloc(
                        self.ptr.as_ptr().cast(),
                        old_layout,
                        new_layout.size(),
                    ).cast()
                };

                NonNull::new(raw_ptr).ok_or(AllocationFailure { layout: new_layout })?
            },
        };

        self.ptr = new_ptr;
        self.size = new_size;
        Ok(())
    }
}

impl<T> Default for Array<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Array<T> {
    fn drop(&mut self) {
        for i in 0..self.size {
            // SAFETY: The pointer is nonnull, as well as properly aligned, initialized and
            // ready to drop. All possible values are within the allocated range of the Array.
            unsafe {
                ptr::drop_in_place(self.ptr.add(i).as_ptr());
            }
        }

        // The layout was valid when allocated, so this can only fail for an Array which was never
        // allocated in the first place.
        if let Ok(layout) = Self::make_layout(self.size) {
            if layout.size() != 0 {
                // SAFETY: ptr is always allocated in the global allocator and layout is the same
                // as when allocated. Zero-sized layouts aren't allocated and are guarded against
                // deallocation.
                unsafe {
                    alloc::dealloc(self.ptr.as_ptr().cast(), layout)
                }
            }
        }
    }
}

impl<T> Deref for Array<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: The held data uses Layout::array(size) and is therefore valid and properly
        // aligned for (size * mem::size_of::<T>()) bytes. Data is properly initialized and has a
        // length no greater than isize::MAX. The borrow checker prevents mutation throughout the
        // lifetime of the slice.
        unsafe {
            slice::from_raw_parts(self.ptr.as_ptr(), self.size)
        }
    }
}

impl<T> DerefMut for Array<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: The held data uses Layout::array(size) and is therefore valid and properly
        // aligned for (size * mem::size_of::<T>()) bytes. Data is properly initialized and has a
        // length no greater than isize::MAX. The borrow checker prevents access throughout the
        // lifetime of the slice.
        unsafe {
            slice::from_raw_parts_mut(self.ptr.as_ptr(), self.size)
        }
    }
}

impl<T> AsRef<[T]> for Array<T> {
    fn as_ref(&self) -> &[T] {
        self.deref()
    }
}

impl<T> AsMut<[T]> for Array<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.deref_mut()
    }
}

impl<T> Borrow<[T]> for Array<T> {
    fn borrow(&self) -> &[T] {
        self.as_ref()
    }
}

impl<T> BorrowMut<[T]> for Array<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut()
    }
}

// SAFETY: Arrays, when used safely rely on unique pointers and are therefore safe for Send when T:
// Send.
unsafe impl<T: Send> Send for Array<T> {}
// SAFETY: Array's safe API obeys all rules of the borrow checker, so no interior mutability occurs.
// This means that Array<T> can safely implement Sync when T: Sync.
unsafe impl<T: Sync> Sync for Array<T> {}

impl<T: Clone> Clone for Array<T> {
    fn clone(&self) -> Self {
        // Building through a Vector means that a panicking clone drops every element cloned so
        // far.
        self.iter().cloned().collect::<Vector<T>>().into()
    }
}

impl<T, const N: usize> From<[T; N]> for Array<T> {
    fn from(value: [T; N]) -> Self {
        Vector::from(value).into()
    }
}

impl<T: PartialEq> PartialEq for Array<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for Array<T> {}

impl<T: Hash> Hash for Array<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug> Debug for Array<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("contents", &&**self)
            .field("size", &self.size)
            .finish()
    }
}

impl<T: Debug> Display for Array<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
