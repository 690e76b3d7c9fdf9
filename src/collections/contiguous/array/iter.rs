use std::alloc;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::{self, NonNull};

use super::Array;
#[allow(unused)]
use crate::collections::contiguous::Vector;

impl<T> IntoIterator for Array<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let (ptr, size) = self.into_parts();
        IntoIter {
            buf: ptr,
            cap: size,
            start: 0,
            end: size,
            _phantom: PhantomData,
        }
    }
}

/// An owned type for owned iteration over an [`Array`] or [`Vector`]. See [`Array::into_iter`] and
/// [`Vector::into_iter`].
///
/// Values in `start..end` haven't been yielded yet and are still owned by the iterator.
pub struct IntoIter<T> {
    pub(crate) buf: NonNull<T>,
    pub(crate) cap: usize,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        for i in self.start..self.end {
            // SAFETY: All values in start..end are initialized and haven't been moved out.
            unsafe { ptr::drop_in_place(self.buf.add(i).as_ptr()) }
        }

        if let Ok(layout) = Array::<T>::make_layout(self.cap) {
            if layout.size() != 0 {
                // SAFETY: buf was allocated by an Array with the same layout, which has been
                // forgotten without freeing it.
                unsafe { alloc::dealloc(self.buf.as_ptr().cast(), layout) }
            }
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            // SAFETY: start is in bounds and initialized. Incrementing start afterwards means that
            // the value is effectively moved off of the heap.
            let value = unsafe { self.buf.add(self.start).read() };
            self.start += 1;
            Some(value)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            self.end -= 1;
            // SAFETY: The newly decremented end is in bounds, initialized and won't be read again.
            let value = unsafe { self.buf.add(self.end).read() };
            Some(value)
        } else {
            None
        }
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> ExactSizeIterator for IntoIter<T> {}

// Just use the iter and iter_mut definitions provided by Deref<Target=[T]>.
