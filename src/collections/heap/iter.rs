use std::slice::Iter;

use super::KAryHeap;
#[doc(inline)]
pub use crate::collections::contiguous::vector::IntoIter;

impl<T: Ord> IntoIterator for KAryHeap<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vector().into_iter()
    }
}

impl<'a, T: Ord> IntoIterator for &'a KAryHeap<T> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
