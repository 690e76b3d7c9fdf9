//! Helpers for tests which track how values are dropped and cloned.

use std::cell::{Cell, RefCell};
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

/// A type with no size, for testing the handling of zero-sized allocations.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZeroSizedType;

/// Increments the shared counter every time an instance is dropped.
#[derive(Debug, Clone)]
pub struct CountedDrop(pub Rc<RefCell<usize>>);

impl CountedDrop {
    /// Creates a new counter, starting at `value`.
    pub fn new(value: usize) -> CountedDrop {
        CountedDrop(Rc::new(RefCell::new(value)))
    }
}

impl Deref for CountedDrop {
    type Target = Rc<RefCell<usize>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for CountedDrop {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.0.replace_with(|v| *v + 1);
    }
}

/// A value which panics once the shared budget of clones runs out, while counting its drops.
#[derive(Debug)]
pub struct PanicOnClone {
    /// The number of clones that may still be made before one panics.
    pub clones_left: Rc<Cell<usize>>,
    /// Counts the drops of every instance sharing this counter.
    pub drops: CountedDrop,
}

impl PanicOnClone {
    /// Creates a value sharing the provided clone budget and drop counter.
    pub fn new(clones_left: &Rc<Cell<usize>>, drops: &CountedDrop) -> PanicOnClone {
        PanicOnClone {
            clones_left: Rc::clone(clones_left),
            drops: drops.clone(),
        }
    }
}

impl Clone for PanicOnClone {
    fn clone(&self) -> Self {
        match self.clones_left.get() {
            0 => panic!("clone budget exhausted"),
            n => self.clones_left.set(n - 1),
        }
        PanicOnClone::new(&self.clones_left, &self.drops)
    }
}
