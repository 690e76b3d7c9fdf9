#![cfg(test)]

use std::cmp::Ordering;

use proptest::prelude::*;

use super::*;
use crate::collections::contiguous::Vector;
use crate::util::alloc::CountedDrop;
use crate::util::panic::assert_panics;

/// Checks that no element in the heap is smaller than its parent.
fn is_heap_ordered<T: Ord>(heap: &KAryHeap<T>) -> bool {
    let data = heap.as_slice();
    (1..data.len()).all(|i| data[(i - 1) / heap.arity()] <= data[i])
}

#[test]
fn test_new_and_empty() {
    let heap: KAryHeap<i32> = KAryHeap::new();
    assert!(heap.is_empty());
    assert_eq!(heap.len(), 0);
    assert_eq!(heap.arity(), 2);
    assert_eq!(heap.peek(), None);
    assert!(heap.try_get_min().is_err());

    assert_panics!({
        let heap: KAryHeap<i32> = KAryHeap::new();
        heap.get_min();
    });
    assert_panics!({
        let mut heap: KAryHeap<i32> = KAryHeap::new();
        heap.remove_min();
    });
}

#[test]
fn test_invalid_arity() {
    assert_panics!({
        KAryHeap::<i32>::with_arity(1);
    });
    assert_panics!({
        KAryHeap::<i32>::with_arity(0);
    });
    assert_panics!({
        KAryHeap::from_vector_with_arity(Vector::from([1, 2]), 1);
    });
}

#[test]
fn test_insert_and_get_min() {
    let mut heap = KAryHeap::new();

    heap.insert(10);
    assert_eq!(*heap.get_min(), 10);
    assert_eq!(heap.as_slice(), &[10], "Inserting into an empty heap needs no sifting.");

    heap.insert(5);
    assert_eq!(*heap.get_min(), 5);

    heap.insert(15);
    assert_eq!(*heap.get_min(), 5);
    assert_eq!(heap.len(), 3);
}

#[test]
fn test_remove_min() {
    let mut heap = KAryHeap::new();
    heap.insert(10);
    heap.insert(5);
    heap.insert(15);

    assert_eq!(heap.remove_min(), 5);
    assert_eq!(*heap.get_min(), 10);
    assert_eq!(heap.remove_min(), 10);
    assert_eq!(*heap.get_min(), 15);
    assert_eq!(heap.remove_min(), 15);
    assert!(heap.is_empty(), "Removing the only element should empty the heap.");
    assert_eq!(heap.try_remove_min(), Err(crate::error::Underflow));
}

#[test]
fn test_binary_scenario() {
    let mut heap = KAryHeap::with_arity(2);
    for i in [20, 15, 30, 5, 10] {
        heap.insert(i);
        assert!(is_heap_ordered(&heap));
    }

    assert_eq!(*heap.get_min(), 5);
    heap.remove_min();
    assert_eq!(*heap.get_min(), 10);
    heap.remove_min();
    assert_eq!(*heap.get_min(), 15);
}

#[test]
fn test_ternary_scenario() {
    let mut heap = KAryHeap::with_arity(3);
    for i in [9, 1, 4, 2, 8] {
        heap.insert(i);
    }

    let mut removed = Vector::new();
    while !heap.is_empty() {
        removed.push_back(heap.remove_min());
        assert!(is_heap_ordered(&heap));
    }

    assert_eq!(&*removed, &[1, 2, 4, 8, 9]);
}

/// Compares only by key, so that equal elements can still be told apart by their tag.
#[derive(Debug, Clone, Copy)]
struct Keyed {
    key: u8,
    tag: char,
}

impl PartialEq for Keyed {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Keyed {}

impl PartialOrd for Keyed {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Keyed {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

#[test]
fn test_tie_break_lowest_index() {
    let keyed = |key, tag| Keyed { key, tag };

    // The root has three children with equal keys.
    let mut heap = KAryHeap {
        data: Vector::from([
            keyed(0, 'a'),
            keyed(1, 'b'),
            keyed(1, 'c'),
            keyed(1, 'd'),
            keyed(9, 'e'),
        ]),
        arity: 3,
    };
    assert!(is_heap_ordered(&heap));

    assert_eq!(heap.remove_min().tag, 'a');
    let tags: Vector<char> = heap.iter().map(|k| k.tag).collect();
    assert_eq!(
        &*tags,
        &['b', 'e', 'c', 'd'],
        "The root should swap with the lowest indexed of several equal smallest children."
    );

    let mut heap = KAryHeap::with_arity(2);
    heap.insert(keyed(1, 'a'));
    heap.insert(keyed(1, 'b'));
    assert_eq!(
        heap.get_min().tag, 'a',
        "An element equal to its parent shouldn't be sifted up."
    );
}

#[test]
fn test_from_vector() {
    for arity in 2..=5 {
        let heap = KAryHeap::from_vector_with_arity((0..50).rev().collect(), arity);
        assert!(is_heap_ordered(&heap), "Arity {arity} heap should be ordered.");
        assert_eq!(heap.len(), 50);
        assert_eq!(*heap.get_min(), 0);
    }

    let heap: KAryHeap<_> = [3, 1, 2].into_iter().collect();
    assert_eq!(heap.arity(), 2);
    assert_eq!(&*heap.into_sorted_vector(), &[1, 2, 3]);

    let heap = KAryHeap::from(Vector::from([7]));
    assert_eq!(&*heap.into_vector(), &[7]);
}

#[test]
fn test_clone_independence() {
    let mut heap = KAryHeap::with_arity(4);
    heap.insert(10);
    heap.insert(20);
    heap.insert(5);

    let mut copy = heap.clone();
    assert_eq!(copy.len(), heap.len());
    assert_eq!(copy.get_min(), heap.get_min());
    assert_eq!(copy.arity(), 4);

    copy.insert(1);
    assert_eq!(*heap.get_min(), 5, "Inserting into a copy shouldn't affect the original.");
    assert_eq!(heap.len(), 3);

    heap.remove_min();
    assert_eq!(*copy.get_min(), 1, "Removing from the original shouldn't affect a copy.");
    assert_eq!(copy.len(), 4);

    let mut assigned = KAryHeap::new();
    assigned.insert(100);
    assigned.clone_from(&copy);
    assert_eq!(assigned.arity(), 4);
    assert_eq!(assigned.as_slice(), copy.as_slice());
}

#[test]
fn test_try_clone() {
    let mut heap = KAryHeap::with_arity(3);
    heap.extend([8, 3, 5, 1]);

    let mut copy = heap.try_clone().unwrap();
    assert_eq!(copy.arity(), 3);
    assert_eq!(copy.as_slice(), heap.as_slice());

    copy.remove_min();
    assert_eq!(*heap.get_min(), 1, "Removing from a copy shouldn't affect the original.");
    assert_eq!(heap.len(), 4);
    assert_eq!(*copy.get_min(), 3);

    let empty: KAryHeap<String> = KAryHeap::with_arity(5);
    let copy = empty.try_clone().unwrap();
    assert!(copy.is_empty());
    assert_eq!(copy.arity(), 5);
}

#[test]
fn test_failed_growth_leaves_heap_unchanged() {
    let mut heap: KAryHeap<u8> = KAryHeap::with_arity(3);
    heap.extend([4, 2, 9]);
    let before = heap.as_slice().as_ptr();
    let cap = heap.data.cap();

    let error = heap.try_reserve(isize::MAX as usize - 16).unwrap_err();
    assert!(error.is_allocation_failure());
    assert_eq!(heap.as_slice().as_ptr(), before, "A failed reservation shouldn't move the heap.");
    assert_eq!(heap.data.cap(), cap);
    assert_eq!(heap.as_slice(), &[2, 4, 9]);

    assert!(heap.try_reserve(usize::MAX).unwrap_err().is_capacity_overflow());
    assert_eq!(heap.len(), 3);

    // Inserting at full capacity goes through the same growth path.
    while heap.len() < heap.data.cap() {
        assert!(heap.try_insert(7).is_ok());
    }
    assert!(heap.try_insert(0).is_ok());
    assert!(heap.data.cap() > cap);
    assert_eq!(*heap.get_min(), 0);
    assert!(is_heap_ordered(&heap));

    heap.reserve(10);
    assert!(heap.data.cap() >= heap.len() + 10);
}

#[test]
fn test_clear_extend_and_iter() {
    let counter = CountedDrop::new(0);
    let mut heap = KAryHeap::new();
    heap.extend([4, 2, 6, 1]);
    assert_eq!(*heap.get_min(), 1);
    assert_eq!((&heap).into_iter().count(), 4);

    let mut contents: Vector<_> = heap.clone().into_iter().collect();
    contents.sort();
    assert_eq!(&*contents, &[1, 2, 4, 6]);

    heap.clear();
    assert!(heap.is_empty());
    assert!(heap.try_insert(3).is_ok());
    assert_eq!(*heap.get_min(), 3);

    // CountedDrop isn't Ord, so drops are counted through a wrapper ordered by an index.
    let mut heap = KAryHeap::new();
    for i in 0..5 {
        heap.insert(DropKey { key: i, _drops: counter.clone() });
    }
    drop(heap.remove_min());
    assert_eq!(counter.take(), 1);
    drop(heap);
    assert_eq!(counter.take(), 4, "Dropping a heap should drop every element once.");
}

#[derive(Debug)]
struct DropKey {
    key: usize,
    _drops: CountedDrop,
}

impl PartialEq for DropKey {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for DropKey {}

impl PartialOrd for DropKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DropKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

#[test]
fn test_fmt() {
    let mut heap = KAryHeap::new();
    heap.insert(2);
    heap.insert(1);

    assert_eq!(format!("{heap}"), "[1, 2]");
    assert_eq!(format!("{heap:?}"), "KAryHeap { contents: [1, 2], arity: 2 }");
}

#[derive(Debug, Clone)]
enum Op {
    Insert(i16),
    RemoveMin,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<i16>().prop_map(Op::Insert),
        1 => Just(Op::RemoveMin),
    ]
}

proptest! {
    #[test]
    fn heap_order_holds_after_every_operation(
        arity in 2..=6usize,
        ops in prop::collection::vec(op(), 0..200)
    ) {
        let mut heap = KAryHeap::with_arity(arity);
        let mut reference = Vector::new();

        for op in ops {
            match op {
                Op::Insert(value) => {
                    heap.insert(value);
                    reference.push_back(value);
                },
                Op::RemoveMin => {
                    let expected = reference.iter().copied().min();
                    let removed = heap.try_remove_min().ok();
                    prop_assert_eq!(removed, expected);

                    if let Some(value) = removed {
                        let index = reference.iter().position(|v| *v == value);
                        prop_assert!(index.is_some());
                        if let Some(index) = index {
                            let last = reference.pop_back();
                            if index < reference.len() {
                                reference.replace(index, last);
                            }
                        }
                    }
                },
            }

            prop_assert!(is_heap_ordered(&heap));
            prop_assert_eq!(heap.len(), reference.len());
            prop_assert_eq!(heap.peek().copied(), reference.iter().copied().min());
        }
    }

    #[test]
    fn sorted_extraction_is_non_decreasing(
        arity in 2..=8usize,
        values in prop::collection::vec(any::<i32>(), 0..300)
    ) {
        let mut heap = KAryHeap::with_arity(arity);
        for value in values.iter().copied() {
            heap.insert(value);
        }

        let mut expected = values.clone();
        expected.sort();

        let sorted = heap.into_sorted_vector();
        prop_assert_eq!(&*sorted, expected.as_slice());
    }
}
