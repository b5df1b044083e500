use std::{string::String, vec::Vec};

use crate::{AllocVec, Error, alloc::Global, alloc_vec};

use super::{Counted, Limited, drops, expect_panic, reset_drops};

#[test]
fn insert_shifts_tail() {
    let mut vec = alloc_vec![1, 2, 3];
    vec.insert(1, 9);
    assert_eq!(vec, [1, 9, 2, 3]);

    vec.insert(0, 0);
    vec.insert(vec.len(), 4);
    assert_eq!(vec, [0, 1, 9, 2, 3, 4]);
}

#[test]
fn insert_n_fills_gap() {
    let mut vec = alloc_vec![1, 2, 3];
    vec.insert_n(1, 2, 9);
    assert_eq!(vec, [1, 9, 9, 2, 3]);
    assert_eq!(vec.len(), 5);

    vec.insert_n(5, 0, 7);
    assert_eq!(vec, [1, 9, 9, 2, 3]);
}

#[test]
fn insert_out_of_range() {
    let mut vec = alloc_vec![1, 2, 3];
    assert_eq!(vec.try_insert(4, 0), Err(Error::OutOfRange { index: 4, len: 3 }));
    assert_eq!(vec.try_insert_n(5, 2, 0), Err(Error::OutOfRange { index: 5, len: 3 }));
    assert_eq!(vec, [1, 2, 3]);
}

#[test]
fn insert_iter_and_slice() {
    let mut vec = alloc_vec![1, 5];
    vec.insert_iter(1, [2, 3]);
    vec.insert_from_slice(3, &[4]);
    assert_eq!(vec, [1, 2, 3, 4, 5]);
}

#[test]
fn insert_with_returns_new_element() {
    let mut vec = alloc_vec![String::from("a"), String::from("c")];
    vec.insert_with(1, || String::from("b")).push('!');
    assert_eq!(vec, ["a", "b!", "c"]);
}

#[test]
fn panicking_clone_in_insert_n_restores_contents() {
    let mut vec: AllocVec<Counted> = AllocVec::with_capacity(10);
    vec.extend([Counted(1), Counted(2), Counted(3)]);

    let calls = std::cell::Cell::new(0);

    #[derive(Debug)]
    struct CloneBomb<'a>(&'a std::cell::Cell<u32>, Counted);

    impl Clone for CloneBomb<'_> {
        fn clone(&self) -> Self {
            self.0.set(self.0.get() + 1);
            if self.0.get() == 2 {
                panic!("clone failed");
            }
            CloneBomb(self.0, self.1.clone())
        }
    }

    let mut bombs: AllocVec<CloneBomb> = vec.iter().map(|c| CloneBomb(&calls, c.clone())).collect();

    reset_drops();

    expect_panic(|| bombs.insert_n(1, 3, CloneBomb(&calls, Counted(9))));

    // one clone succeeded and was destroyed, the original value was dropped
    assert_eq!(drops(), 2);
    let values: Vec<u32> = bombs.iter().map(|b| b.1.0).collect();
    assert_eq!(values, [1, 2, 3]);

    drop(vec);
}

#[test]
fn erase_returns_position() {
    let mut vec = alloc_vec![1, 2, 3, 4, 5];
    assert_eq!(vec.erase(0), 0);
    assert_eq!(vec.erase_range(1..3), 1);
    assert_eq!(vec, [2, 5]);

    assert_eq!(vec.try_erase(2), Err(Error::OutOfRange { index: 2, len: 2 }));
    assert_eq!(
        vec.try_erase_range(1..3),
        Err(Error::RangeOutOfBounds { start: 1, end: 3, len: 2 })
    );
    #[allow(clippy::reversed_empty_ranges)]
    let backwards = 2..1;
    assert_eq!(
        vec.try_erase_range(backwards),
        Err(Error::RangeOutOfBounds { start: 2, end: 1, len: 2 })
    );
}

#[test]
fn erase_destroys_in_reverse() {
    let order = std::cell::RefCell::new(Vec::new());

    struct Logged<'a>(u32, &'a std::cell::RefCell<Vec<u32>>);

    impl Drop for Logged<'_> {
        fn drop(&mut self) {
            self.1.borrow_mut().push(self.0);
        }
    }

    let mut vec = AllocVec::new();
    for i in 0..5 {
        vec.push(Logged(i, &order));
    }

    vec.erase_range(1..4);
    assert_eq!(*order.borrow(), [3, 2, 1]);
    assert_eq!(vec.iter().map(|l| l.0).collect::<Vec<_>>(), [0, 4]);

    order.borrow_mut().clear();
    vec.push(Logged(5, &order));
    vec.clear();
    assert_eq!(*order.borrow(), [5, 4, 0]);
}

#[test]
fn empty_erase_range_is_noop() {
    reset_drops();
    let mut vec = alloc_vec![Counted(1), Counted(2)];
    assert_eq!(vec.erase_range(1..1), 1);
    assert_eq!(vec.erase_range(2..2), 2);
    assert_eq!(drops(), 0);
    assert_eq!(vec.len(), 2);
}

#[test]
fn resize_grows_and_shrinks() {
    let mut vec = alloc_vec![1, 2, 3];
    vec.resize(5, 0);
    assert_eq!(vec, [1, 2, 3, 0, 0]);

    vec.resize(2, 0);
    assert_eq!(vec, [1, 2]);

    let mut counter = 10;
    vec.resize_with(4, || {
        counter += 1;
        counter
    });
    assert_eq!(vec, [1, 2, 11, 12]);

    vec.resize_default(5);
    assert_eq!(vec, [1, 2, 11, 12, 0]);

    let max_size = vec.max_size();
    assert_eq!(
        vec.try_resize(max_size + 1, 0),
        Err(Error::LengthError {
            requested: max_size + 1,
            max_size
        })
    );
}

#[test]
fn assign_replaces_contents() {
    let mut vec = alloc_vec![1, 2, 3];
    vec.assign_from_slice(&[4, 5]);
    assert_eq!(vec, [4, 5]);

    vec.assign_n(3, 7);
    assert_eq!(vec, [7, 7, 7]);

    vec.assign_iter(0..4);
    assert_eq!(vec, [0, 1, 2, 3]);
}

#[test]
fn accessors() {
    let mut vec = alloc_vec![1, 2, 3];
    assert_eq!(vec.at(2), Ok(&3));
    assert_eq!(vec.at(3), Err(Error::OutOfRange { index: 3, len: 3 }));
    *vec.at_mut(0).unwrap() = 10;

    assert_eq!(vec.front(), Some(&10));
    assert_eq!(vec.back(), Some(&3));
    *vec.back_mut().unwrap() = 30;
    *vec.front_mut().unwrap() += 1;
    assert_eq!(vec, [11, 2, 30]);

    let empty: AllocVec<i32> = AllocVec::new();
    assert_eq!(empty.front(), None);
    assert_eq!(empty.back(), None);
}

#[test]
fn pop_remove_swap_remove() {
    let mut vec = alloc_vec![1, 2, 3, 4];
    assert_eq!(vec.pop(), Some(4));
    assert_eq!(vec.remove(0), 1);
    assert_eq!(vec.swap_remove(0), 2);
    assert_eq!(vec, [3]);
    assert_eq!(vec.try_remove(1), Err(Error::OutOfRange { index: 1, len: 1 }));
    assert_eq!(vec.pop(), Some(3));
    assert_eq!(vec.pop(), None);
}

#[test]
fn clone_has_exact_capacity() {
    let mut vec: AllocVec<i32> = AllocVec::with_capacity(16);
    vec.extend([1, 2, 3]);

    let clone = vec.clone();
    assert_eq!(clone, vec);
    assert_eq!(clone.capacity(), 3);
}

#[test]
fn failed_clone_leaves_nothing() {
    let allocator = Limited::new_in(16, Global);
    let vec = alloc_vec![in &allocator; 1u32, 2, 3];

    let err = vec.try_clone_in(&allocator).unwrap_err();
    assert!(matches!(err, Error::OutOfMemory { .. }));
    assert_eq!(allocator.current(), 12);
}

#[test]
fn transfer_moves_everything() {
    let first = Limited::new_in(1024, Global);
    let second = Limited::new_in(1024, Global);

    let mut vec = alloc_vec![in &first; String::from("a"), String::from("b")];
    let moved = vec.transfer_in(&second);

    assert!(vec.is_empty());
    assert_eq!(moved, ["a", "b"]);
    assert_eq!(moved.capacity(), 2);
    assert!(second.current() > 0);

    drop(vec);
    drop(moved);
    assert_eq!(first.current(), 0);
    assert_eq!(second.current(), 0);
}

#[test]
fn swap_exchanges_buffers() {
    let mut a = alloc_vec![1, 2, 3];
    let mut b = AllocVec::with_capacity(10);
    b.push(4);

    let a_ptr = a.as_ptr();
    crate::swap(&mut a, &mut b);

    assert_eq!(a, [4]);
    assert_eq!(a.capacity(), 10);
    assert_eq!(b, [1, 2, 3]);
    assert_eq!(b.as_ptr(), a_ptr);
}

#[test]
fn into_iter_drops_rest() {
    reset_drops();
    let vec = alloc_vec![Counted(1), Counted(2), Counted(3), Counted(4)];

    let mut iter = vec.into_iter();
    assert_eq!(iter.len(), 4);
    assert_eq!(iter.next().map(|c| c.0), Some(1));
    assert_eq!(iter.next_back().map(|c| c.0), Some(4));
    assert_eq!(drops(), 2);

    drop(iter);
    assert_eq!(drops(), 4);
}
