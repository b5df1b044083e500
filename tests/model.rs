#![cfg(all(feature = "std", feature = "panic-on-alloc"))]

use alloc_vec::{AllocVec, Error, alloc::Global};
use proptest::prelude::*;

mod common;

use common::{InstrumentedAllocator, Limited};

#[derive(Debug, Clone)]
enum Op {
    Push(i32),
    Pop,
    Insert(usize, i32),
    InsertN(usize, usize, i32),
    InsertFromSlice(usize, Vec<i32>),
    Erase(usize),
    EraseRange(usize, usize),
    Remove(usize),
    SwapRemove(usize),
    Resize(usize, i32),
    Truncate(usize),
    ExtendFromSlice(Vec<i32>),
    AssignN(usize, i32),
    Reserve(usize),
    ShrinkToFit,
    Clear,
}

fn arb_op() -> impl Strategy<Value = Op> {
    let index = 0usize..24;
    let count = 0usize..12;
    let slice = prop::collection::vec(any::<i32>(), 0..8);

    prop_oneof![
        any::<i32>().prop_map(Op::Push),
        Just(Op::Pop),
        (index.clone(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
        (index.clone(), count.clone(), any::<i32>()).prop_map(|(i, n, v)| Op::InsertN(i, n, v)),
        (index.clone(), slice.clone()).prop_map(|(i, s)| Op::InsertFromSlice(i, s)),
        index.clone().prop_map(Op::Erase),
        (index.clone(), index.clone()).prop_map(|(a, b)| Op::EraseRange(a, b)),
        index.clone().prop_map(Op::Remove),
        index.clone().prop_map(Op::SwapRemove),
        (0usize..32, any::<i32>()).prop_map(|(n, v)| Op::Resize(n, v)),
        index.prop_map(Op::Truncate),
        slice.prop_map(Op::ExtendFromSlice),
        (count.clone(), any::<i32>()).prop_map(|(n, v)| Op::AssignN(n, v)),
        count.prop_map(Op::Reserve),
        Just(Op::ShrinkToFit),
        Just(Op::Clear),
    ]
}

/// Applies `op` to both, expecting the same outcome. A failed operation must leave `vec` as it was.
fn apply<A: alloc_vec::alloc::Allocator>(vec: &mut AllocVec<i32, A>, model: &mut Vec<i32>, op: Op) -> Result<(), Error> {
    let len = model.len();

    match op {
        Op::Push(value) => {
            vec.try_push(value)?;
            model.push(value);
        }
        Op::Pop => assert_eq!(vec.pop(), model.pop()),
        Op::Insert(index, value) => {
            let result = vec.try_insert(index, value);

            if index > len {
                assert_eq!(result, Err(Error::OutOfRange { index, len }));
            } else {
                result?;
                model.insert(index, value);
            }
        }
        Op::InsertN(index, count, value) => {
            let result = vec.try_insert_n(index, count, value);

            if index > len {
                assert_eq!(result, Err(Error::OutOfRange { index, len }));
            } else {
                result?;
                model.splice(index..index, std::iter::repeat_n(value, count));
            }
        }
        Op::InsertFromSlice(index, slice) => {
            let result = vec.try_insert_from_slice(index, &slice);

            if index > len {
                assert_eq!(result, Err(Error::OutOfRange { index, len }));
            } else {
                result?;
                model.splice(index..index, slice);
            }
        }
        Op::Erase(index) => {
            let result = vec.try_erase(index);

            if index >= len {
                assert_eq!(result, Err(Error::OutOfRange { index, len }));
            } else {
                assert_eq!(result, Ok(index));
                model.remove(index);
            }
        }
        Op::EraseRange(start, end) => {
            let result = vec.try_erase_range(start..end);

            if start > end || end > len {
                assert_eq!(result, Err(Error::RangeOutOfBounds { start, end, len }));
            } else {
                assert_eq!(result, Ok(start));
                model.drain(start..end);
            }
        }
        Op::Remove(index) => {
            let result = vec.try_remove(index);

            if index >= len {
                assert_eq!(result, Err(Error::OutOfRange { index, len }));
            } else {
                assert_eq!(result, Ok(model.remove(index)));
            }
        }
        Op::SwapRemove(index) => {
            if index < len {
                assert_eq!(vec.swap_remove(index), model.swap_remove(index));
            }
        }
        Op::Resize(new_len, value) => {
            vec.try_resize(new_len, value)?;
            model.resize(new_len, value);
        }
        Op::Truncate(new_len) => {
            vec.truncate(new_len);
            model.truncate(new_len);
        }
        Op::ExtendFromSlice(slice) => {
            vec.try_extend_from_slice(&slice)?;
            model.extend_from_slice(&slice);
        }
        Op::AssignN(count, value) => {
            vec.try_assign_n(count, value)?;
            model.clear();
            model.resize(count, value);
        }
        Op::Reserve(additional) => {
            vec.try_reserve(additional)?;
            assert!(vec.capacity() >= len + additional);
        }
        Op::ShrinkToFit => {
            vec.try_shrink_to_fit()?;
            assert_eq!(vec.capacity(), len);
        }
        Op::Clear => {
            vec.clear();
            model.clear();
        }
    }

    Ok(())
}

proptest! {
    #[test]
    fn behaves_like_vec(ops in prop::collection::vec(arb_op(), 0..64)) {
        let allocator = InstrumentedAllocator::new(Global);

        {
            let mut vec = AllocVec::new_in(&allocator);
            let mut model = Vec::new();

            for op in ops {
                prop_assert!(apply(&mut vec, &mut model, op).is_ok());
                prop_assert_eq!(vec.as_slice(), model.as_slice());
                prop_assert!(vec.len() <= vec.capacity());
            }
        }

        prop_assert!(allocator.leaks().is_empty());
    }

    #[test]
    fn failed_operations_change_nothing(
        limit in 0usize..128,
        ops in prop::collection::vec(arb_op(), 0..64),
    ) {
        let allocator = Limited::new_in(limit, Global);

        {
            let mut vec = AllocVec::new_in(&allocator);
            let mut model = Vec::new();

            for op in ops {
                // assignment destroys the old contents before it allocates
                let before = if matches!(op, Op::AssignN(..)) { Vec::new() } else { model.clone() };
                let capacity = vec.capacity();

                match apply(&mut vec, &mut model, op) {
                    Ok(()) => prop_assert_eq!(vec.as_slice(), model.as_slice()),
                    Err(error) => {
                        prop_assert!(matches!(error, Error::OutOfMemory { .. }), "expected OutOfMemory, got {:?}", error);
                        prop_assert_eq!(vec.as_slice(), before.as_slice());
                        prop_assert_eq!(vec.capacity(), capacity);
                        model = before;
                    }
                }
            }
        }

        prop_assert_eq!(allocator.current(), 0);
        prop_assert!(allocator.peak() <= limit);
    }
}
