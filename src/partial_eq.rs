use crate::{AllocVec, alloc::Allocator};

macro_rules! impl_slice_eq {
    ([$($vars:tt)*] $lhs:ty, $rhs:ty) => {
        impl<T, U, $($vars)*> PartialEq<$rhs> for $lhs
        where
            T: PartialEq<U>,
        {
            #[inline]
            fn eq(&self, other: &$rhs) -> bool { self[..] == other[..] }
            #[inline]
            fn ne(&self, other: &$rhs) -> bool { self[..] != other[..] }
        }
    }
}

impl_slice_eq! { [A1: Allocator, A2: Allocator] AllocVec<T, A1>, AllocVec<U, A2> }
impl_slice_eq! { [A: Allocator] AllocVec<T, A>, [U] }
impl_slice_eq! { [A: Allocator] AllocVec<T, A>, &[U] }
impl_slice_eq! { [A: Allocator] AllocVec<T, A>, &mut [U] }
impl_slice_eq! { [A: Allocator] [T], AllocVec<U, A> }
impl_slice_eq! { [A: Allocator] &[T], AllocVec<U, A> }
impl_slice_eq! { [A: Allocator] &mut [T], AllocVec<U, A> }
impl_slice_eq! { [A: Allocator, const N: usize] AllocVec<T, A>, [U; N] }
impl_slice_eq! { [A: Allocator, const N: usize] AllocVec<T, A>, &[U; N] }
impl_slice_eq! { [A: Allocator, const N: usize] AllocVec<T, A>, &mut [U; N] }
