//! Adapters for allocators written against other allocator traits.

use core::{alloc::Layout, ptr::NonNull};

use allocator_api2_02::alloc::{AllocError as ApiAllocError, Allocator as ApiAllocator};

use super::{AllocError, Allocator};

/// Wraps an <code>allocator_api2::alloc::[Allocator](allocator_api2_02::alloc::Allocator)</code> to implement
/// <code>alloc_vec::alloc::[Allocator](crate::alloc::Allocator)</code>.
///
/// # Example
///
/// ```
/// # use allocator_api2_02 as allocator_api2;
/// use alloc_vec::{AllocVec, alloc::compat::AllocatorApi2V02Compat};
///
/// let mut vec = AllocVec::new_in(AllocatorApi2V02Compat(allocator_api2::alloc::Global));
/// vec.push(1);
/// vec.push(2);
/// assert_eq!(vec, [1, 2]);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct AllocatorApi2V02Compat<A>(pub A);

impl<A> AllocatorApi2V02Compat<A> {
    /// Returns the wrapped allocator.
    #[inline(always)]
    pub fn into_inner(self) -> A {
        self.0
    }
}

unsafe impl<A: ApiAllocator> Allocator for AllocatorApi2V02Compat<A> {
    #[inline(always)]
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        match self.0.allocate(layout) {
            Ok(ptr) => Ok(ptr),
            Err(ApiAllocError) => Err(AllocError),
        }
    }

    #[inline(always)]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { self.0.deallocate(ptr, layout) }
    }
}

impl From<ApiAllocError> for AllocError {
    #[inline(always)]
    fn from(_: ApiAllocError) -> Self {
        AllocError
    }
}

impl From<AllocError> for ApiAllocError {
    #[inline(always)]
    fn from(_: AllocError) -> Self {
        ApiAllocError
    }
}

#[test]
fn test_compat() {
    fn is_allocator<T: Allocator>(_: T) {}

    #[derive(Clone)]
    struct TestAllocator;

    unsafe impl ApiAllocator for TestAllocator {
        fn allocate(&self, _: Layout) -> Result<NonNull<[u8]>, ApiAllocError> {
            unimplemented!()
        }

        unsafe fn deallocate(&self, _: NonNull<u8>, _: Layout) {
            unimplemented!()
        }
    }

    is_allocator(AllocatorApi2V02Compat(TestAllocator));
    is_allocator(&AllocatorApi2V02Compat(TestAllocator));
}
