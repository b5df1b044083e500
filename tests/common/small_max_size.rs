use std::{alloc::Layout, ptr::NonNull};

use alloc_vec::alloc::{AllocError, Allocator};

/// Reports a `max_size` of `MAX` elements for every type.
#[derive(Clone, Copy, Default)]
pub(crate) struct SmallMaxSize<A, const MAX: usize>(pub(crate) A);

unsafe impl<A: Allocator, const MAX: usize> Allocator for SmallMaxSize<A, MAX> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        self.0.allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { self.0.deallocate(ptr, layout) }
    }

    fn max_size<T>(&self) -> usize {
        MAX
    }
}
