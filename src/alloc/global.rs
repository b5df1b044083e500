use alloc_crate::alloc::{alloc, dealloc};
use core::{
    alloc::Layout,
    ptr::{self, NonNull},
};

use super::{AllocError, Allocator};

/// The global memory allocator.
///
/// This type implements the [`Allocator`] trait by forwarding calls
/// to the allocator registered with the `#[global_allocator]` attribute
/// if there is one, or the `std` crate's default.
///
/// It is stateless, so every `Global` is interchangeable with every other and the
/// process-wide allocator it forwards to lives for the whole program.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct Global;

unsafe impl Allocator for Global {
    #[inline]
    #[cfg_attr(miri, track_caller)] // even without panics, this helps for Miri backtraces
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        match layout.size() {
            0 => {
                let dangling = ptr::without_provenance_mut::<u8>(layout.align());
                // SAFETY: an alignment is never zero
                let dangling = unsafe { NonNull::new_unchecked(dangling) };
                Ok(NonNull::slice_from_raw_parts(dangling, 0))
            }
            // SAFETY: `layout` is non-zero in size
            size => unsafe {
                let ptr = NonNull::new(alloc(layout)).ok_or(AllocError)?;
                Ok(NonNull::slice_from_raw_parts(ptr, size))
            },
        }
    }

    #[inline]
    #[cfg_attr(miri, track_caller)] // even without panics, this helps for Miri backtraces
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() != 0 {
            // SAFETY:
            // * We have checked that `layout` is non-zero in size.
            // * The caller is obligated to provide the layout the block was allocated with.
            unsafe { dealloc(ptr.as_ptr(), layout) }
        }
    }
}
