//! Memory allocation APIs.
//!
//! An [`AllocVec`](crate::AllocVec) never touches memory on its own. Every block it owns comes from
//! [`Allocator::allocate`] and goes back through [`Allocator::deallocate`], and every element it holds
//! is created by [`Allocator::construct`] and ended by [`Allocator::destroy`].

use core::{
    alloc::Layout,
    fmt,
    mem::size_of,
    ptr::NonNull,
};

#[cfg(feature = "alloc")]
mod global;

#[cfg(feature = "allocator-api2-02")]
pub mod compat;

#[cfg(feature = "alloc")]
pub use global::Global;

/// The `AllocError` error indicates an allocation failure
/// that may be due to resource exhaustion or to
/// something wrong when combining the given input arguments with this
/// allocator.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct AllocError;

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("memory allocation failed")
    }
}

impl core::error::Error for AllocError {}

/// The capability an [`AllocVec`](crate::AllocVec) consumes to manage its memory and its elements.
///
/// Only [`allocate`](Allocator::allocate) and [`deallocate`](Allocator::deallocate) are required.
/// The element lifecycle methods default to writing and dropping in place and
/// [`max_size`](Allocator::max_size) defaults to the largest array a [`Layout`] can describe.
///
/// # Safety
///
/// Memory blocks returned from an allocator must point to valid memory and retain their validity
/// until they are deallocated.
///
/// Copying, cloning, or moving the allocator must not invalidate memory blocks returned from it.
/// A copied or cloned allocator must behave like the same allocator.
///
/// [`construct`](Allocator::construct) must leave the slot initialized exactly when it returns normally.
pub unsafe trait Allocator {
    /// Attempts to allocate a block of memory.
    ///
    /// On success, returns a [`NonNull<[u8]>`][NonNull] meeting the size and alignment guarantees of `layout`.
    /// The block is never assumed to be initialized.
    ///
    /// # Errors
    ///
    /// Returning `Err` indicates that either memory is exhausted or `layout` does not meet
    /// the allocator's size or alignment constraints.
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError>;

    /// Deallocates the memory referenced by `ptr`.
    ///
    /// # Safety
    ///
    /// * `ptr` must denote a block of memory currently allocated via this allocator, and
    /// * `layout` must be the layout that was used to allocate that block of memory.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);

    /// Constructs a value into a raw slot.
    ///
    /// If `f` panics the panic is propagated and the slot stays raw.
    ///
    /// # Safety
    ///
    /// `slot` must be valid for writes, properly aligned and must not hold a live value.
    #[inline(always)]
    unsafe fn construct<T>(&self, slot: NonNull<T>, f: impl FnOnce() -> T) {
        unsafe { slot.write(f()) }
    }

    /// Destroys the live value in `slot`, turning it back into a raw slot.
    ///
    /// # Safety
    ///
    /// `slot` must hold a live value which is not used afterwards.
    #[inline(always)]
    unsafe fn destroy<T>(&self, slot: NonNull<T>) {
        unsafe { slot.drop_in_place() }
    }

    /// Returns the maximum number of `T` this allocator could ever hand out in a single block.
    #[inline(always)]
    fn max_size<T>(&self) -> usize {
        match size_of::<T>() {
            0 => usize::MAX,
            size => isize::MAX as usize / size,
        }
    }
}

unsafe impl<A: Allocator + ?Sized> Allocator for &A {
    #[inline(always)]
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        A::allocate(self, layout)
    }

    #[inline(always)]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { A::deallocate(self, ptr, layout) }
    }

    #[inline(always)]
    unsafe fn construct<T>(&self, slot: NonNull<T>, f: impl FnOnce() -> T) {
        unsafe { A::construct(self, slot, f) }
    }

    #[inline(always)]
    unsafe fn destroy<T>(&self, slot: NonNull<T>) {
        unsafe { A::destroy(self, slot) }
    }

    #[inline(always)]
    fn max_size<T>(&self) -> usize {
        A::max_size::<T>(self)
    }
}
