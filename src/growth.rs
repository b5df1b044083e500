//! When to reallocate, to what size, and the reallocation itself.
//!
//! A reallocation runs as one transaction:
//! 1. allocate a block of the target capacity,
//! 2. relocate the live elements into it in index order,
//! 3. release the old block and switch the buffer over.
//!
//! Only step 1 can fail, and it happens before the buffer is touched, so a failed
//! reallocation leaves the vector exactly as it was. Relocation is a move, and moves in
//! Rust are bitwise copies that cannot fail; the moved-from slots of the old block are
//! released as raw memory, never destroyed.

use core::ptr;

use log::trace;

use crate::{ErrorBehavior, SizedTypeProperties, alloc::Allocator, raw_buffer::{RawBuffer, allocate_block}};

/// The capacity to grow to when `required` slots are needed and `current` are available.
///
/// Doubles the capacity, but never allocates less than `required` and never more than `max_size`.
/// Growing from an empty buffer allocates exactly `required`.
#[inline]
pub(crate) fn amortized_capacity(current: usize, required: usize, max_size: usize) -> usize {
    if current == 0 {
        return required;
    }

    current.saturating_mul(2).min(max_size).max(required)
}

impl<T, A: Allocator> RawBuffer<T, A> {
    /// Makes room for `len + additional` elements, growing geometrically.
    #[cold]
    #[inline(never)]
    pub(crate) fn generic_grow_amortized<E: ErrorBehavior>(&mut self, len: usize, additional: usize) -> Result<(), E> {
        let required = self.required_capacity::<E>(len, additional)?;

        if required <= self.capacity() {
            return Ok(());
        }

        let new_capacity = amortized_capacity(self.capacity(), required, self.max_size());
        unsafe { self.generic_relocate(len, new_capacity) }
    }

    /// Makes room for exactly `len + additional` elements.
    #[cold]
    #[inline(never)]
    pub(crate) fn generic_grow_exact<E: ErrorBehavior>(&mut self, len: usize, additional: usize) -> Result<(), E> {
        let required = self.required_capacity::<E>(len, additional)?;

        if required <= self.capacity() {
            return Ok(());
        }

        unsafe { self.generic_relocate(len, required) }
    }

    /// Reallocates to exactly `len` slots, or releases the block if `len` is zero.
    pub(crate) fn generic_shrink_to_fit<E: ErrorBehavior>(&mut self, len: usize) -> Result<(), E> {
        if T::IS_ZST || len >= self.capacity() {
            return Ok(());
        }

        unsafe { self.generic_relocate(len, len) }
    }

    fn required_capacity<E: ErrorBehavior>(&self, len: usize, additional: usize) -> Result<usize, E> {
        let max_size = self.max_size();

        match len.checked_add(additional) {
            Some(required) if required <= max_size => Ok(required),
            Some(required) => Err(E::length_error(required, max_size)),
            None => Err(E::length_error(usize::MAX, max_size)),
        }
    }

    /// Moves the first `len` elements into a new block of `new_capacity` slots.
    ///
    /// # Safety
    ///
    /// The first `len` slots must be live and `len` must not exceed `new_capacity`.
    /// `T` must not be zero-sized.
    unsafe fn generic_relocate<E: ErrorBehavior>(&mut self, len: usize, new_capacity: usize) -> Result<(), E> {
        debug_assert!(!T::IS_ZST);
        debug_assert!(len <= new_capacity && len <= self.capacity());

        if new_capacity == 0 {
            unsafe { self.release() };
            return Ok(());
        }

        let new_ptr = allocate_block::<T, A, E>(self.allocator(), new_capacity)?;

        trace!("relocating {len} elements from a capacity of {} to {new_capacity}", self.capacity());

        unsafe {
            ptr::copy_nonoverlapping(self.ptr().as_ptr(), new_ptr.as_ptr(), len);
            self.replace_block(new_ptr, new_capacity);
        }

        Ok(())
    }
}
