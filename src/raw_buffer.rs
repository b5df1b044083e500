use core::{
    alloc::Layout,
    marker::PhantomData,
    panic::{RefUnwindSafe, UnwindSafe},
    ptr::NonNull,
};

use log::trace;

use crate::{ErrorBehavior, SizedTypeProperties, alloc::Allocator};

/// One contiguous block of `cap` slots for `T` together with the allocator that owns it.
///
/// The buffer knows nothing about which slots are live. Dropping it releases the block
/// without touching any element; the owner is responsible for destroying live elements first.
///
/// A buffer with a capacity of zero, or of a zero-sized `T`, owns no allocation.
pub(crate) struct RawBuffer<T, A: Allocator> {
    ptr: NonNull<T>,
    cap: usize,
    allocator: A,
    marker: PhantomData<T>,
}

unsafe impl<T: Send, A: Allocator + Send> Send for RawBuffer<T, A> {}
unsafe impl<T: Sync, A: Allocator + Sync> Sync for RawBuffer<T, A> {}

impl<T: UnwindSafe, A: Allocator + UnwindSafe> UnwindSafe for RawBuffer<T, A> {}
impl<T: RefUnwindSafe, A: Allocator + RefUnwindSafe> RefUnwindSafe for RawBuffer<T, A> {}

impl<T, A: Allocator> RawBuffer<T, A> {
    #[inline(always)]
    pub(crate) const fn new_in(allocator: A) -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: if T::IS_ZST { usize::MAX } else { 0 },
            allocator,
            marker: PhantomData,
        }
    }

    /// Allocates a buffer with room for exactly `capacity` elements.
    pub(crate) fn generic_with_capacity_in<E: ErrorBehavior>(capacity: usize, allocator: A) -> Result<Self, E> {
        if T::IS_ZST || capacity == 0 {
            return Ok(Self::new_in(allocator));
        }

        let ptr = allocate_block::<T, A, E>(&allocator, capacity)?;

        Ok(Self {
            ptr,
            cap: capacity,
            allocator,
            marker: PhantomData,
        })
    }

    #[inline(always)]
    pub(crate) const fn ptr(&self) -> NonNull<T> {
        self.ptr
    }

    #[inline(always)]
    pub(crate) const fn capacity(&self) -> usize {
        self.cap
    }

    #[inline(always)]
    pub(crate) const fn allocator(&self) -> &A {
        &self.allocator
    }

    #[inline(always)]
    pub(crate) fn max_size(&self) -> usize {
        self.allocator.max_size::<T>()
    }

    /// Returns the slot at `index`.
    ///
    /// # Safety
    ///
    /// `index` must be at most the capacity.
    #[inline(always)]
    pub(crate) unsafe fn slot(&self, index: usize) -> NonNull<T> {
        unsafe { self.ptr.add(index) }
    }

    /// Replaces the block with `ptr` and `cap`, releasing the old one.
    ///
    /// # Safety
    ///
    /// `ptr` must have been allocated by this buffer's allocator with room for `cap` elements.
    /// The old block must not hold any live element that is still in use.
    pub(crate) unsafe fn replace_block(&mut self, ptr: NonNull<T>, cap: usize) {
        unsafe { self.release() };
        self.ptr = ptr;
        self.cap = cap;
    }

    /// Deallocates the block, leaving the buffer without an allocation.
    ///
    /// # Safety
    ///
    /// The block must not hold any live element that is still in use.
    pub(crate) unsafe fn release(&mut self) {
        if let Some(layout) = self.current_layout() {
            trace!("releasing buffer of {} elements ({} bytes)", self.cap, layout.size());
            unsafe { self.allocator.deallocate(self.ptr.cast(), layout) };
        }

        self.ptr = NonNull::dangling();
        self.cap = if T::IS_ZST { usize::MAX } else { 0 };
    }

    fn current_layout(&self) -> Option<Layout> {
        if T::IS_ZST || self.cap == 0 {
            return None;
        }

        // we already allocated that amount so this can't overflow
        Some(unsafe { Layout::from_size_align_unchecked(self.cap * T::SIZE, T::ALIGN) })
    }
}

impl<T, A: Allocator> Drop for RawBuffer<T, A> {
    fn drop(&mut self) {
        unsafe { self.release() }
    }
}

/// Allocates an uninitialized block of `capacity` slots from `allocator`.
///
/// Fails with a length error if `capacity` exceeds the allocator's `max_size`.
pub(crate) fn allocate_block<T, A: Allocator, E: ErrorBehavior>(allocator: &A, capacity: usize) -> Result<NonNull<T>, E> {
    debug_assert!(!T::IS_ZST && capacity != 0);

    let max_size = allocator.max_size::<T>();

    if capacity > max_size {
        return Err(E::length_error(capacity, max_size));
    }

    let layout = match Layout::array::<T>(capacity) {
        Ok(layout) => layout,
        Err(_) => return Err(E::length_error(capacity, max_size)),
    };

    match allocator.allocate(layout) {
        Ok(ptr) => {
            trace!("allocated buffer of {capacity} elements ({} bytes)", layout.size());
            Ok(ptr.cast())
        }
        Err(_) => Err(E::allocation(layout)),
    }
}
