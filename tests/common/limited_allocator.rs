//! Shared by the unit tests and the integration tests; the including module provides
//! `Allocator` and `AllocError`.

use std::{alloc::Layout, cell::Cell, ptr::NonNull};

use super::{AllocError, Allocator};

/// Refuses every request that would bring the outstanding bytes above `limit`.
///
/// Refused requests are counted so tests can tell whether a failure came from here.
pub(crate) struct Limited<A> {
    in_use: Cell<usize>,
    peak: Cell<usize>,
    refused: Cell<usize>,
    limit: usize,
    inner: A,
}

#[allow(dead_code)]
impl<A> Limited<A> {
    pub(crate) fn new_in(limit: usize, inner: A) -> Self {
        Self {
            in_use: Cell::new(0),
            peak: Cell::new(0),
            refused: Cell::new(0),
            limit,
            inner,
        }
    }

    /// Bytes currently allocated.
    pub(crate) fn current(&self) -> usize {
        self.in_use.get()
    }

    /// The most bytes that were ever allocated at once.
    pub(crate) fn peak(&self) -> usize {
        self.peak.get()
    }

    /// How many requests were refused for exceeding the limit.
    pub(crate) fn refused(&self) -> usize {
        self.refused.get()
    }
}

unsafe impl<A: Allocator> Allocator for Limited<A> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        let wanted = match self.in_use.get().checked_add(layout.size()) {
            Some(wanted) if wanted <= self.limit => wanted,
            _ => {
                self.refused.set(self.refused.get() + 1);
                return Err(AllocError);
            }
        };

        let block = self.inner.allocate(layout)?;
        self.in_use.set(wanted);
        self.peak.set(self.peak.get().max(wanted));
        Ok(block)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.in_use.set(self.in_use.get() - layout.size());
        unsafe { self.inner.deallocate(ptr, layout) }
    }
}
