use std::{
    alloc::Layout,
    cell::{Cell, Ref, RefCell},
    collections::HashMap,
    panic::{RefUnwindSafe, UnwindSafe},
    ptr::NonNull,
};

use alloc_vec::alloc::{AllocError, Allocator};

/// Records every live block so tests can check for leaks, double frees and element bookkeeping.
#[derive(Default)]
pub(crate) struct InstrumentedAllocator<A: Allocator> {
    allocator: A,
    allocations: RefCell<HashMap<NonNull<u8>, Layout>>,
    allocation_count: Cell<usize>,
    constructed: Cell<usize>,
    destroyed: Cell<usize>,
}

impl<A: Allocator> UnwindSafe for InstrumentedAllocator<A> where A: UnwindSafe {}
impl<A: Allocator> RefUnwindSafe for InstrumentedAllocator<A> where A: RefUnwindSafe {}

impl<A: Allocator> InstrumentedAllocator<A> {
    pub(crate) fn new(allocator: A) -> Self {
        Self {
            allocator,
            allocations: Default::default(),
            allocation_count: Cell::new(0),
            constructed: Cell::new(0),
            destroyed: Cell::new(0),
        }
    }

    pub(crate) fn leaks(&self) -> Ref<'_, HashMap<NonNull<u8>, Layout>> {
        self.allocations.borrow()
    }

    /// How many blocks were allocated in total.
    pub(crate) fn allocation_count(&self) -> usize {
        self.allocation_count.get()
    }

    /// How many elements were constructed through this allocator.
    pub(crate) fn constructed(&self) -> usize {
        self.constructed.get()
    }

    /// How many elements were destroyed through this allocator.
    ///
    /// Elements moved out of a vector (`pop`, `remove`, consuming iteration) are not destroyed here.
    pub(crate) fn destroyed(&self) -> usize {
        self.destroyed.get()
    }
}

impl<A: Allocator> Drop for InstrumentedAllocator<A> {
    fn drop(&mut self) {
        for (ptr, layout) in self.allocations.get_mut().drain() {
            unsafe { self.allocator.deallocate(ptr, layout) }
        }
    }
}

unsafe impl<A: Allocator> Allocator for InstrumentedAllocator<A> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        let ptr = self.allocator.allocate(layout)?.cast();
        self.allocations.borrow_mut().insert(ptr, layout);
        self.allocation_count.set(self.allocation_count.get() + 1);
        // don't return a bigger slice than requested
        let slice = NonNull::slice_from_raw_parts(ptr, layout.size());
        Ok(slice)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        let found = self.allocations.borrow_mut().remove(&ptr).expect("foreign ptr");
        assert_eq!(found, layout, "deallocated with a different layout");
        unsafe { self.allocator.deallocate(ptr, layout) };
    }

    unsafe fn construct<T>(&self, slot: NonNull<T>, f: impl FnOnce() -> T) {
        unsafe { slot.write(f()) };
        self.constructed.set(self.constructed.get() + 1);
    }

    unsafe fn destroy<T>(&self, slot: NonNull<T>) {
        self.destroyed.set(self.destroyed.get() + 1);
        unsafe { slot.drop_in_place() };
    }
}
