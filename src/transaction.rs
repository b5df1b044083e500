//! Drop guards that make multi-element construction all-or-nothing.
//!
//! Every guard commits with an explicit call. If it is dropped instead, which happens
//! when a constructor panics, it undoes exactly what it did so far: the constructed
//! elements are destroyed in reverse order and shifted elements are moved back.

use core::{mem, ptr, ptr::NonNull};

use crate::{alloc::Allocator, exact_size_iterator_bad_len};

/// Constructs a batch of elements into consecutive raw slots.
pub(crate) struct Transaction<'a, T, A: Allocator> {
    base: NonNull<T>,
    constructed: usize,
    allocator: &'a A,
}

impl<'a, T, A: Allocator> Transaction<'a, T, A> {
    /// # Safety
    ///
    /// `base` must point to raw slots with room for everything constructed through this transaction.
    #[inline(always)]
    pub(crate) unsafe fn new(base: NonNull<T>, allocator: &'a A) -> Self {
        Self {
            base,
            constructed: 0,
            allocator,
        }
    }

    #[inline(always)]
    pub(crate) fn construct_with(&mut self, f: impl FnOnce() -> T) {
        unsafe {
            let slot = self.base.add(self.constructed);
            self.allocator.construct(slot, f);
        }

        self.constructed += 1;
    }

    /// Constructs `count` elements taken from `iter`.
    ///
    /// # Panics
    ///
    /// Panics if `iter` runs out before `count` elements, after rolling back.
    pub(crate) fn construct_from_iter(&mut self, count: usize, iter: impl IntoIterator<Item = T>) {
        let mut iter = iter.into_iter();

        for _ in 0..count {
            match iter.next() {
                Some(value) => self.construct_with(|| value),
                None => exact_size_iterator_bad_len(),
            }
        }
    }

    #[inline(always)]
    pub(crate) fn constructed(&self) -> usize {
        self.constructed
    }

    /// Keeps the constructed elements and returns how many there are.
    #[inline(always)]
    pub(crate) fn commit(self) -> usize {
        let constructed = self.constructed;
        mem::forget(self);
        constructed
    }

    fn rollback(&mut self) {
        while self.constructed != 0 {
            self.constructed -= 1;

            unsafe {
                let slot = self.base.add(self.constructed);
                self.allocator.destroy(slot);
            }
        }
    }
}

impl<T, A: Allocator> Drop for Transaction<'_, T, A> {
    fn drop(&mut self) {
        self.rollback();
    }
}

/// Opens a gap of raw slots in the middle of the live elements and fills it.
///
/// The elements at and after the insertion index are shifted right by the gap size
/// before anything is constructed. Until [`commit`](Self::commit) the gap is the
/// only thing between a consistent vector and the caller, so the vector's length must
/// not be changed while it is open.
pub(crate) struct InsertGap<'a, T, A: Allocator> {
    fill: Transaction<'a, T, A>,
    gap: usize,
    tail_len: usize,
}

impl<'a, T, A: Allocator> InsertGap<'a, T, A> {
    /// # Safety
    ///
    /// `base` must point to a buffer whose first `len` slots are live and that has room for
    /// `len + gap` elements. `index` must not exceed `len`.
    pub(crate) unsafe fn open(base: NonNull<T>, index: usize, len: usize, gap: usize, allocator: &'a A) -> Self {
        debug_assert!(index <= len);

        let tail_len = len - index;

        unsafe {
            let hole = base.add(index);

            // the shifted-to slots past `len` were raw and the vacated ones become raw
            ptr::copy(hole.as_ptr(), hole.add(gap).as_ptr(), tail_len);

            Self {
                fill: Transaction::new(hole, allocator),
                gap,
                tail_len,
            }
        }
    }

    #[inline(always)]
    pub(crate) fn construct_with(&mut self, f: impl FnOnce() -> T) {
        debug_assert!(self.fill.constructed() < self.gap);
        self.fill.construct_with(f);
    }

    pub(crate) fn construct_from_iter(&mut self, iter: impl IntoIterator<Item = T>) {
        let remaining = self.gap - self.fill.constructed();
        self.fill.construct_from_iter(remaining, iter);
    }

    /// Keeps the inserted elements.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the gap was not filled completely.
    #[inline(always)]
    pub(crate) fn commit(self) {
        debug_assert_eq!(self.fill.constructed(), self.gap);
        mem::forget(self);
    }
}

impl<T, A: Allocator> Drop for InsertGap<'_, T, A> {
    fn drop(&mut self) {
        self.fill.rollback();

        unsafe {
            let hole = self.fill.base;
            ptr::copy(hole.add(self.gap).as_ptr(), hole.as_ptr(), self.tail_len);
        }
    }
}

/// Closes the gap left by erased elements, even if destroying them panics.
///
/// While it exists, the vector's length covers only the elements before the gap.
pub(crate) struct CloseGap<'a, T> {
    base: NonNull<T>,
    start: usize,
    end: usize,
    tail_len: usize,
    len: &'a mut usize,
}

impl<'a, T> CloseGap<'a, T> {
    /// # Safety
    ///
    /// `base` must point to a buffer whose slots `[end, end + tail_len)` are live,
    /// `start..end` must be the erased range and `*len` must be `start`.
    #[inline(always)]
    pub(crate) unsafe fn new(base: NonNull<T>, start: usize, end: usize, tail_len: usize, len: &'a mut usize) -> Self {
        debug_assert_eq!(*len, start);

        Self {
            base,
            start,
            end,
            tail_len,
            len,
        }
    }
}

impl<T> Drop for CloseGap<'_, T> {
    fn drop(&mut self) {
        unsafe {
            let src = self.base.add(self.end);
            let dst = self.base.add(self.start);
            ptr::copy(src.as_ptr(), dst.as_ptr(), self.tail_len);
        }

        *self.len = self.start + self.tail_len;
    }
}

/// Destroys `count` live elements starting at `base`, last one first.
///
/// # Safety
///
/// The slots must be live and must not be used again.
pub(crate) unsafe fn destroy_rev<T, A: Allocator>(allocator: &A, base: NonNull<T>, count: usize) {
    for i in (0..count).rev() {
        unsafe { allocator.destroy(base.add(i)) };
    }
}
