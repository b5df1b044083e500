use core::{fmt::Debug, iter::FusedIterator, slice};

use crate::{alloc::Allocator, raw_buffer::RawBuffer, transaction::destroy_rev};

macro_rules! into_iter_declaration {
    ($($allocator_parameter:tt)*) => {
        /// An iterator that moves out of a vector.
        ///
        /// This `struct` is created by the `into_iter` method on
        /// [`AllocVec`](crate::AllocVec::into_iter),
        /// (provided by the [`IntoIterator`] trait).
        ///
        /// Elements that are not yielded are destroyed, last to first, when the iterator is dropped.
        pub struct IntoIter<T, $($allocator_parameter)*>
        where
            A: Allocator,
        {
            buf: RawBuffer<T, A>,

            /// The live elements are `start..end`.
            start: usize,
            end: usize,
        }
    };
}

crate::maybe_default_allocator!(into_iter_declaration);

impl<T: Debug, A: Allocator> Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, A: Allocator> IntoIter<T, A> {
    /// # Safety
    ///
    /// The first `len` slots of `buf` must be live and owned by the iterator from now on.
    #[inline(always)]
    pub(super) unsafe fn new(buf: RawBuffer<T, A>, len: usize) -> Self {
        Self { buf, start: 0, end: len }
    }

    /// Returns the remaining items of this iterator as a slice.
    ///
    /// # Examples
    ///
    /// ```
    /// # use alloc_vec::alloc_vec;
    /// let vec = alloc_vec![1, 2, 3];
    /// let mut into_iter = vec.into_iter();
    /// assert_eq!(into_iter.as_slice(), &[1, 2, 3]);
    /// assert_eq!(into_iter.next(), Some(1));
    /// assert_eq!(into_iter.as_slice(), &[2, 3]);
    /// assert_eq!(into_iter.next_back(), Some(3));
    /// assert_eq!(into_iter.as_slice(), &[2]);
    /// ```
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.buf.slot(self.start).as_ptr(), self.end - self.start) }
    }

    /// Returns the remaining items of this iterator as a mutable slice.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.buf.slot(self.start).as_ptr(), self.end - self.start) }
    }

    /// Returns a reference to the allocator.
    #[must_use]
    #[inline(always)]
    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }

        let value = unsafe { self.buf.slot(self.start).read() };
        self.start += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }

    #[inline]
    fn count(self) -> usize {
        self.len()
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }

        self.end -= 1;
        Some(unsafe { self.buf.slot(self.end).read() })
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}
impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T, A: Allocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        let remaining = self.end - self.start;
        let first = self.start;

        // a panicking destructor must not make us destroy anything twice
        self.start = self.end;

        unsafe { destroy_rev(self.buf.allocator(), self.buf.slot(first), remaining) };
    }
}
