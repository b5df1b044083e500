use core::alloc::Layout;

use crate::alloc::AllocError;

/// The error type returned by the `try_*` methods and the bounds-checked accessors of
/// [`AllocVec`](crate::AllocVec).
///
/// A failing element constructor (a panicking `Clone` or closure) is not represented here.
/// That panic unwinds through the vector, which rolls back whatever the operation had
/// constructed so far, and reaches the caller unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An index did not refer to an element (or, for insertion, to a position) of the vector.
    #[error("index {index} is out of range for a vector of length {len}")]
    OutOfRange {
        /// The rejected index.
        index: usize,
        /// The length of the vector at the time.
        len: usize,
    },

    /// A range did not lie within the vector.
    ///
    /// This is the range form of [`OutOfRange`](Error::OutOfRange);
    /// [`is_out_of_range`](Error::is_out_of_range) matches both.
    #[error("range {start}..{end} is out of bounds for a vector of length {len}")]
    RangeOutOfBounds {
        /// The start of the rejected range.
        start: usize,
        /// The end of the rejected range.
        end: usize,
        /// The length of the vector at the time.
        len: usize,
    },

    /// A requested length or capacity is larger than [`max_size`](crate::AllocVec::max_size).
    #[error("requested {requested} elements but at most {max_size} are supported")]
    LengthError {
        /// The requested number of elements, `usize::MAX` if the computation overflowed.
        requested: usize,
        /// The largest number of elements the allocator can provide.
        max_size: usize,
    },

    /// The allocator could not provide a block of memory.
    #[error("memory allocation of {} bytes failed", .layout.size())]
    OutOfMemory {
        /// The layout of the failed request.
        layout: Layout,
    },
}

impl Error {
    /// Returns `true` for [`OutOfRange`](Error::OutOfRange) and [`RangeOutOfBounds`](Error::RangeOutOfBounds).
    ///
    /// # Examples
    /// ```
    /// # use alloc_vec::alloc_vec;
    /// let mut vec = alloc_vec![1, 2, 3];
    /// assert!(vec.try_erase(3).unwrap_err().is_out_of_range());
    /// assert!(vec.try_erase_range(2..5).unwrap_err().is_out_of_range());
    /// assert!(!vec.try_reserve(usize::MAX).unwrap_err().is_out_of_range());
    /// ```
    #[must_use]
    #[inline]
    pub const fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. } | Self::RangeOutOfBounds { .. })
    }
}

impl From<Error> for AllocError {
    #[inline(always)]
    fn from(_: Error) -> Self {
        AllocError
    }
}
