//! The [`AllocVec`] container and its owning iterator.

use core::{
    borrow::{Borrow, BorrowMut},
    fmt,
    hash::Hash,
    mem::{self, ManuallyDrop},
    ops::{Deref, DerefMut, Index, IndexMut, Range},
    ptr::{self, NonNull},
    slice::{self, SliceIndex},
};

use crate::{
    Error, ErrorBehavior,
    alloc::Allocator,
    panic_on_error,
    raw_buffer::RawBuffer,
    transaction::{CloseGap, InsertGap, Transaction, destroy_rev},
};

#[cfg(feature = "alloc")]
use crate::alloc::Global;

mod into_iter;

pub use into_iter::IntoIter;

/// This is like `vec!` but allocates inside an allocator.
///
/// Without `in`, the vector uses [`Global`](crate::alloc::Global).
///
/// - Create an empty [`AllocVec`]:
/// ```
/// # use alloc_vec::{alloc_vec, AllocVec};
/// let vec: AllocVec<i32> = alloc_vec![];
/// assert!(vec.is_empty());
/// ```
///
/// - Create an [`AllocVec`] containing a given list of elements:
///
/// ```
/// # use alloc_vec::{alloc_vec, alloc::Global};
/// let vec = alloc_vec![in Global; 1, 2, 3];
/// assert_eq!(vec[0], 1);
/// assert_eq!(vec[1], 2);
/// assert_eq!(vec[2], 3);
/// ```
///
/// - Create an [`AllocVec`] from a given element and size:
///
/// ```
/// # use alloc_vec::alloc_vec;
/// let vec = alloc_vec!['a'; 5];
/// assert_eq!(vec, ['a'; 5]);
/// ```
///
/// This will use `clone` to duplicate an expression, so one should be careful
/// using this with types having a nonstandard `Clone` implementation.
///
/// Also, note that `alloc_vec![expr; 0]` is allowed, and produces an empty vector.
/// This will still evaluate `expr`, however, and immediately drop the resulting value.
#[macro_export]
macro_rules! alloc_vec {
    [in $allocator:expr] => {
        $crate::AllocVec::new_in($allocator)
    };
    [in $allocator:expr; $($values:expr),* $(,)?] => {
        $crate::AllocVec::from_array_in([$($values),*], $allocator)
    };
    [in $allocator:expr; $value:expr; $count:expr] => {
        $crate::AllocVec::from_elem_in($value, $count, $allocator)
    };
    [try in $allocator:expr] => {
        Ok::<_, $crate::Error>($crate::AllocVec::new_in($allocator))
    };
    [try in $allocator:expr; $($values:expr),* $(,)?] => {
        $crate::AllocVec::try_from_array_in([$($values),*], $allocator)
    };
    [try in $allocator:expr; $value:expr; $count:expr] => {
        $crate::AllocVec::try_from_elem_in($value, $count, $allocator)
    };
    [] => {
        $crate::AllocVec::new()
    };
    [$value:expr; $count:expr] => {
        $crate::AllocVec::from_elem($value, $count)
    };
    [$($values:expr),+ $(,)?] => {
        $crate::AllocVec::from_array([$($values),+])
    };
}

macro_rules! alloc_vec_declaration {
    ($($allocator_parameter:tt)*) => {
        /// A contiguous growable array whose memory and elements are managed through an [`Allocator`].
        ///
        /// The first `len` slots of the buffer hold live elements, the remaining `capacity - len`
        /// slots are raw memory. The buffer is allocated lazily, grows geometrically and is released
        /// exactly once.
        ///
        /// Allocating operations come in two flavours: `op` panics when memory cannot be provided
        /// (feature `panic-on-alloc`) and `try_op` returns an [`Error`] instead. A panic raised by
        /// an element constructor (`Clone::clone` or a user closure) is never caught; before it
        /// leaves the vector, everything the operation constructed so far is destroyed in reverse
        /// order and the vector is valid again.
        ///
        /// # Examples
        ///
        /// ```
        /// use alloc_vec::AllocVec;
        ///
        /// let mut vec = AllocVec::new();
        /// vec.push(1);
        /// vec.push(2);
        /// vec.insert(1, 3);
        ///
        /// assert_eq!(vec, [1, 3, 2]);
        /// assert_eq!(vec.erase(0), 0);
        /// assert_eq!(vec, [3, 2]);
        /// ```
        pub struct AllocVec<T, $($allocator_parameter)*>
        where
            A: Allocator,
        {
            buf: RawBuffer<T, A>,
            len: usize,
        }
    };
}

crate::maybe_default_allocator!(alloc_vec_declaration);

#[cfg(feature = "alloc")]
impl<T> AllocVec<T, Global> {
    /// Constructs a new, empty `AllocVec<T>` that uses the global allocator.
    ///
    /// The vector will not allocate until elements are pushed onto it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use alloc_vec::AllocVec;
    /// # #[allow(unused_mut)]
    /// let mut vec: AllocVec<i32> = AllocVec::new();
    /// assert_eq!(vec.capacity(), 0);
    /// ```
    #[must_use]
    #[inline(always)]
    pub const fn new() -> Self {
        Self::new_in(Global)
    }

    /// Constructs a new, empty `AllocVec<T>` with room for exactly `capacity` elements.
    ///
    /// # Panics
    /// Panics if the allocation fails or `capacity` exceeds [`max_size`](Self::max_size).
    #[must_use]
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(capacity, Global)
    }

    /// Constructs a new, empty `AllocVec<T>` with room for exactly `capacity` elements.
    ///
    /// # Errors
    /// Errors if the allocation fails or `capacity` exceeds [`max_size`](Self::max_size).
    #[inline(always)]
    pub fn try_with_capacity(capacity: usize) -> Result<Self, Error> {
        Self::try_with_capacity_in(capacity, Global)
    }

    /// Constructs a vector of `count` clones of `value`.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    ///
    /// # Examples
    /// ```
    /// # use alloc_vec::AllocVec;
    /// let vec = AllocVec::from_elem('a', 5);
    /// assert_eq!(vec, ['a'; 5]);
    /// assert!(vec.capacity() >= 5);
    /// ```
    #[must_use]
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn from_elem(value: T, count: usize) -> Self
    where
        T: Clone,
    {
        Self::from_elem_in(value, count, Global)
    }

    /// Constructs a vector of `count` clones of `value`.
    ///
    /// # Errors
    /// Errors if the allocation fails.
    #[inline(always)]
    pub fn try_from_elem(value: T, count: usize) -> Result<Self, Error>
    where
        T: Clone,
    {
        Self::try_from_elem_in(value, count, Global)
    }

    /// Constructs a vector holding clones of the elements of `slice`.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    #[must_use]
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn from_slice(slice: &[T]) -> Self
    where
        T: Clone,
    {
        Self::from_slice_in(slice, Global)
    }

    /// Constructs a vector holding clones of the elements of `slice`.
    ///
    /// # Errors
    /// Errors if the allocation fails.
    #[inline(always)]
    pub fn try_from_slice(slice: &[T]) -> Result<Self, Error>
    where
        T: Clone,
    {
        Self::try_from_slice_in(slice, Global)
    }

    /// Constructs a vector holding the elements of `array`.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    #[must_use]
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn from_array<const N: usize>(array: [T; N]) -> Self {
        Self::from_array_in(array, Global)
    }

    /// Constructs a vector holding the elements of `array`.
    ///
    /// # Errors
    /// Errors if the allocation fails.
    #[inline(always)]
    pub fn try_from_array<const N: usize>(array: [T; N]) -> Result<Self, Error> {
        Self::try_from_array_in(array, Global)
    }
}

impl<T, A: Allocator> AllocVec<T, A> {
    /// Constructs a new, empty `AllocVec<T, A>`.
    ///
    /// The vector will not allocate until elements are pushed onto it.
    #[must_use]
    #[inline(always)]
    pub const fn new_in(allocator: A) -> Self {
        Self {
            buf: RawBuffer::new_in(allocator),
            len: 0,
        }
    }

    /// Constructs a new, empty vector with room for exactly `capacity` elements.
    ///
    /// If `capacity` is 0, the vector will not allocate.
    /// When `T` is a zero-sized type, there will be no allocation and the capacity will always be `usize::MAX`.
    ///
    /// # Panics
    /// Panics if the allocation fails or `capacity` exceeds [`max_size`](Self::max_size).
    #[must_use]
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn with_capacity_in(capacity: usize, allocator: A) -> Self {
        panic_on_error(Self::generic_with_capacity_in(capacity, allocator))
    }

    /// Constructs a new, empty vector with room for exactly `capacity` elements.
    ///
    /// # Errors
    /// Errors if the allocation fails or `capacity` exceeds [`max_size`](Self::max_size).
    ///
    /// # Examples
    /// ```
    /// # use alloc_vec::{AllocVec, alloc::Global, Error};
    /// let vec = AllocVec::<u64, _>::try_with_capacity_in(10, Global)?;
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.capacity(), 10);
    ///
    /// let too_big = AllocVec::<u64, _>::try_with_capacity_in(usize::MAX, Global);
    /// assert!(matches!(too_big, Err(Error::LengthError { .. })));
    /// # Ok::<(), Error>(())
    /// ```
    #[inline(always)]
    pub fn try_with_capacity_in(capacity: usize, allocator: A) -> Result<Self, Error> {
        Self::generic_with_capacity_in(capacity, allocator)
    }

    #[inline]
    pub(crate) fn generic_with_capacity_in<E: ErrorBehavior>(capacity: usize, allocator: A) -> Result<Self, E> {
        Ok(Self {
            buf: RawBuffer::generic_with_capacity_in::<E>(capacity, allocator)?,
            len: 0,
        })
    }

    /// Constructs a vector of `count` clones of `value`.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    #[must_use]
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn from_elem_in(value: T, count: usize, allocator: A) -> Self
    where
        T: Clone,
    {
        panic_on_error(Self::generic_from_elem_in(value, count, allocator))
    }

    /// Constructs a vector of `count` clones of `value`.
    ///
    /// # Errors
    /// Errors if the allocation fails.
    #[inline(always)]
    pub fn try_from_elem_in(value: T, count: usize, allocator: A) -> Result<Self, Error>
    where
        T: Clone,
    {
        Self::generic_from_elem_in(value, count, allocator)
    }

    pub(crate) fn generic_from_elem_in<E: ErrorBehavior>(value: T, count: usize, allocator: A) -> Result<Self, E>
    where
        T: Clone,
    {
        let mut vec = Self::generic_with_capacity_in::<E>(count, allocator)?;
        unsafe { vec.extend_with_unchecked(count, value) };
        Ok(vec)
    }

    /// Constructs a vector of `count` elements where the element at index `i` is `f(i)`.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    ///
    /// # Examples
    /// ```
    /// # use alloc_vec::{AllocVec, alloc::Global};
    /// let vec = AllocVec::from_fn_in(4, |i| i * i, Global);
    /// assert_eq!(vec, [0, 1, 4, 9]);
    /// ```
    #[must_use]
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn from_fn_in(count: usize, f: impl FnMut(usize) -> T, allocator: A) -> Self {
        panic_on_error(Self::generic_from_fn_in(count, f, allocator))
    }

    /// Constructs a vector of `count` elements where the element at index `i` is `f(i)`.
    ///
    /// # Errors
    /// Errors if the allocation fails.
    #[inline(always)]
    pub fn try_from_fn_in(count: usize, f: impl FnMut(usize) -> T, allocator: A) -> Result<Self, Error> {
        Self::generic_from_fn_in(count, f, allocator)
    }

    pub(crate) fn generic_from_fn_in<E: ErrorBehavior>(
        count: usize,
        mut f: impl FnMut(usize) -> T,
        allocator: A,
    ) -> Result<Self, E> {
        let mut vec = Self::generic_with_capacity_in::<E>(count, allocator)?;

        unsafe {
            vec.construct_back(|tx| {
                for i in 0..count {
                    tx.construct_with(|| f(i));
                }
            });
        }

        Ok(vec)
    }

    /// Constructs a vector of `count` default values.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    #[must_use]
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn from_default_in(count: usize, allocator: A) -> Self
    where
        T: Default,
    {
        panic_on_error(Self::generic_from_fn_in(count, |_| T::default(), allocator))
    }

    /// Constructs a vector of `count` default values.
    ///
    /// # Errors
    /// Errors if the allocation fails.
    #[inline(always)]
    pub fn try_from_default_in(count: usize, allocator: A) -> Result<Self, Error>
    where
        T: Default,
    {
        Self::generic_from_fn_in(count, |_| T::default(), allocator)
    }

    /// Constructs a vector holding clones of the elements of `slice`.
    ///
    /// The capacity is exactly `slice.len()`.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    #[must_use]
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn from_slice_in(slice: &[T], allocator: A) -> Self
    where
        T: Clone,
    {
        panic_on_error(Self::generic_from_slice_in(slice, allocator))
    }

    /// Constructs a vector holding clones of the elements of `slice`.
    ///
    /// # Errors
    /// Errors if the allocation fails.
    #[inline(always)]
    pub fn try_from_slice_in(slice: &[T], allocator: A) -> Result<Self, Error>
    where
        T: Clone,
    {
        Self::generic_from_slice_in(slice, allocator)
    }

    pub(crate) fn generic_from_slice_in<E: ErrorBehavior>(slice: &[T], allocator: A) -> Result<Self, E>
    where
        T: Clone,
    {
        let mut vec = Self::generic_with_capacity_in::<E>(slice.len(), allocator)?;
        unsafe { vec.extend_from_slice_unchecked(slice) };
        Ok(vec)
    }

    /// Constructs a vector holding the elements of `array`.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    #[must_use]
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn from_array_in<const N: usize>(array: [T; N], allocator: A) -> Self {
        panic_on_error(Self::generic_from_array_in(array, allocator))
    }

    /// Constructs a vector holding the elements of `array`.
    ///
    /// # Errors
    /// Errors if the allocation fails.
    #[inline(always)]
    pub fn try_from_array_in<const N: usize>(array: [T; N], allocator: A) -> Result<Self, Error> {
        Self::generic_from_array_in(array, allocator)
    }

    pub(crate) fn generic_from_array_in<const N: usize, E: ErrorBehavior>(array: [T; N], allocator: A) -> Result<Self, E> {
        let mut vec = Self::generic_with_capacity_in::<E>(N, allocator)?;
        unsafe { vec.construct_back(|tx| tx.construct_from_iter(N, array)) };
        Ok(vec)
    }

    /// Constructs a vector from the items of `iter`.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    ///
    /// # Examples
    /// ```
    /// # use alloc_vec::{AllocVec, alloc::Global};
    /// let vec = AllocVec::from_iter_in((1..=3).map(|i| i * 10), Global);
    /// assert_eq!(vec, [10, 20, 30]);
    /// ```
    #[must_use]
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn from_iter_in<I>(iter: I, allocator: A) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        panic_on_error(Self::generic_from_iter_in(iter, allocator))
    }

    /// Constructs a vector from the items of `iter`.
    ///
    /// # Errors
    /// Errors if the allocation fails.
    #[inline(always)]
    pub fn try_from_iter_in<I>(iter: I, allocator: A) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
    {
        Self::generic_from_iter_in(iter, allocator)
    }

    pub(crate) fn generic_from_iter_in<E: ErrorBehavior, I>(iter: I, allocator: A) -> Result<Self, E>
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();

        let mut vec = Self::generic_with_capacity_in::<E>(lower, allocator)?;
        vec.generic_extend::<E, _>(iter)?;
        Ok(vec)
    }

    /// Returns the number of elements in the vector.
    #[must_use]
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the vector contains no elements.
    #[must_use]
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the vector can hold without reallocating.
    ///
    /// This is `usize::MAX` for zero-sized types.
    #[must_use]
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns the largest number of elements this vector's allocator could ever provide.
    #[must_use]
    #[inline(always)]
    pub fn max_size(&self) -> usize {
        self.buf.max_size()
    }

    /// Returns a reference to the allocator.
    #[must_use]
    #[inline(always)]
    pub const fn allocator(&self) -> &A {
        self.buf.allocator()
    }

    /// Returns a raw pointer to the buffer, or a dangling raw pointer
    /// valid for zero sized reads if the vector didn't allocate.
    #[must_use]
    #[inline(always)]
    pub const fn as_ptr(&self) -> *const T {
        self.buf.ptr().as_ptr()
    }

    /// Returns an unsafe mutable pointer to the buffer, or a dangling
    /// raw pointer valid for zero sized reads if the vector didn't allocate.
    #[must_use]
    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr().as_ptr()
    }

    /// Returns a `NonNull` pointer to the buffer.
    #[must_use]
    #[inline(always)]
    pub const fn as_non_null(&self) -> NonNull<T> {
        self.buf.ptr()
    }

    /// Extracts a slice containing the entire vector.
    #[must_use]
    #[inline(always)]
    pub const fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.buf.ptr().as_ptr(), self.len) }
    }

    /// Extracts a mutable slice of the entire vector.
    #[must_use]
    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.buf.ptr().as_ptr(), self.len) }
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    /// Errors with [`Error::OutOfRange`] if `index >= len`.
    ///
    /// # Examples
    /// ```
    /// # use alloc_vec::{alloc_vec, Error};
    /// let vec = alloc_vec![10, 20, 30];
    /// assert_eq!(vec.at(1), Ok(&20));
    /// assert_eq!(vec.at(3), Err(Error::OutOfRange { index: 3, len: 3 }));
    /// ```
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, Error> {
        match self.as_slice().get(index) {
            Some(element) => Ok(element),
            None => Err(Error::OutOfRange { index, len: self.len }),
        }
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    /// Errors with [`Error::OutOfRange`] if `index >= len`.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        let len = self.len;

        match self.as_mut_slice().get_mut(index) {
            Some(element) => Ok(element),
            None => Err(Error::OutOfRange { index, len }),
        }
    }

    /// Returns the first element, or `None` if the vector is empty.
    #[must_use]
    #[inline(always)]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Returns a mutable reference to the first element, or `None` if the vector is empty.
    #[must_use]
    #[inline(always)]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// Returns the last element, or `None` if the vector is empty.
    #[must_use]
    #[inline(always)]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Returns a mutable reference to the last element, or `None` if the vector is empty.
    #[must_use]
    #[inline(always)]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Forces the length of the vector to `new_len`.
    ///
    /// # Safety
    /// - `new_len` must be less than or equal to the [`capacity`](Self::capacity).
    /// - The elements at `old_len..new_len` must be initialized.
    #[inline(always)]
    pub unsafe fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= self.capacity());
        self.len = new_len;
    }

    /// Reserves capacity for at least `additional` more elements.
    ///
    /// Grows to the larger of `len + additional` and twice the current capacity.
    /// Growing an empty buffer allocates exactly `additional` slots.
    /// Does nothing if the capacity is already sufficient.
    ///
    /// # Panics
    /// Panics if the allocation fails or `len + additional` exceeds [`max_size`](Self::max_size).
    ///
    /// # Examples
    /// ```
    /// # use alloc_vec::AllocVec;
    /// let mut vec: AllocVec<i32> = AllocVec::new();
    /// vec.reserve(3);
    /// assert_eq!(vec.capacity(), 3);
    /// vec.extend([1, 2, 3]);
    /// vec.reserve(1);
    /// assert_eq!(vec.capacity(), 6);
    /// ```
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn reserve(&mut self, additional: usize) {
        panic_on_error(self.generic_reserve(additional));
    }

    /// Reserves capacity for at least `additional` more elements.
    ///
    /// # Errors
    /// Errors if the allocation fails or `len + additional` exceeds [`max_size`](Self::max_size).
    /// The vector is unchanged in that case.
    #[inline(always)]
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), Error> {
        self.generic_reserve(additional)
    }

    #[inline]
    pub(crate) fn generic_reserve<E: ErrorBehavior>(&mut self, additional: usize) -> Result<(), E> {
        if additional > self.capacity() - self.len {
            self.buf.generic_grow_amortized::<E>(self.len, additional)?;
        }

        Ok(())
    }

    /// Reserves capacity for exactly `len + additional` elements.
    ///
    /// # Panics
    /// Panics if the allocation fails or `len + additional` exceeds [`max_size`](Self::max_size).
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn reserve_exact(&mut self, additional: usize) {
        panic_on_error(self.generic_reserve_exact(additional));
    }

    /// Reserves capacity for exactly `len + additional` elements.
    ///
    /// # Errors
    /// Errors if the allocation fails or `len + additional` exceeds [`max_size`](Self::max_size).
    #[inline(always)]
    pub fn try_reserve_exact(&mut self, additional: usize) -> Result<(), Error> {
        self.generic_reserve_exact(additional)
    }

    #[inline]
    pub(crate) fn generic_reserve_exact<E: ErrorBehavior>(&mut self, additional: usize) -> Result<(), E> {
        if additional > self.capacity() - self.len {
            self.buf.generic_grow_exact::<E>(self.len, additional)?;
        }

        Ok(())
    }

    /// Shrinks the capacity to exactly `len`, releasing the buffer if the vector is empty.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    ///
    /// # Examples
    /// ```
    /// # use alloc_vec::AllocVec;
    /// let mut vec: AllocVec<i32> = AllocVec::with_capacity(10);
    /// vec.extend([1, 2, 3]);
    /// vec.shrink_to_fit();
    /// assert_eq!(vec.capacity(), 3);
    /// vec.clear();
    /// vec.shrink_to_fit();
    /// assert_eq!(vec.capacity(), 0);
    /// ```
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn shrink_to_fit(&mut self) {
        panic_on_error(self.generic_shrink_to_fit());
    }

    /// Shrinks the capacity to exactly `len`, releasing the buffer if the vector is empty.
    ///
    /// # Errors
    /// Errors if the allocation fails. The vector is unchanged in that case.
    #[inline(always)]
    pub fn try_shrink_to_fit(&mut self) -> Result<(), Error> {
        self.generic_shrink_to_fit()
    }

    #[inline]
    pub(crate) fn generic_shrink_to_fit<E: ErrorBehavior>(&mut self) -> Result<(), E> {
        self.buf.generic_shrink_to_fit(self.len)
    }

    /// Resizes the vector so that `len` is equal to `new_len`.
    ///
    /// If `new_len` is greater than `len`, the vector is extended by clones of `value`.
    /// If `new_len` is less than `len`, the vector is truncated.
    ///
    /// # Panics
    /// Panics if the allocation fails or `new_len` exceeds [`max_size`](Self::max_size).
    ///
    /// # Examples
    /// ```
    /// # use alloc_vec::alloc_vec;
    /// let mut vec = alloc_vec![1, 2, 3];
    /// vec.resize(5, 0);
    /// assert_eq!(vec, [1, 2, 3, 0, 0]);
    /// vec.resize(2, 0);
    /// assert_eq!(vec, [1, 2]);
    /// ```
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        panic_on_error(self.generic_resize(new_len, value));
    }

    /// Resizes the vector so that `len` is equal to `new_len`.
    ///
    /// # Errors
    /// Errors if the allocation fails or `new_len` exceeds [`max_size`](Self::max_size).
    #[inline(always)]
    pub fn try_resize(&mut self, new_len: usize, value: T) -> Result<(), Error>
    where
        T: Clone,
    {
        self.generic_resize(new_len, value)
    }

    pub(crate) fn generic_resize<E: ErrorBehavior>(&mut self, new_len: usize, value: T) -> Result<(), E>
    where
        T: Clone,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }

        let additional = new_len - self.len;
        self.generic_reserve::<E>(additional)?;
        unsafe { self.extend_with_unchecked(additional, value) };
        Ok(())
    }

    /// Resizes the vector so that `len` is equal to `new_len`, filling new slots with values returned by `f`.
    ///
    /// # Panics
    /// Panics if the allocation fails or `new_len` exceeds [`max_size`](Self::max_size).
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn resize_with(&mut self, new_len: usize, f: impl FnMut() -> T) {
        panic_on_error(self.generic_resize_with(new_len, f));
    }

    /// Resizes the vector so that `len` is equal to `new_len`, filling new slots with values returned by `f`.
    ///
    /// # Errors
    /// Errors if the allocation fails or `new_len` exceeds [`max_size`](Self::max_size).
    #[inline(always)]
    pub fn try_resize_with(&mut self, new_len: usize, f: impl FnMut() -> T) -> Result<(), Error> {
        self.generic_resize_with(new_len, f)
    }

    pub(crate) fn generic_resize_with<E: ErrorBehavior>(&mut self, new_len: usize, mut f: impl FnMut() -> T) -> Result<(), E> {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }

        let additional = new_len - self.len;
        self.generic_reserve::<E>(additional)?;

        unsafe {
            self.construct_back(|tx| {
                for _ in 0..additional {
                    tx.construct_with(&mut f);
                }
            });
        }

        Ok(())
    }

    /// Resizes the vector so that `len` is equal to `new_len`, filling new slots with default values.
    ///
    /// # Panics
    /// Panics if the allocation fails or `new_len` exceeds [`max_size`](Self::max_size).
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn resize_default(&mut self, new_len: usize)
    where
        T: Default,
    {
        panic_on_error(self.generic_resize_with(new_len, T::default));
    }

    /// Resizes the vector so that `len` is equal to `new_len`, filling new slots with default values.
    ///
    /// # Errors
    /// Errors if the allocation fails or `new_len` exceeds [`max_size`](Self::max_size).
    #[inline(always)]
    pub fn try_resize_default(&mut self, new_len: usize) -> Result<(), Error>
    where
        T: Default,
    {
        self.generic_resize_with(new_len, T::default)
    }

    /// Appends an element to the back of the vector.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn push(&mut self, value: T) {
        panic_on_error(self.generic_push(value));
    }

    /// Appends an element to the back of the vector.
    ///
    /// # Errors
    /// Errors if the allocation fails. The vector is unchanged in that case.
    #[inline(always)]
    pub fn try_push(&mut self, value: T) -> Result<(), Error> {
        self.generic_push(value)
    }

    #[inline]
    pub(crate) fn generic_push<E: ErrorBehavior>(&mut self, value: T) -> Result<(), E> {
        self.generic_push_with::<E>(|| value)?;
        Ok(())
    }

    /// Reserves space for one more element, then constructs it in place from `f`.
    ///
    /// Returns a reference to the new element. If `f` panics, the vector is unchanged.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    ///
    /// # Examples
    /// ```
    /// # use alloc_vec::alloc_vec;
    /// let mut vec = alloc_vec![1, 2];
    /// *vec.push_with(|| 3) += 1;
    /// assert_eq!(vec, [1, 2, 4]);
    /// ```
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn push_with(&mut self, f: impl FnOnce() -> T) -> &mut T {
        panic_on_error(self.generic_push_with(f))
    }

    /// Reserves space for one more element, then constructs it in place from `f`.
    ///
    /// # Errors
    /// Errors if the allocation fails. `f` is not called in that case.
    #[inline(always)]
    pub fn try_push_with(&mut self, f: impl FnOnce() -> T) -> Result<&mut T, Error> {
        self.generic_push_with(f)
    }

    #[inline]
    pub(crate) fn generic_push_with<E: ErrorBehavior>(&mut self, f: impl FnOnce() -> T) -> Result<&mut T, E> {
        if self.len == self.capacity() {
            self.buf.generic_grow_amortized::<E>(self.len, 1)?;
        }

        Ok(unsafe { self.push_with_unchecked(f) })
    }

    /// Removes the last element and returns it, or `None` if the vector is empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;
        unsafe { Some(self.buf.slot(self.len).read()) }
    }

    /// Inserts an element at `index`, shifting all elements after it to the right.
    ///
    /// # Panics
    /// Panics if the allocation fails or `index > len`.
    ///
    /// # Examples
    /// ```
    /// # use alloc_vec::alloc_vec;
    /// let mut vec = alloc_vec![1, 2, 3];
    /// vec.insert(1, 4);
    /// assert_eq!(vec, [1, 4, 2, 3]);
    /// vec.insert(4, 5);
    /// assert_eq!(vec, [1, 4, 2, 3, 5]);
    /// ```
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn insert(&mut self, index: usize, value: T) {
        panic_on_error(self.generic_insert_with(index, || value));
    }

    /// Inserts an element at `index`, shifting all elements after it to the right.
    ///
    /// # Errors
    /// Errors if the allocation fails or `index > len`. The vector is unchanged in that case.
    #[inline(always)]
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), Error> {
        self.generic_insert_with::<Error>(index, || value)?;
        Ok(())
    }

    /// Constructs an element in place at `index`, shifting all elements after it to the right.
    ///
    /// Returns a reference to the new element.
    ///
    /// # Panics
    /// Panics if the allocation fails or `index > len`.
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn insert_with(&mut self, index: usize, f: impl FnOnce() -> T) -> &mut T {
        panic_on_error(self.generic_insert_with(index, f))
    }

    /// Constructs an element in place at `index`, shifting all elements after it to the right.
    ///
    /// # Errors
    /// Errors if the allocation fails or `index > len`. `f` is not called in that case.
    #[inline(always)]
    pub fn try_insert_with(&mut self, index: usize, f: impl FnOnce() -> T) -> Result<&mut T, Error> {
        self.generic_insert_with(index, f)
    }

    pub(crate) fn generic_insert_with<E: ErrorBehavior>(&mut self, index: usize, f: impl FnOnce() -> T) -> Result<&mut T, E> {
        self.generic_insert_gap::<E>(index, 1, |gap| gap.construct_with(f))?;
        Ok(unsafe { &mut *self.buf.slot(index).as_ptr() })
    }

    /// Inserts `count` clones of `value` at `index`.
    ///
    /// If a clone panics, the elements inserted so far are destroyed and the
    /// vector holds its original elements in their original order.
    ///
    /// # Panics
    /// Panics if the allocation fails or `index > len`.
    ///
    /// # Examples
    /// ```
    /// # use alloc_vec::alloc_vec;
    /// let mut vec = alloc_vec![1, 2, 3];
    /// vec.insert_n(1, 2, 9);
    /// assert_eq!(vec, [1, 9, 9, 2, 3]);
    /// ```
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn insert_n(&mut self, index: usize, count: usize, value: T)
    where
        T: Clone,
    {
        panic_on_error(self.generic_insert_n(index, count, value));
    }

    /// Inserts `count` clones of `value` at `index`.
    ///
    /// # Errors
    /// Errors if the allocation fails or `index > len`.
    #[inline(always)]
    pub fn try_insert_n(&mut self, index: usize, count: usize, value: T) -> Result<(), Error>
    where
        T: Clone,
    {
        self.generic_insert_n(index, count, value)
    }

    pub(crate) fn generic_insert_n<E: ErrorBehavior>(&mut self, index: usize, count: usize, value: T) -> Result<(), E>
    where
        T: Clone,
    {
        self.generic_insert_gap(index, count, |gap| {
            if count == 0 {
                return;
            }

            for _ in 1..count {
                gap.construct_with(|| value.clone());
            }

            gap.construct_with(|| value);
        })
    }

    /// Inserts clones of the elements of `slice` at `index`.
    ///
    /// # Panics
    /// Panics if the allocation fails or `index > len`.
    ///
    /// # Examples
    /// ```
    /// # use alloc_vec::alloc_vec;
    /// let mut vec = alloc_vec![1, 5];
    /// vec.insert_from_slice(1, &[2, 3, 4]);
    /// assert_eq!(vec, [1, 2, 3, 4, 5]);
    /// ```
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn insert_from_slice(&mut self, index: usize, slice: &[T])
    where
        T: Clone,
    {
        panic_on_error(self.generic_insert_from_slice(index, slice));
    }

    /// Inserts clones of the elements of `slice` at `index`.
    ///
    /// # Errors
    /// Errors if the allocation fails or `index > len`.
    #[inline(always)]
    pub fn try_insert_from_slice(&mut self, index: usize, slice: &[T]) -> Result<(), Error>
    where
        T: Clone,
    {
        self.generic_insert_from_slice(index, slice)
    }

    pub(crate) fn generic_insert_from_slice<E: ErrorBehavior>(&mut self, index: usize, slice: &[T]) -> Result<(), E>
    where
        T: Clone,
    {
        self.generic_insert_gap(index, slice.len(), |gap| {
            for value in slice {
                gap.construct_with(|| value.clone());
            }
        })
    }

    /// Inserts the items of an exact size iterator at `index`.
    ///
    /// # Panics
    /// Panics if the allocation fails or `index > len`.
    ///
    /// Panics if the iterator yields fewer items than its reported length.
    /// The vector is restored before the panic leaves this function.
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn insert_iter<I>(&mut self, index: usize, iter: I)
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        panic_on_error(self.generic_insert_iter(index, iter));
    }

    /// Inserts the items of an exact size iterator at `index`.
    ///
    /// # Panics
    /// Panics if the iterator yields fewer items than its reported length.
    ///
    /// # Errors
    /// Errors if the allocation fails or `index > len`.
    #[inline(always)]
    pub fn try_insert_iter<I>(&mut self, index: usize, iter: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        self.generic_insert_iter(index, iter)
    }

    pub(crate) fn generic_insert_iter<E: ErrorBehavior, I>(&mut self, index: usize, iter: I) -> Result<(), E>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = iter.into_iter();
        let count = iter.len();
        self.generic_insert_gap(index, count, |gap| gap.construct_from_iter(iter))
    }

    /// Opens a gap of `count` slots at `index`, lets `fill` construct exactly `count` elements into it
    /// and only then adds them to the length.
    fn generic_insert_gap<E: ErrorBehavior>(
        &mut self,
        index: usize,
        count: usize,
        fill: impl FnOnce(&mut InsertGap<'_, T, A>),
    ) -> Result<(), E> {
        if index > self.len {
            return Err(E::out_of_range(index, self.len));
        }

        self.generic_reserve::<E>(count)?;

        unsafe {
            let mut gap = InsertGap::open(self.buf.ptr(), index, self.len, count, self.buf.allocator());
            fill(&mut gap);
            gap.commit();
        }

        self.len += count;
        Ok(())
    }

    /// Removes the element at `index`, shifting all elements after it to the left.
    ///
    /// Returns `index`, which now refers to the element that followed the erased one.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    ///
    /// # Examples
    /// ```
    /// # use alloc_vec::alloc_vec;
    /// let mut vec = alloc_vec![1, 2, 3];
    /// assert_eq!(vec.erase(1), 1);
    /// assert_eq!(vec, [1, 3]);
    /// ```
    #[inline(always)]
    pub fn erase(&mut self, index: usize) -> usize {
        panic_on_error(self.generic_erase(index))
    }

    /// Removes the element at `index`, shifting all elements after it to the left.
    ///
    /// # Errors
    /// Errors with [`Error::OutOfRange`] if `index >= len`.
    #[inline(always)]
    pub fn try_erase(&mut self, index: usize) -> Result<usize, Error> {
        self.generic_erase(index)
    }

    pub(crate) fn generic_erase<E: ErrorBehavior>(&mut self, index: usize) -> Result<usize, E> {
        if index >= self.len {
            return Err(E::out_of_range(index, self.len));
        }

        self.generic_erase_range(index..index + 1)
    }

    /// Removes the elements in `range`, shifting all elements after it to the left.
    ///
    /// The removed elements are destroyed last to first. Returns `range.start`.
    /// An empty range leaves the vector untouched.
    ///
    /// # Panics
    /// Panics if `range.start > range.end` or `range.end > len`.
    ///
    /// # Examples
    /// ```
    /// # use alloc_vec::alloc_vec;
    /// let mut vec = alloc_vec![1, 2, 3, 4, 5];
    /// assert_eq!(vec.erase_range(1..3), 1);
    /// assert_eq!(vec, [1, 4, 5]);
    /// assert_eq!(vec.erase_range(2..2), 2);
    /// assert_eq!(vec, [1, 4, 5]);
    /// ```
    #[inline(always)]
    pub fn erase_range(&mut self, range: Range<usize>) -> usize {
        panic_on_error(self.generic_erase_range(range))
    }

    /// Removes the elements in `range`, shifting all elements after it to the left.
    ///
    /// # Errors
    /// Errors with [`Error::RangeOutOfBounds`] if `range.start > range.end` or `range.end > len`.
    #[inline(always)]
    pub fn try_erase_range(&mut self, range: Range<usize>) -> Result<usize, Error> {
        self.generic_erase_range(range)
    }

    pub(crate) fn generic_erase_range<E: ErrorBehavior>(&mut self, range: Range<usize>) -> Result<usize, E> {
        let Range { start, end } = range;

        if start > end || end > self.len {
            return Err(E::range_out_of_bounds(start, end, self.len));
        }

        if start == end {
            return Ok(start);
        }

        let tail_len = self.len - end;
        let base = self.buf.ptr();

        self.len = start;

        unsafe {
            let _close = CloseGap::new(base, start, end, tail_len, &mut self.len);
            destroy_rev(self.buf.allocator(), base.add(start), end - start);
        }

        Ok(start)
    }

    /// Removes and returns the element at `index`, shifting all elements after it to the left.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    #[inline(always)]
    pub fn remove(&mut self, index: usize) -> T {
        panic_on_error(self.generic_remove(index))
    }

    /// Removes and returns the element at `index`, shifting all elements after it to the left.
    ///
    /// # Errors
    /// Errors with [`Error::OutOfRange`] if `index >= len`.
    #[inline(always)]
    pub fn try_remove(&mut self, index: usize) -> Result<T, Error> {
        self.generic_remove(index)
    }

    pub(crate) fn generic_remove<E: ErrorBehavior>(&mut self, index: usize) -> Result<T, E> {
        let len = self.len;

        if index >= len {
            return Err(E::out_of_range(index, len));
        }

        unsafe {
            let hole = self.buf.slot(index);
            let value = hole.read();
            ptr::copy(hole.add(1).as_ptr(), hole.as_ptr(), len - index - 1);
            self.len = len - 1;
            Ok(value)
        }
    }

    /// Removes an element from the vector and returns it.
    ///
    /// The removed element is replaced by the last element of the vector.
    /// This does not preserve ordering, but is *O*(1).
    ///
    /// # Panics
    /// Panics if `index >= len`.
    ///
    /// # Examples
    /// ```
    /// # use alloc_vec::alloc_vec;
    /// let mut vec = alloc_vec!["foo", "bar", "baz", "qux"];
    /// assert_eq!(vec.swap_remove(1), "bar");
    /// assert_eq!(vec, ["foo", "qux", "baz"]);
    /// ```
    #[inline(always)]
    pub fn swap_remove(&mut self, index: usize) -> T {
        panic_on_error(self.generic_swap_remove(index))
    }

    /// Removes an element from the vector and returns it, replacing it with the last element.
    ///
    /// # Errors
    /// Errors with [`Error::OutOfRange`] if `index >= len`.
    #[inline(always)]
    pub fn try_swap_remove(&mut self, index: usize) -> Result<T, Error> {
        self.generic_swap_remove(index)
    }

    pub(crate) fn generic_swap_remove<E: ErrorBehavior>(&mut self, index: usize) -> Result<T, E> {
        let len = self.len;

        if index >= len {
            return Err(E::out_of_range(index, len));
        }

        unsafe {
            let last = self.buf.slot(len - 1).read();
            let hole = self.buf.slot(index);
            self.len = len - 1;
            Ok(mem::replace(&mut *hole.as_ptr(), last))
        }
    }

    /// Shortens the vector, keeping the first `len` elements and destroying the rest last to first.
    ///
    /// Does nothing if `len` is greater than or equal to the vector's current length.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }

        let remaining = self.len - len;
        self.len = len;

        unsafe { destroy_rev(self.buf.allocator(), self.buf.slot(len), remaining) };
    }

    /// Destroys all elements, last to first. The capacity is unchanged.
    #[inline(always)]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Replaces the contents of the vector with clones of the elements of `slice`.
    ///
    /// The old elements are destroyed before the new ones are constructed, so on failure
    /// the vector is left empty.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn assign_from_slice(&mut self, slice: &[T])
    where
        T: Clone,
    {
        panic_on_error(self.generic_assign_from_slice(slice));
    }

    /// Replaces the contents of the vector with clones of the elements of `slice`.
    ///
    /// # Errors
    /// Errors if the allocation fails. The vector is left empty in that case.
    #[inline(always)]
    pub fn try_assign_from_slice(&mut self, slice: &[T]) -> Result<(), Error>
    where
        T: Clone,
    {
        self.generic_assign_from_slice(slice)
    }

    pub(crate) fn generic_assign_from_slice<E: ErrorBehavior>(&mut self, slice: &[T]) -> Result<(), E>
    where
        T: Clone,
    {
        self.clear();
        self.generic_reserve_exact::<E>(slice.len())?;
        unsafe { self.extend_from_slice_unchecked(slice) };
        Ok(())
    }

    /// Replaces the contents of the vector with `count` clones of `value`.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn assign_n(&mut self, count: usize, value: T)
    where
        T: Clone,
    {
        panic_on_error(self.generic_assign_n(count, value));
    }

    /// Replaces the contents of the vector with `count` clones of `value`.
    ///
    /// # Errors
    /// Errors if the allocation fails. The vector is left empty in that case.
    #[inline(always)]
    pub fn try_assign_n(&mut self, count: usize, value: T) -> Result<(), Error>
    where
        T: Clone,
    {
        self.generic_assign_n(count, value)
    }

    pub(crate) fn generic_assign_n<E: ErrorBehavior>(&mut self, count: usize, value: T) -> Result<(), E>
    where
        T: Clone,
    {
        self.clear();
        self.generic_reserve_exact::<E>(count)?;
        unsafe { self.extend_with_unchecked(count, value) };
        Ok(())
    }

    /// Replaces the contents of the vector with the items of `iter`.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn assign_iter<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        panic_on_error(self.generic_assign_iter(iter));
    }

    /// Replaces the contents of the vector with the items of `iter`.
    ///
    /// # Errors
    /// Errors if the allocation fails. The vector holds the items assigned so far in that case.
    #[inline(always)]
    pub fn try_assign_iter<I>(&mut self, iter: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
    {
        self.generic_assign_iter(iter)
    }

    pub(crate) fn generic_assign_iter<E: ErrorBehavior, I>(&mut self, iter: I) -> Result<(), E>
    where
        I: IntoIterator<Item = T>,
    {
        self.clear();
        self.generic_extend(iter)
    }

    /// Appends clones of the elements of `slice`.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn extend_from_slice(&mut self, slice: &[T])
    where
        T: Clone,
    {
        panic_on_error(self.generic_extend_from_slice(slice));
    }

    /// Appends clones of the elements of `slice`.
    ///
    /// # Errors
    /// Errors if the allocation fails. The vector is unchanged in that case.
    #[inline(always)]
    pub fn try_extend_from_slice(&mut self, slice: &[T]) -> Result<(), Error>
    where
        T: Clone,
    {
        self.generic_extend_from_slice(slice)
    }

    pub(crate) fn generic_extend_from_slice<E: ErrorBehavior>(&mut self, slice: &[T]) -> Result<(), E>
    where
        T: Clone,
    {
        self.generic_reserve::<E>(slice.len())?;
        unsafe { self.extend_from_slice_unchecked(slice) };
        Ok(())
    }

    pub(crate) fn generic_extend<E: ErrorBehavior, I>(&mut self, iter: I) -> Result<(), E>
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.generic_reserve::<E>(lower)?;

        for value in iter {
            self.generic_push::<E>(value)?;
        }

        Ok(())
    }

    /// Exchanges the contents of two vectors, allocators included.
    ///
    /// This is *O*(1) and no element is constructed or destroyed.
    #[inline(always)]
    pub fn swap_with(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Clones the vector into a buffer of exactly `len` slots from `allocator`.
    ///
    /// If a clone panics, the elements cloned so far are destroyed and the new buffer is released.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    #[must_use]
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn clone_in<B: Allocator>(&self, allocator: B) -> AllocVec<T, B>
    where
        T: Clone,
    {
        panic_on_error(AllocVec::generic_from_slice_in(self.as_slice(), allocator))
    }

    /// Clones the vector into a buffer of exactly `len` slots from `allocator`.
    ///
    /// # Errors
    /// Errors if the allocation fails.
    #[inline(always)]
    pub fn try_clone_in<B: Allocator>(&self, allocator: B) -> Result<AllocVec<T, B>, Error>
    where
        T: Clone,
    {
        AllocVec::generic_from_slice_in(self.as_slice(), allocator)
    }

    /// Moves all elements into a new buffer from `allocator`, leaving this vector empty.
    ///
    /// This vector keeps its capacity. No element is cloned or dropped.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    ///
    /// # Examples
    /// ```
    /// # use alloc_vec::{alloc_vec, alloc::Global};
    /// let mut vec = alloc_vec![1, 2, 3];
    /// let moved = vec.transfer_in(Global);
    /// assert_eq!(moved, [1, 2, 3]);
    /// assert!(vec.is_empty());
    /// ```
    #[must_use]
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn transfer_in<B: Allocator>(&mut self, allocator: B) -> AllocVec<T, B> {
        panic_on_error(self.generic_transfer_in(allocator))
    }

    /// Moves all elements into a new buffer from `allocator`, leaving this vector empty.
    ///
    /// # Errors
    /// Errors if the allocation fails. This vector is unchanged in that case.
    #[inline(always)]
    pub fn try_transfer_in<B: Allocator>(&mut self, allocator: B) -> Result<AllocVec<T, B>, Error> {
        self.generic_transfer_in(allocator)
    }

    pub(crate) fn generic_transfer_in<E: ErrorBehavior, B: Allocator>(&mut self, allocator: B) -> Result<AllocVec<T, B>, E> {
        let len = self.len;
        let mut other = AllocVec::generic_with_capacity_in::<E>(len, allocator)?;

        unsafe {
            ptr::copy_nonoverlapping(self.as_ptr(), other.as_mut_ptr(), len);
            self.len = 0;
            other.len = len;
        }

        Ok(other)
    }

    /// Constructs an element after the last one.
    ///
    /// # Safety
    /// There must be room for one more element.
    #[inline(always)]
    unsafe fn push_with_unchecked(&mut self, f: impl FnOnce() -> T) -> &mut T {
        debug_assert!(self.len < self.capacity());

        unsafe {
            let slot = self.buf.slot(self.len);
            self.buf.allocator().construct(slot, f);
            self.len += 1;
            &mut *slot.as_ptr()
        }
    }

    /// Constructs a batch of elements after the last one. The length only grows once `fill` returns.
    ///
    /// # Safety
    /// There must be room for every element `fill` constructs.
    #[inline(always)]
    unsafe fn construct_back(&mut self, fill: impl FnOnce(&mut Transaction<'_, T, A>)) {
        let mut tx = unsafe { Transaction::new(self.buf.slot(self.len), self.buf.allocator()) };
        fill(&mut tx);
        let constructed = tx.commit();
        self.len += constructed;
    }

    /// # Safety
    /// There must be room for `count` more elements.
    unsafe fn extend_with_unchecked(&mut self, count: usize, value: T)
    where
        T: Clone,
    {
        unsafe {
            self.construct_back(|tx| {
                if count == 0 {
                    return;
                }

                for _ in 1..count {
                    tx.construct_with(|| value.clone());
                }

                tx.construct_with(|| value);
            });
        }
    }

    /// # Safety
    /// There must be room for `slice.len()` more elements.
    unsafe fn extend_from_slice_unchecked(&mut self, slice: &[T])
    where
        T: Clone,
    {
        unsafe {
            self.construct_back(|tx| {
                for value in slice {
                    tx.construct_with(|| value.clone());
                }
            });
        }
    }
}

/// Exchanges the contents of two vectors. See [`AllocVec::swap_with`].
#[inline(always)]
pub fn swap<T, A: Allocator>(a: &mut AllocVec<T, A>, b: &mut AllocVec<T, A>) {
    a.swap_with(b);
}

impl<T, A: Allocator> Drop for AllocVec<T, A> {
    fn drop(&mut self) {
        // the buffer releases its block afterwards, even if a destructor panics
        self.clear();
    }
}

impl<T, A: Allocator> Deref for AllocVec<T, A> {
    type Target = [T];

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, A: Allocator> DerefMut for AllocVec<T, A> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, A: Allocator, I: SliceIndex<[T]>> Index<I> for AllocVec<T, A> {
    type Output = I::Output;

    #[inline(always)]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, A: Allocator, I: SliceIndex<[T]>> IndexMut<I> for AllocVec<T, A> {
    #[inline(always)]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T, A: Allocator> AsRef<[T]> for AllocVec<T, A> {
    #[inline(always)]
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T, A: Allocator> AsMut<[T]> for AllocVec<T, A> {
    #[inline(always)]
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T, A: Allocator> Borrow<[T]> for AllocVec<T, A> {
    #[inline(always)]
    fn borrow(&self) -> &[T] {
        self
    }
}

impl<T, A: Allocator> BorrowMut<[T]> for AllocVec<T, A> {
    #[inline(always)]
    fn borrow_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for AllocVec<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T: Hash, A: Allocator> Hash for AllocVec<T, A> {
    #[inline(always)]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: Eq, A: Allocator> Eq for AllocVec<T, A> {}

impl<T, A: Allocator + Default> Default for AllocVec<T, A> {
    #[inline(always)]
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

#[cfg(feature = "panic-on-alloc")]
impl<T: Clone, A: Allocator + Clone> Clone for AllocVec<T, A> {
    fn clone(&self) -> Self {
        self.clone_in(self.allocator().clone())
    }

    /// Destroys the current elements before cloning, so only the basic guarantee holds.
    fn clone_from(&mut self, source: &Self) {
        self.assign_from_slice(source);
    }
}

impl<'v, T, A: Allocator> IntoIterator for &'v AllocVec<T, A> {
    type Item = &'v T;
    type IntoIter = slice::Iter<'v, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'v, T, A: Allocator> IntoIterator for &'v mut AllocVec<T, A> {
    type Item = &'v mut T;
    type IntoIter = slice::IterMut<'v, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

#[cfg(feature = "panic-on-alloc")]
impl<T, A: Allocator> Extend<T> for AllocVec<T, A> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        panic_on_error(self.generic_extend(iter));
    }
}

#[cfg(feature = "panic-on-alloc")]
impl<'t, T: Clone + 't, A: Allocator> Extend<&'t T> for AllocVec<T, A> {
    #[inline]
    fn extend<I: IntoIterator<Item = &'t T>>(&mut self, iter: I) {
        panic_on_error(self.generic_extend(iter.into_iter().cloned()));
    }
}

#[cfg(feature = "panic-on-alloc")]
impl<T, A: Allocator + Default> FromIterator<T> for AllocVec<T, A> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_in(iter, A::default())
    }
}

#[cfg(feature = "panic-on-alloc")]
impl<T, A: Allocator + Default, const N: usize> From<[T; N]> for AllocVec<T, A> {
    #[inline]
    fn from(array: [T; N]) -> Self {
        Self::from_array_in(array, A::default())
    }
}

#[cfg(feature = "panic-on-alloc")]
impl<T: Clone, A: Allocator + Default> From<&[T]> for AllocVec<T, A> {
    #[inline]
    fn from(slice: &[T]) -> Self {
        Self::from_slice_in(slice, A::default())
    }
}

/// Returns [`ErrorKind::OutOfMemory`](std::io::ErrorKind::OutOfMemory) when allocations fail.
#[cfg(feature = "std")]
impl<A: Allocator> std::io::Write for AllocVec<u8, A> {
    #[inline(always)]
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if self.try_extend_from_slice(buf).is_err() {
            return Err(std::io::ErrorKind::OutOfMemory.into());
        }

        Ok(buf.len())
    }

    #[inline(always)]
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }

    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        if self.try_extend_from_slice(buf).is_err() {
            return Err(std::io::ErrorKind::OutOfMemory.into());
        }

        Ok(())
    }
}

impl<T, A: Allocator> IntoIterator for AllocVec<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    /// Creates a consuming iterator, that is, one that moves each value out of the vector.
    /// The vector cannot be used after calling this.
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        let this = ManuallyDrop::new(self);
        let len = this.len;

        // SAFETY: `this` is never used or dropped again
        let buf = unsafe { ptr::read(&this.buf) };

        unsafe { IntoIter::new(buf, len) }
    }
}
