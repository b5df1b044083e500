use core::{alloc::Layout, convert::Infallible};

use log::debug;

use crate::Error;

/// Selects what happens when an operation fails.
///
/// Methods are written once as `generic_*<E: ErrorBehavior>` and instantiated with
/// [`Infallible`] for the panicking flavour and [`Error`] for the `try_*` flavour.
pub(crate) trait ErrorBehavior: Sized {
    fn allocation(layout: Layout) -> Self;
    fn length_error(requested: usize, max_size: usize) -> Self;
    fn out_of_range(index: usize, len: usize) -> Self;
    fn range_out_of_bounds(start: usize, end: usize, len: usize) -> Self;
}

impl ErrorBehavior for Infallible {
    #[inline(always)]
    fn allocation(layout: Layout) -> Self {
        handle_alloc_error(layout)
    }

    #[inline(always)]
    fn length_error(requested: usize, max_size: usize) -> Self {
        length_error(requested, max_size)
    }

    #[inline(always)]
    fn out_of_range(index: usize, len: usize) -> Self {
        out_of_range(index, len)
    }

    #[inline(always)]
    fn range_out_of_bounds(start: usize, end: usize, len: usize) -> Self {
        range_out_of_bounds(start, end, len)
    }
}

impl ErrorBehavior for Error {
    #[inline(always)]
    fn allocation(layout: Layout) -> Self {
        debug!("allocation of {} bytes (align {}) failed", layout.size(), layout.align());
        Self::OutOfMemory { layout }
    }

    #[inline(always)]
    fn length_error(requested: usize, max_size: usize) -> Self {
        debug!("requested {requested} elements, max size is {max_size}");
        Self::LengthError { requested, max_size }
    }

    #[inline(always)]
    fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }

    #[inline(always)]
    fn range_out_of_bounds(start: usize, end: usize, len: usize) -> Self {
        Self::RangeOutOfBounds { start, end, len }
    }
}

#[cold]
#[inline(never)]
fn handle_alloc_error(layout: Layout) -> ! {
    panic!("memory allocation of {} bytes failed", layout.size())
}

#[cold]
#[inline(never)]
fn length_error(requested: usize, max_size: usize) -> ! {
    panic!("capacity overflow: requested {requested} elements but at most {max_size} are supported")
}

#[cold]
#[inline(never)]
fn out_of_range(index: usize, len: usize) -> ! {
    panic!("index {index} is out of range for a vector of length {len}")
}

#[cold]
#[inline(never)]
fn range_out_of_bounds(start: usize, end: usize, len: usize) -> ! {
    panic!("range {start}..{end} is out of bounds for a vector of length {len}")
}
