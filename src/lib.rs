// NB: We avoid using closures to map `Result` and `Option`s in various places because they result in less readable assembly output.
// When using closures, functions like `length_error` can get the name of some closure that invokes it instead.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(
    clippy::pedantic,
    clippy::cargo,
    clippy::correctness,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    missing_docs,
    rustdoc::missing_crate_level_docs
)]
#![allow(
    clippy::inline_always,
    clippy::module_name_repetitions,
    clippy::partialeq_ne_impl,
    clippy::items_after_statements,
    clippy::must_use_candidate
)]
#![doc(test(attr(warn(dead_code))))]
//! A growable vector whose memory and elements are managed through a pluggable [`Allocator`](alloc::Allocator).
//!
//! [`AllocVec`] keeps one contiguous buffer: the first `len` slots hold live elements, the
//! remaining slots up to `capacity` are raw memory. Every block comes from
//! [`Allocator::allocate`](alloc::Allocator::allocate), every element is created through
//! [`Allocator::construct`](alloc::Allocator::construct) and ended through
//! [`Allocator::destroy`](alloc::Allocator::destroy).
//!
//! # Failure semantics
//!
//! Operations that can fail leave the vector valid and leak-free:
//! - Growing the buffer either fully succeeds or leaves the vector exactly as it was.
//! - Multi-element operations construct their elements as one batch. If a constructor
//!   (`Clone::clone` or a user closure) panics, the elements constructed so far are destroyed
//!   in reverse order before the panic leaves the vector.
//! - Insertion shifts the tail to open a gap before constructing into it. A failed insertion
//!   destroys the new elements and shifts the tail back.
//!
//! ```
//! use alloc_vec::{alloc_vec, AllocVec};
//! use std::panic::{catch_unwind, AssertUnwindSafe};
//!
//! #[derive(Debug, PartialEq)]
//! struct Fragile(i32);
//!
//! impl Clone for Fragile {
//!     fn clone(&self) -> Self {
//!         if self.0 == 9 {
//!             panic!("refusing to clone");
//!         }
//!         Fragile(self.0)
//!     }
//! }
//!
//! let mut vec = alloc_vec![Fragile(1), Fragile(2), Fragile(3)];
//!
//! let result = catch_unwind(AssertUnwindSafe(|| vec.insert_n(1, 2, Fragile(9))));
//!
//! assert!(result.is_err());
//! assert_eq!(vec, [Fragile(1), Fragile(2), Fragile(3)]);
//! ```
//!
//! # Panicking and fallible methods
//!
//! Every allocating method comes in two flavours. `push`, `reserve`, `insert` and friends panic
//! if memory cannot be provided. Their `try_` counterparts return an [`Error`] instead:
//!
//! ```
//! use alloc_vec::{AllocVec, Error};
//!
//! let mut vec: AllocVec<u64> = AllocVec::new();
//! vec.try_push(1)?;
//!
//! let err = vec.try_reserve(usize::MAX).unwrap_err();
//! assert!(matches!(err, Error::LengthError { .. }));
//! assert_eq!(vec, [1]);
//! # Ok::<(), Error>(())
//! ```
//!
//! # Logging
//!
//! Buffer allocations, relocations and releases are reported at `trace` level and failed
//! allocations at `debug` level through the [`log`](https://docs.rs/log) facade.
//! No logger is installed by this crate.
//!
//! # Feature Flags
//! * **`std`** *(enabled by default)* — Adds `std::io::Write` for `AllocVec<u8, A>`.
//! * **`alloc`** *(enabled by default)* — Adds [`Global`](alloc::Global) as the default allocator.
//! * **`panic-on-alloc`** *(enabled by default)* — Adds functions and traits that will panic when an allocation fails.
//!   Without this feature, allocation failures cannot cause panics, and only
//!   `try_`-prefixed allocation methods will be available.
//! * **`serde`** — Adds `Serialize` and `Deserialize` implementations for `AllocVec`.
//! * **`allocator-api2-02`** — Adds [`AllocatorApi2V02Compat`](alloc::compat::AllocatorApi2V02Compat)
//!   to use `allocator_api2` version 0.2 allocators.

#[cfg(feature = "alloc")]
extern crate alloc as alloc_crate;

pub mod alloc;
pub mod vec;
mod error;
mod error_behavior;
mod features;
mod growth;
mod partial_eq;
mod raw_buffer;
mod transaction;

#[cfg(test)]
mod tests;

use core::{convert::Infallible, mem};

pub use vec::{AllocVec, IntoIter, swap};
pub use error::Error;
use error_behavior::ErrorBehavior;

#[inline(always)]
fn panic_on_error<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => match error {},
    }
}

#[cold]
#[inline(never)]
fn exact_size_iterator_bad_len() -> ! {
    panic!("ExactSizeIterator did not return as many items as promised")
}

trait SizedTypeProperties: Sized {
    const SIZE: usize = mem::size_of::<Self>();
    const ALIGN: usize = mem::align_of::<Self>();

    const IS_ZST: bool = mem::size_of::<Self>() == 0;
}

impl<T> SizedTypeProperties for T {}

macro_rules! maybe_default_allocator {
    ($macro:ident) => {
        #[cfg(feature = "alloc")]
        $macro!(A = $crate::alloc::Global);

        #[cfg(not(feature = "alloc"))]
        $macro!(A);
    };
}

pub(crate) use maybe_default_allocator;
