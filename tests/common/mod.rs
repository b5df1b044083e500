#![cfg(all(feature = "std", feature = "panic-on-alloc"))]
#![allow(unused)]

use alloc_vec::alloc::{AllocError, Allocator};

mod instrumented_allocator;
mod limited_allocator;
mod small_max_size;

pub(crate) use instrumented_allocator::InstrumentedAllocator;
pub(crate) use limited_allocator::Limited;
pub(crate) use small_max_size::SmallMaxSize;
