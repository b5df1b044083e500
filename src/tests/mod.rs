#![cfg(all(feature = "std", feature = "panic-on-alloc"))]

mod alloc_vec;
#[path = "../../tests/common/limited_allocator.rs"]
mod limited_allocator;

use std::{
    cell::Cell,
    panic::{self, AssertUnwindSafe},
    thread_local,
};

use crate::alloc::{AllocError, Allocator};
use limited_allocator::Limited;

thread_local! {
    static DROPS: Cell<usize> = const { Cell::new(0) };
}

/// Counts how often a value is dropped on this thread.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Counted(u32);

impl Drop for Counted {
    fn drop(&mut self) {
        DROPS.set(DROPS.get() + 1);
    }
}

fn reset_drops() {
    DROPS.set(0);
}

fn drops() -> usize {
    DROPS.get()
}

/// Runs `f`, expecting it to panic, without printing the panic message.
fn expect_panic(f: impl FnOnce()) {
    let hook = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    panic::set_hook(hook);
    assert!(result.is_err(), "expected a panic");
}
