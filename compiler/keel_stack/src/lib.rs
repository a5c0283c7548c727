//! Stack growth for recursive type walks.
//!
//! Lowering, substitution and formatting recurse once per level of type
//! nesting. Wrapping each level in [`ensure_sufficient_stack`] lets nesting
//! depth grow without overflowing the thread's stack: on native targets the
//! `stacker` crate switches to a fresh segment when the remaining stack drops
//! below a red zone. On `wasm32` the closure runs directly.

/// Grow the stack when less than this remains (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (1MB).
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, first growing the stack if it is nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// Run `f` directly; wasm manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
