//! Stack safety for recursive parsing.
//!
//! Nesting depth in AtomC is unbounded (parentheses, prefix operators,
//! casts, blocks), so the recursive productions grow the stack on demand
//! instead of overflowing it.

const RED_ZONE: usize = 100 * 1024; // 100KB
const STACK_PER_RECURSION: usize = 1024 * 1024; // 1MB

/// Ensure sufficient stack space for recursive operations.
#[inline]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
