//! Stack safety for recursive expression parsing.

const RED_ZONE: usize = 128 * 1024; // 128KiB
const STACK_PER_RECURSION: usize = 2 * 1024 * 1024; // 2MiB

/// Grow the stack before recursing once the red zone is near, so deeply
/// nested expressions cannot overflow it.
#[inline]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
