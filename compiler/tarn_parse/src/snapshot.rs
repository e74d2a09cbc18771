//! Transactional parser snapshots.
//!
//! A snapshot captures the cursor position *and* the ambient context.
//! Fixity pragmas mutate the expression grammar while the enclosing
//! declaration is still being parsed, so abandoning an alternative must
//! restore input position and context together: state changes are
//! transactional per backtrack point, exactly like input position.

use tarn_elab::Context;

/// Saved parser state for one speculative alternative.
pub(crate) struct Snapshot {
    pub(crate) pos: usize,
    pub(crate) ctx: Context,
}

impl Snapshot {
    pub(crate) fn new(pos: usize, ctx: Context) -> Self {
        Snapshot { pos, ctx }
    }
}
