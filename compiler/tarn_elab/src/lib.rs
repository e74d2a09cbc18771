//! Ambient symbol context and implicit-argument elaboration.
//!
//! The context carries the live operator-fixity table and the
//! implicit-argument registry. The parser threads it through every
//! declaration (and snapshots it across speculative alternatives);
//! after each declaration parses, [`elaborate_decl`] fixes that
//! declaration's implicit-argument signature against the context as it
//! stands at that point in the file.

mod context;
mod implicit;

pub use context::Context;
pub use implicit::{add_impl, elaborate_decl, implicitise};

use tarn_ir::Name;
use thiserror::Error;

/// An elaboration failure. Fatal: the file is rejected as a whole.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ElabError {
    #[error("implicit argument `{name}` bound more than once")]
    DuplicateImplicit { name: Name },
}
