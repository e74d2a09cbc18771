//! The compiler's ambient symbol context.

use rustc_hash::FxHashMap;
use tarn_ir::{FixityDecl, Name};
use tracing::debug;

/// Ambient context: the live fixity table and the implicit-argument
/// registry.
///
/// Created empty for one module parse, mutated in place while the module
/// is processed, and kept by the caller afterwards as the module's
/// symbol context. Cloning must stay cheap: the parser clones the whole
/// context for every speculative alternative it tries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Context {
    /// Fixity declarations sorted by ascending precedence. Duplicate
    /// declarations for one operator coexist.
    fixities: Vec<FixityDecl>,
    /// Implicit parameter names, in signature order, per defined name.
    implicits: FxHashMap<Name, Vec<Name>>,
}

impl Context {
    pub fn new() -> Self {
        Context::default()
    }

    /// Merge one fixity declaration, keeping the table sorted by
    /// ascending precedence. Insertion is stable: operators declared
    /// later sort after earlier ones of the same precedence.
    pub fn add_fixity(&mut self, decl: FixityDecl) {
        debug!(op = %decl.op, prec = decl.fixity.prec, "registering fixity");
        let at = self
            .fixities
            .partition_point(|d| d.fixity.prec <= decl.fixity.prec);
        self.fixities.insert(at, decl);
    }

    /// The fixity table, ascending by precedence.
    pub fn fixities(&self) -> &[FixityDecl] {
        &self.fixities
    }

    /// Register a defined name with its implicit parameter list.
    /// Re-registration replaces the previous entry.
    pub fn add_def(&mut self, name: Name, implicits: Vec<Name>) {
        debug!(name = %name, implicits = implicits.len(), "registering definition");
        self.implicits.insert(name, implicits);
    }

    /// Whether a name has been registered as a definition.
    pub fn is_defined(&self, name: &Name) -> bool {
        self.implicits.contains_key(name)
    }

    /// The implicit parameters registered for a name, if any.
    pub fn implicit_params(&self, name: &Name) -> Option<&[Name]> {
        self.implicits.get(name).map(Vec::as_slice)
    }
}
