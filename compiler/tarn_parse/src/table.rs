//! The operator-precedence table, rebuilt from live state.

use tarn_ir::{Assoc, FixityDecl};

/// One level of the precedence-climbing parser.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum OpLevel {
    /// Built-in `->`: right-associative and loosest of all. Desugars to
    /// an explicit dependent function type with a synthesized binder.
    Arrow,
    /// Built-in `=`: left-associative, looser than every user operator.
    /// Desugars to an ordinary application of the reference `=`.
    Equality,
    /// One group of user operators sharing a precedence.
    User { ops: Vec<String>, assoc: Assoc },
}

/// Precedence levels, loosest first.
///
/// Built fresh from the fixity table every time an expression parse
/// begins: operators declared earlier in the file are visible, operators
/// declared later do not exist yet.
#[derive(Debug)]
pub(crate) struct OpTable {
    levels: Vec<OpLevel>,
}

impl OpTable {
    /// Group the ascending-sorted fixity list by equal precedence, one
    /// climbing level per group, below the two built-in levels. A
    /// group's associativity policy comes from its own declarations
    /// (the first one, when duplicates disagree).
    pub(crate) fn build(fixities: &[FixityDecl]) -> Self {
        let mut levels = vec![OpLevel::Arrow, OpLevel::Equality];
        let mut rest = fixities;
        while let Some(first) = rest.first() {
            let prec = first.fixity.prec;
            let split = rest.partition_point(|decl| decl.fixity.prec == prec);
            levels.push(OpLevel::User {
                ops: rest[..split].iter().map(|decl| decl.op.clone()).collect(),
                assoc: first.fixity.assoc,
            });
            rest = &rest[split..];
        }
        OpTable { levels }
    }

    pub(crate) fn level(&self, index: usize) -> Option<&OpLevel> {
        self.levels.get(index)
    }
}
