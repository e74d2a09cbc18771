//! Surface names.

use smallvec::SmallVec;
use std::fmt;

/// A name in the surface syntax.
///
/// `User` names come from source text; dotted identifiers keep their
/// segments, so `Data.Vect` is the two segments `["Data", "Vect"]`.
/// `Machine` names are synthesized binders that cannot collide with
/// anything a user can write. Equality is structural.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Name {
    User(SmallVec<[String; 1]>),
    Machine(u32, String),
}

impl Name {
    /// A user name with a single segment.
    pub fn user(segment: &str) -> Self {
        Name::User(SmallVec::from_iter([segment.to_owned()]))
    }

    /// A user name from a dotted identifier.
    pub fn dotted(text: &str) -> Self {
        Name::User(text.split('.').map(str::to_owned).collect())
    }

    /// A synthesized name.
    pub fn machine(index: u32, tag: &str) -> Self {
        Name::Machine(index, tag.to_owned())
    }

    /// The placeholder head under which raw pattern clauses are grouped
    /// before clause collection assigns the real name.
    pub fn clause_placeholder() -> Self {
        Name::machine(0, "_")
    }

    /// The sole segment of an undotted user name, if that is what this is.
    pub fn single_segment(&self) -> Option<&str> {
        match self {
            Name::User(segments) if segments.len() == 1 => Some(&segments[0]),
            _ => None,
        }
    }

    /// True for synthesized names.
    pub fn is_machine(&self) -> bool {
        matches!(self, Name::Machine(..))
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Name::User(segments) => write!(f, "{}", segments.join(".")),
            Name::Machine(index, tag) => write!(f, "{{{tag}{index}}}"),
        }
    }
}
