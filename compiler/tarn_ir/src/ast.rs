//! Surface AST: terms and declarations.
//!
//! Closed sum types, exhaustively matched by every consumer. Terms are
//! boxed trees; the implicit elaborator rewrites them functionally and
//! the checker downstream owns the result.

use crate::fixity::FixityDecl;
use crate::name::Name;
use std::fmt;

/// Whether a binder's argument is written by the caller or inferred.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Plicity {
    Explicit,
    Implicit,
}

/// Literal constants.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Literal {
    Int(u64),
    Str(String),
}

/// A surface term.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Term {
    /// Reference to a name.
    Ref(Name),
    /// `_`, left for the checker to solve.
    Placeholder,
    /// `![ t ]`, a quoted term.
    Quote(Box<Term>),
    /// `.t`, a match-irrelevant term on a clause left-hand side.
    Hidden(Box<Term>),
    /// Literal constant.
    Const(Literal),
    /// Application: head, named implicit arguments, positional arguments.
    App {
        head: Box<Term>,
        implicits: Vec<(Name, Term)>,
        args: Vec<Term>,
    },
    /// `\x => body`, optionally `\x : ty => body`.
    Lam {
        name: Name,
        ty: Option<Box<Term>>,
        body: Box<Term>,
    },
    /// `(x : dom) -> cod` or `{x : dom} -> cod`.
    Pi {
        plicity: Plicity,
        name: Name,
        dom: Box<Term>,
        cod: Box<Term>,
    },
    /// `Set`, the universe of types.
    Universe,
}

impl Term {
    /// Reference to an undotted user name.
    pub fn user_ref(segment: &str) -> Term {
        Term::Ref(Name::user(segment))
    }

    /// Application with positional arguments only.
    pub fn apply(head: Term, args: Vec<Term>) -> Term {
        Term::App {
            head: Box::new(head),
            implicits: Vec::new(),
            args,
        }
    }

    /// True for terms that print without surrounding parentheses.
    fn is_atomic(&self) -> bool {
        matches!(
            self,
            Term::Ref(_)
                | Term::Placeholder
                | Term::Quote(_)
                | Term::Hidden(_)
                | Term::Const(_)
                | Term::Universe
        )
    }
}

/// One pattern-matching equation.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Clause {
    pub head: Name,
    pub lhs: Term,
    pub rhs: Term,
}

/// A data declaration lowered to a kind plus constructor types.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DataDecl {
    pub name: Name,
    /// The kind of the type constructor itself.
    pub ty: Term,
    pub ctors: Vec<(Name, Term)>,
}

/// A top-level declaration.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Decl {
    /// Echo of a fixity pragma; the table mutation already happened
    /// while the pragma was being parsed.
    Fixity(Vec<FixityDecl>),
    /// `name : ty`
    TypeSig { name: Name, ty: Term },
    Data(DataDecl),
    /// The pattern clauses of one function.
    Clauses { name: Name, clauses: Vec<Clause> },
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(value) => write!(f, "{value}"),
            Literal::Str(text) => {
                write!(f, "\"")?;
                for c in text.chars() {
                    match c {
                        '"' => write!(f, "\\\"")?,
                        '\\' => write!(f, "\\\\")?,
                        '\n' => write!(f, "\\n")?,
                        '\t' => write!(f, "\\t")?,
                        _ => write!(f, "{c}")?,
                    }
                }
                write!(f, "\"")
            }
        }
    }
}

/// Write a term, parenthesized unless atomic.
fn write_atom(f: &mut fmt::Formatter<'_>, term: &Term) -> fmt::Result {
    if term.is_atomic() {
        write!(f, "{term}")
    } else {
        write!(f, "({term})")
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Ref(name) => write!(f, "{name}"),
            Term::Placeholder => write!(f, "_"),
            Term::Quote(inner) => write!(f, "![ {inner} ]"),
            Term::Hidden(inner) => {
                write!(f, ".")?;
                write_atom(f, inner)
            }
            Term::Const(literal) => write!(f, "{literal}"),
            Term::App {
                head,
                implicits,
                args,
            } => {
                write_atom(f, head)?;
                for (name, value) in implicits {
                    if *value == Term::Ref(name.clone()) {
                        write!(f, " {{{name}}}")?;
                    } else {
                        write!(f, " {{{name} = {value}}}")?;
                    }
                }
                for arg in args {
                    write!(f, " ")?;
                    write_atom(f, arg)?;
                }
                Ok(())
            }
            Term::Lam { name, ty, body } => {
                write!(f, "\\{name}")?;
                if let Some(ty) = ty {
                    write!(f, " : {ty}")?;
                }
                write!(f, " => {body}")
            }
            Term::Pi {
                plicity,
                name,
                dom,
                cod,
            } => {
                match plicity {
                    // Binders with synthesized names print as bare arrows.
                    Plicity::Explicit if name.is_machine() => {
                        if matches!(dom.as_ref(), Term::Pi { .. } | Term::Lam { .. }) {
                            write!(f, "({dom})")?;
                        } else {
                            write!(f, "{dom}")?;
                        }
                    }
                    Plicity::Explicit => write!(f, "({name} : {dom})")?,
                    Plicity::Implicit => write!(f, "{{{name} : {dom}}}")?,
                }
                write!(f, " -> {cod}")
            }
            Term::Universe => write!(f, "Set"),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}

impl fmt::Display for Decl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decl::Fixity(decls) => {
                let Some(first) = decls.first() else {
                    return Ok(());
                };
                write!(f, "{} {}", first.keyword(), first.fixity.prec)?;
                for (i, decl) in decls.iter().enumerate() {
                    if i == 0 {
                        write!(f, " {}", decl.op)?;
                    } else {
                        write!(f, ", {}", decl.op)?;
                    }
                }
                Ok(())
            }
            Decl::TypeSig { name, ty } => write!(f, "{name} : {ty}"),
            Decl::Data(data) => {
                write!(f, "data {} : {}", data.name, data.ty)?;
                for (i, (name, ty)) in data.ctors.iter().enumerate() {
                    if i == 0 {
                        write!(f, " where {name} : {ty}")?;
                    } else {
                        write!(f, " | {name} : {ty}")?;
                    }
                }
                Ok(())
            }
            Decl::Clauses { clauses, .. } => {
                for (i, clause) in clauses.iter().enumerate() {
                    if i > 0 {
                        writeln!(f, ";")?;
                    }
                    write!(f, "{clause}")?;
                }
                Ok(())
            }
        }
    }
}
