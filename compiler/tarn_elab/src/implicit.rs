//! Implicit-argument elaboration.
//!
//! `implicitise` decides which free names of a declared type become
//! implicit binders; `add_impl` re-inserts elided implicit arguments at
//! call sites from the registry. Both work against the ambient
//! [`Context`] and are applied to each declaration with the context as
//! it stands right after that declaration's own parse.

use crate::{Context, ElabError};
use tarn_ir::{Clause, DataDecl, Decl, Name, Plicity, Term};
use tracing::trace;

/// Decide which free names of a declared type become implicit binders.
///
/// Collects single-segment, lowercase-initial user names that are
/// neither bound by an enclosing binder nor registered as definitions,
/// in first-occurrence order, and prepends one implicit `Pi` binder per
/// collected name (domains left as placeholders for the checker).
pub fn implicitise(ctx: &Context, ty: &Term) -> (Term, Vec<Name>) {
    let mut found = Vec::new();
    let mut bound = Vec::new();
    collect_free(ctx, ty, &mut bound, &mut found);

    let mut out = ty.clone();
    for name in found.iter().rev() {
        out = Term::Pi {
            plicity: Plicity::Implicit,
            name: name.clone(),
            dom: Box::new(Term::Placeholder),
            cod: Box::new(out),
        };
    }
    trace!(implicits = found.len(), "implicitised type");
    (out, found)
}

fn implicitable(ctx: &Context, name: &Name, bound: &[Name]) -> bool {
    let Some(segment) = name.single_segment() else {
        return false;
    };
    segment.chars().next().is_some_and(char::is_lowercase)
        && !bound.contains(name)
        && !ctx.is_defined(name)
}

fn collect_free(ctx: &Context, term: &Term, bound: &mut Vec<Name>, found: &mut Vec<Name>) {
    match term {
        Term::Ref(name) => {
            if implicitable(ctx, name, bound) && !found.contains(name) {
                found.push(name.clone());
            }
        }
        Term::Placeholder | Term::Const(_) | Term::Universe => {}
        Term::Quote(inner) | Term::Hidden(inner) => collect_free(ctx, inner, bound, found),
        Term::App {
            head,
            implicits,
            args,
        } => {
            collect_free(ctx, head, bound, found);
            for (_, value) in implicits {
                collect_free(ctx, value, bound, found);
            }
            for arg in args {
                collect_free(ctx, arg, bound, found);
            }
        }
        Term::Lam { name, ty, body } => {
            if let Some(ty) = ty {
                collect_free(ctx, ty, bound, found);
            }
            bound.push(name.clone());
            collect_free(ctx, body, bound, found);
            bound.pop();
        }
        Term::Pi { name, dom, cod, .. } => {
            collect_free(ctx, dom, bound, found);
            bound.push(name.clone());
            collect_free(ctx, cod, bound, found);
            bound.pop();
        }
    }
}

/// Insert elided implicit arguments: at every application whose head
/// references a registered name, and at every bare reference to a name
/// registered with a non-empty implicit list. Locally bound names
/// shadow the registry.
pub fn add_impl(ctx: &Context, term: &Term) -> Result<Term, ElabError> {
    let mut bound = Vec::new();
    rewrite(ctx, term, &mut bound)
}

fn rewrite(ctx: &Context, term: &Term, bound: &mut Vec<Name>) -> Result<Term, ElabError> {
    Ok(match term {
        Term::Ref(name) => {
            let params = if bound.contains(name) {
                None
            } else {
                ctx.implicit_params(name).filter(|params| !params.is_empty())
            };
            match params {
                Some(params) => Term::App {
                    head: Box::new(Term::Ref(name.clone())),
                    implicits: params
                        .iter()
                        .map(|param| (param.clone(), Term::Placeholder))
                        .collect(),
                    args: Vec::new(),
                },
                None => term.clone(),
            }
        }
        Term::Placeholder | Term::Const(_) | Term::Universe => term.clone(),
        Term::Quote(inner) => Term::Quote(Box::new(rewrite(ctx, inner, bound)?)),
        Term::Hidden(inner) => Term::Hidden(Box::new(rewrite(ctx, inner, bound)?)),
        Term::App {
            head,
            implicits,
            args,
        } => {
            let mut given = Vec::with_capacity(implicits.len());
            for (name, value) in implicits {
                given.push((name.clone(), rewrite(ctx, value, bound)?));
            }
            check_duplicates(&given)?;
            let mut new_args = Vec::with_capacity(args.len());
            for arg in args {
                new_args.push(rewrite(ctx, arg, bound)?);
            }
            match head.as_ref() {
                Term::Ref(name) if !bound.contains(name) => Term::App {
                    head: head.clone(),
                    implicits: fill(ctx, name, given),
                    args: new_args,
                },
                other => Term::App {
                    head: Box::new(rewrite(ctx, other, bound)?),
                    implicits: given,
                    args: new_args,
                },
            }
        }
        Term::Lam { name, ty, body } => {
            let ty = match ty {
                Some(ty) => Some(Box::new(rewrite(ctx, ty, bound)?)),
                None => None,
            };
            bound.push(name.clone());
            let body = rewrite(ctx, body, bound);
            bound.pop();
            Term::Lam {
                name: name.clone(),
                ty,
                body: Box::new(body?),
            }
        }
        Term::Pi {
            plicity,
            name,
            dom,
            cod,
        } => {
            let dom = rewrite(ctx, dom, bound)?;
            bound.push(name.clone());
            let cod = rewrite(ctx, cod, bound);
            bound.pop();
            Term::Pi {
                plicity: *plicity,
                name: name.clone(),
                dom: Box::new(dom),
                cod: Box::new(cod?),
            }
        }
    })
}

fn check_duplicates(given: &[(Name, Term)]) -> Result<(), ElabError> {
    for (i, (name, _)) in given.iter().enumerate() {
        if given[..i].iter().any(|(prior, _)| prior == name) {
            return Err(ElabError::DuplicateImplicit { name: name.clone() });
        }
    }
    Ok(())
}

/// Order an application's implicit arguments: registry order first, each
/// taken from the written bindings or filled with a placeholder, then
/// any written bindings the registry does not know about, untouched.
fn fill(ctx: &Context, head: &Name, given: Vec<(Name, Term)>) -> Vec<(Name, Term)> {
    let params = ctx.implicit_params(head).unwrap_or(&[]);
    if params.is_empty() {
        return given;
    }
    let mut rest = given;
    let mut out = Vec::with_capacity(params.len() + rest.len());
    for param in params {
        match rest.iter().position(|(name, _)| name == param) {
            Some(i) => out.push(rest.remove(i)),
            None => out.push((param.clone(), Term::Placeholder)),
        }
    }
    out.extend(rest);
    out
}

/// Fix one declaration's implicit-argument signature.
///
/// Type signatures and data declarations run `implicitise` and register
/// the result before `add_impl`, so a declaration sees its own
/// signature; clauses only re-insert elided arguments.
pub fn elaborate_decl(ctx: &mut Context, decl: Decl) -> Result<Decl, ElabError> {
    match decl {
        // The fixity table was already updated while the pragma parsed.
        Decl::Fixity(decls) => Ok(Decl::Fixity(decls)),
        Decl::TypeSig { name, ty } => {
            let (ty, implicits) = implicitise(ctx, &ty);
            ctx.add_def(name.clone(), implicits);
            let ty = add_impl(ctx, &ty)?;
            Ok(Decl::TypeSig { name, ty })
        }
        Decl::Data(data) => {
            // The type constructor registers first: constructor types
            // mention it and must not implicitise it away.
            let (kind, kind_implicits) = implicitise(ctx, &data.ty);
            ctx.add_def(data.name.clone(), kind_implicits);
            let kind = add_impl(ctx, &kind)?;

            let mut ctors = Vec::with_capacity(data.ctors.len());
            for (name, ty) in data.ctors {
                let (ty, implicits) = implicitise(ctx, &ty);
                ctx.add_def(name.clone(), implicits);
                let ty = add_impl(ctx, &ty)?;
                ctors.push((name, ty));
            }
            Ok(Decl::Data(DataDecl {
                name: data.name,
                ty: kind,
                ctors,
            }))
        }
        Decl::Clauses { name, clauses } => {
            let mut out = Vec::with_capacity(clauses.len());
            for clause in clauses {
                out.push(Clause {
                    head: clause.head,
                    lhs: add_impl(ctx, &clause.lhs)?,
                    rhs: add_impl(ctx, &clause.rhs)?,
                });
            }
            Ok(Decl::Clauses { name, clauses: out })
        }
    }
}
