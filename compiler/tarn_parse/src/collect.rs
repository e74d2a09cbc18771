//! Post-parse clause collection.
//!
//! The raw parser emits every pattern clause as its own singleton group
//! under a placeholder head name; this pass assigns the real names and
//! merges runs of *consecutive* groups defining the same name. Runs
//! interrupted by any other declaration stay separate: clause order is
//! source order, and regrouping across unrelated declarations would
//! change the meaning of the program.

use tarn_ir::{Clause, Decl, Name};

/// Merge adjacent singleton clause groups with equal head names.
pub(crate) fn collect_clauses(decls: Vec<Decl>) -> Vec<Decl> {
    let mut out = Vec::with_capacity(decls.len());
    let mut run: Option<(Name, Vec<Clause>)> = None;

    for decl in decls {
        match decl {
            Decl::Clauses { clauses, .. } if clauses.len() == 1 => {
                let clause = match clauses.into_iter().next() {
                    Some(clause) => clause,
                    None => continue,
                };
                match &mut run {
                    Some((head, acc)) if *head == clause.head => acc.push(clause),
                    _ => {
                        flush(&mut run, &mut out);
                        run = Some((clause.head.clone(), vec![clause]));
                    }
                }
            }
            other => {
                flush(&mut run, &mut out);
                out.push(other);
            }
        }
    }
    flush(&mut run, &mut out);
    out
}

fn flush(run: &mut Option<(Name, Vec<Clause>)>, out: &mut Vec<Decl>) {
    if let Some((name, clauses)) = run.take() {
        out.push(Decl::Clauses { name, clauses });
    }
}
