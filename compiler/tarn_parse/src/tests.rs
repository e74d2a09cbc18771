//! End-to-end parser tests over lexed source.

use crate::{parse_module, ParseError, Parser};
use pretty_assertions::assert_eq;
use tarn_diagnostic::ErrorCode;
use tarn_elab::Context;
use tarn_ir::{Assoc, Decl, FixityDecl, Literal, Name, Plicity, Term, TokenList};

fn tokens(source: &str) -> TokenList {
    match tarn_lexer::lex(source) {
        Ok(tokens) => tokens,
        Err(error) => panic!("lex error: {error:?}"),
    }
}

fn parse_source(source: &str) -> (Vec<Decl>, Context) {
    match parse_module(&tokens(source), Context::new()) {
        Ok(result) => result,
        Err(error) => panic!(
            "parse error {}: {} at {}",
            error.code, error.message, error.span
        ),
    }
}

fn parse_failure(source: &str) -> ParseError {
    match parse_module(&tokens(source), Context::new()) {
        Ok(_) => panic!("expected the parse to fail"),
        Err(error) => error,
    }
}

fn int(value: u64) -> Term {
    Term::Const(Literal::Int(value))
}

fn op_app(op: &str, left: Term, right: Term) -> Term {
    Term::apply(Term::user_ref(op), vec![left, right])
}

fn arrow(dom: Term, cod: Term) -> Term {
    Term::Pi {
        plicity: Plicity::Explicit,
        name: Name::machine(0, "X"),
        dom: Box::new(dom),
        cod: Box::new(cod),
    }
}

fn implicit_pi(name: &str, cod: Term) -> Term {
    Term::Pi {
        plicity: Plicity::Implicit,
        name: Name::user(name),
        dom: Box::new(Term::Placeholder),
        cod: Box::new(cod),
    }
}

fn rhs_of(decl: &Decl) -> &Term {
    match decl {
        Decl::Clauses { clauses, .. } => &clauses[0].rhs,
        other => panic!("expected a clause group, got {other:?}"),
    }
}

// ===== Dynamic precedence =====

#[test]
fn test_fixity_changes_later_expressions() {
    let (decls, ctx) = parse_source("infixl 6 +; f x = 1 + 2 + 3;");
    assert_eq!(decls.len(), 2);
    assert_eq!(
        *rhs_of(&decls[1]),
        op_app("+", op_app("+", int(1), int(2)), int(3))
    );
    assert_eq!(ctx.fixities().len(), 1);
}

#[test]
fn test_operator_unusable_before_its_fixity() {
    // `+` has no fixity entry yet at its use site, so the expression
    // ends after `1` and the terminator check trips on the operator.
    // Declaring the fixity afterwards does not resurrect the parse.
    let error = parse_failure("f x = 1 + 2; infixl 6 +;");
    assert_eq!(error.code, ErrorCode::E1006);
}

#[test]
fn test_precedence_levels_nest_correctly() {
    let (decls, _) = parse_source("infixl 6 +; infixl 7 *; f = a + b * c + d;");
    assert_eq!(
        *rhs_of(&decls[2]),
        op_app(
            "+",
            op_app(
                "+",
                Term::user_ref("a"),
                op_app("*", Term::user_ref("b"), Term::user_ref("c"))
            ),
            Term::user_ref("d")
        )
    );
}

// ===== Grouping by precedence level =====

#[test]
fn test_same_level_operators_chain() {
    let (decls, _) = parse_source("infixl 3 ~, @; f = a ~ b @ c;");
    assert_eq!(
        *rhs_of(&decls[1]),
        op_app(
            "@",
            op_app("~", Term::user_ref("a"), Term::user_ref("b")),
            Term::user_ref("c")
        )
    );
}

#[test]
fn test_right_associative_operators_nest_right() {
    let (decls, _) = parse_source("infixr 5 ::; f = a :: b :: c;");
    assert_eq!(
        *rhs_of(&decls[1]),
        op_app(
            "::",
            Term::user_ref("a"),
            op_app("::", Term::user_ref("b"), Term::user_ref("c"))
        )
    );
}

#[test]
fn test_non_associative_operators_do_not_chain() {
    let (decls, _) = parse_source("infix 4 ~; f = a ~ b;");
    assert_eq!(
        *rhs_of(&decls[1]),
        op_app("~", Term::user_ref("a"), Term::user_ref("b"))
    );

    let error = parse_failure("infix 4 ~; f = a ~ b ~ c;");
    assert_eq!(error.code, ErrorCode::E1007);
}

// ===== Clause collection =====

#[test]
fn test_adjacent_clauses_collect_into_one_group() {
    let (decls, _) = parse_source("f Z = A; f (S k) = B;");
    assert_eq!(decls.len(), 1);
    let Decl::Clauses { name, clauses } = &decls[0] else {
        panic!("expected a clause group");
    };
    assert_eq!(*name, Name::user("f"));
    assert_eq!(clauses.len(), 2);
    assert_eq!(
        clauses[0].lhs,
        Term::apply(Term::user_ref("f"), vec![Term::user_ref("Z")])
    );
    assert_eq!(clauses[0].rhs, Term::user_ref("A"));
    assert_eq!(
        clauses[1].lhs,
        Term::apply(
            Term::user_ref("f"),
            vec![Term::apply(Term::user_ref("S"), vec![Term::user_ref("k")])]
        )
    );
    assert_eq!(clauses[1].rhs, Term::user_ref("B"));
}

#[test]
fn test_interrupted_clauses_never_merge() {
    let (decls, _) = parse_source("f Z = A; g x = C; f (S k) = B;");
    assert_eq!(decls.len(), 3);
    for (decl, expected) in decls.iter().zip(["f", "g", "f"]) {
        let Decl::Clauses { name, clauses } = decl else {
            panic!("expected a clause group");
        };
        assert_eq!(*name, Name::user(expected));
        assert_eq!(clauses.len(), 1);
    }
}

#[test]
fn test_infix_clause_form() {
    let (decls, _) = parse_source("x ++ y = append x y;");
    let Decl::Clauses { name, clauses } = &decls[0] else {
        panic!("expected a clause group");
    };
    assert_eq!(*name, Name::user("++"));
    assert_eq!(
        clauses[0].lhs,
        op_app("++", Term::user_ref("x"), Term::user_ref("y"))
    );
    assert_eq!(
        clauses[0].rhs,
        Term::apply(
            Term::user_ref("append"),
            vec![Term::user_ref("x"), Term::user_ref("y")]
        )
    );
}

// ===== Data declarations =====

#[test]
fn test_parametric_data_lowering() {
    let (decls, ctx) = parse_source("data Bool = True | False;");
    assert_eq!(decls.len(), 1);
    let Decl::Data(data) = &decls[0] else {
        panic!("expected a data declaration");
    };
    assert_eq!(data.name, Name::user("Bool"));
    assert_eq!(data.ty, Term::Universe);
    assert_eq!(
        data.ctors,
        vec![
            (Name::user("True"), Term::user_ref("Bool")),
            (Name::user("False"), Term::user_ref("Bool")),
        ]
    );
    assert!(ctx.is_defined(&Name::user("Bool")));
    assert!(ctx.is_defined(&Name::user("True")));
}

#[test]
fn test_parametric_data_with_parameters() {
    let (decls, _) = parse_source("data Pair a b = MkPair a b;");
    let Decl::Data(data) = &decls[0] else {
        panic!("expected a data declaration");
    };
    // Kind: (a : Set) -> (b : Set) -> Set. Parameter kinds are assumed
    // Set, never inferred.
    assert_eq!(
        data.ty,
        Term::Pi {
            plicity: Plicity::Explicit,
            name: Name::user("a"),
            dom: Box::new(Term::Universe),
            cod: Box::new(Term::Pi {
                plicity: Plicity::Explicit,
                name: Name::user("b"),
                dom: Box::new(Term::Universe),
                cod: Box::new(Term::Universe),
            }),
        }
    );
    // MkPair : {a} -> {b} -> a -> b -> Pair a b
    let pair = Term::apply(
        Term::user_ref("Pair"),
        vec![Term::user_ref("a"), Term::user_ref("b")],
    );
    assert_eq!(
        data.ctors[0],
        (
            Name::user("MkPair"),
            implicit_pi(
                "a",
                implicit_pi(
                    "b",
                    arrow(Term::user_ref("a"), arrow(Term::user_ref("b"), pair))
                )
            )
        )
    );
}

#[test]
fn test_indexed_data_form() {
    let (decls, ctx) = parse_source(
        "data Vect : Nat -> Set -> Set where \
           Nil : Vect Z a \
         | Cons : a -> Vect n a -> Vect (S n) a;",
    );
    let Decl::Data(data) = &decls[0] else {
        panic!("expected a data declaration");
    };
    assert_eq!(
        data.ty,
        arrow(Term::user_ref("Nat"), arrow(Term::Universe, Term::Universe))
    );

    let vect = |index: Term, elem: Term| Term::apply(Term::user_ref("Vect"), vec![index, elem]);
    assert_eq!(
        data.ctors[0],
        (
            Name::user("Nil"),
            implicit_pi("a", vect(Term::user_ref("Z"), Term::user_ref("a")))
        )
    );
    assert_eq!(
        data.ctors[1],
        (
            Name::user("Cons"),
            implicit_pi(
                "a",
                implicit_pi(
                    "n",
                    arrow(
                        Term::user_ref("a"),
                        arrow(
                            vect(Term::user_ref("n"), Term::user_ref("a")),
                            vect(
                                Term::apply(Term::user_ref("S"), vec![Term::user_ref("n")]),
                                Term::user_ref("a")
                            )
                        )
                    )
                )
            )
        )
    );
    assert_eq!(
        ctx.implicit_params(&Name::user("Cons")),
        Some(&[Name::user("a"), Name::user("n")][..])
    );
}

// ===== Transactional fixity =====

#[test]
fn test_abandoned_fixity_rolls_back() {
    // The pragma registers `!!`, then fails on the malformed operator
    // list. The abandoned alternative must leave no trace: `!!` stays
    // unrecognized.
    let list = tokens("infixl 6 !!, 99;");
    let mut parser = Parser::new(&list, Context::new());
    let error = match parser.parse_decl() {
        Ok(decl) => panic!("expected failure, got {decl}"),
        Err(error) => error,
    };
    assert_eq!(error.code, ErrorCode::E1004);
    assert!(parser.context().fixities().is_empty());
}

// ===== Fail-fast =====

#[test]
fn test_fail_fast_returns_no_declarations() {
    // The malformed middle declaration aborts everything; neither the
    // valid declaration before it nor the one after is returned.
    let error = parse_failure("f : Set; g : ; h : Set;");
    assert_eq!(error.code, ErrorCode::E1002);
}

#[test]
fn test_missing_terminator_is_an_error() {
    let error = parse_failure("f : Set");
    assert_eq!(error.code, ErrorCode::E1006);
}

#[test]
fn test_empty_module() {
    let (decls, ctx) = parse_source("");
    assert!(decls.is_empty());
    assert!(ctx.fixities().is_empty());
}

// ===== Fixity declarations =====

#[test]
fn test_fixity_echo_declaration() {
    let (decls, ctx) = parse_source("infixr 5 ::, @@;");
    assert_eq!(
        decls[0],
        Decl::Fixity(vec![
            FixityDecl::new("::", Assoc::Right, 5),
            FixityDecl::new("@@", Assoc::Right, 5),
        ])
    );
    assert_eq!(ctx.fixities().len(), 2);
}

#[test]
fn test_fixity_table_stays_sorted() {
    let (_, ctx) = parse_source("infixl 9 *; infixl 6 +;");
    let precs: Vec<u32> = ctx.fixities().iter().map(|d| d.fixity.prec).collect();
    assert_eq!(precs, vec![6, 9]);
}

// ===== Expressions =====

#[test]
fn test_builtin_levels_bind_loosest() {
    // `=` binds looser than user operators, `->` looser still.
    let (decls, _) = parse_source("infixl 6 +; thm : a + b = b + a -> Prop;");
    let Decl::TypeSig { ty, .. } = &decls[1] else {
        panic!("expected a type signature");
    };
    let equation = op_app(
        "=",
        op_app("+", Term::user_ref("a"), Term::user_ref("b")),
        op_app("+", Term::user_ref("b"), Term::user_ref("a")),
    );
    assert_eq!(
        *ty,
        implicit_pi(
            "a",
            implicit_pi("b", arrow(equation, Term::user_ref("Prop")))
        )
    );
}

#[test]
fn test_quoted_terms() {
    let (decls, _) = parse_source("m = ![ f x ];");
    assert_eq!(
        *rhs_of(&decls[0]),
        Term::Quote(Box::new(Term::apply(
            Term::user_ref("f"),
            vec![Term::user_ref("x")]
        )))
    );
}

#[test]
fn test_lambda_with_annotation() {
    let (decls, _) = parse_source("k = \\x : T => x;");
    assert_eq!(
        *rhs_of(&decls[0]),
        Term::Lam {
            name: Name::user("x"),
            ty: Some(Box::new(Term::user_ref("T"))),
            body: Box::new(Term::user_ref("x")),
        }
    );
}

#[test]
fn test_dependent_function_types() {
    let (decls, _) = parse_source("id : (a : Set) -> a -> a;");
    let Decl::TypeSig { ty, .. } = &decls[0] else {
        panic!("expected a type signature");
    };
    // `a` is bound by its binder, so nothing is implicitised.
    assert_eq!(
        *ty,
        Term::Pi {
            plicity: Plicity::Explicit,
            name: Name::user("a"),
            dom: Box::new(Term::Universe),
            cod: Box::new(arrow(Term::user_ref("a"), Term::user_ref("a"))),
        }
    );
}

#[test]
fn test_implicit_binder_type() {
    let (decls, ctx) = parse_source("rep : {n : Nat} -> Vect n;");
    let Decl::TypeSig { ty, .. } = &decls[0] else {
        panic!("expected a type signature");
    };
    assert_eq!(
        *ty,
        Term::Pi {
            plicity: Plicity::Implicit,
            name: Name::user("n"),
            dom: Box::new(Term::user_ref("Nat")),
            cod: Box::new(Term::apply(Term::user_ref("Vect"), vec![Term::user_ref("n")])),
        }
    );
    // Only implicitise-synthesized binders land in the registry;
    // binders written by hand do not.
    assert_eq!(ctx.implicit_params(&Name::user("rep")), Some(&[][..]));
}

#[test]
fn test_string_literal_atoms() {
    let (decls, _) = parse_source("greeting = \"hi\\n\";");
    assert_eq!(
        *rhs_of(&decls[0]),
        Term::Const(Literal::Str("hi\n".to_owned()))
    );
}

#[test]
fn test_dotted_identifiers_resolve_to_segmented_names() {
    let (decls, _) = parse_source("main = IO.run x;");
    assert_eq!(
        *rhs_of(&decls[0]),
        Term::apply(
            Term::Ref(Name::dotted("IO.run")),
            vec![Term::user_ref("x")]
        )
    );
}

// ===== Implicit elaboration through the driver =====

#[test]
fn test_signature_implicitises_and_registers() {
    let (decls, ctx) = parse_source("T : Set; v : a -> T;");
    assert_eq!(
        ctx.implicit_params(&Name::user("v")),
        Some(&[Name::user("a")][..])
    );
    let Decl::TypeSig { ty, .. } = &decls[1] else {
        panic!("expected a type signature");
    };
    assert_eq!(
        *ty,
        implicit_pi("a", arrow(Term::user_ref("a"), Term::user_ref("T")))
    );
}

#[test]
fn test_call_sites_get_elided_implicits_inserted() {
    let (decls, _) = parse_source("T : Set; v : a -> T; f x = v x; g = v;");
    assert_eq!(
        *rhs_of(&decls[2]),
        Term::App {
            head: Box::new(Term::user_ref("v")),
            implicits: vec![(Name::user("a"), Term::Placeholder)],
            args: vec![Term::user_ref("x")],
        }
    );
    assert_eq!(
        *rhs_of(&decls[3]),
        Term::App {
            head: Box::new(Term::user_ref("v")),
            implicits: vec![(Name::user("a"), Term::Placeholder)],
            args: Vec::new(),
        }
    );
}

#[test]
fn test_written_implicit_bindings_are_kept() {
    let (decls, _) = parse_source("T : Set; v : a -> T; f = v {a = T} x;");
    assert_eq!(
        *rhs_of(&decls[2]),
        Term::App {
            head: Box::new(Term::user_ref("v")),
            implicits: vec![(Name::user("a"), Term::user_ref("T"))],
            args: vec![Term::user_ref("x")],
        }
    );
}

#[test]
fn test_duplicate_implicit_binding_is_fatal() {
    let error = parse_failure("f = g {a = X} {a = Y} z;");
    assert_eq!(error.code, ErrorCode::E2001);
}

#[test]
fn test_clause_lhs_implicit_bindings() {
    let (decls, _) = parse_source("f {n = m} x = x;");
    let Decl::Clauses { clauses, .. } = &decls[0] else {
        panic!("expected a clause group");
    };
    assert_eq!(
        clauses[0].lhs,
        Term::App {
            head: Box::new(Term::user_ref("f")),
            implicits: vec![(Name::user("n"), Term::user_ref("m"))],
            args: vec![Term::user_ref("x")],
        }
    );
}

#[test]
fn test_hidden_atoms_on_clause_lhs() {
    let (decls, _) = parse_source("f .n x = x;");
    let Decl::Clauses { clauses, .. } = &decls[0] else {
        panic!("expected a clause group");
    };
    assert_eq!(
        clauses[0].lhs,
        Term::App {
            head: Box::new(Term::user_ref("f")),
            implicits: Vec::new(),
            args: vec![
                Term::Hidden(Box::new(Term::user_ref("n"))),
                Term::user_ref("x"),
            ],
        }
    );
}
