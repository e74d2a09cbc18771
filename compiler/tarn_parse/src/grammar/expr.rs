//! Expression grammar.
//!
//! Operators climb over an [`OpTable`] rebuilt from the live fixity
//! list on every `parse_expr` entry; operands are applications, atoms,
//! lambdas, and dependent function types with written binders.

use crate::stack::ensure_sufficient_stack;
use crate::table::{OpLevel, OpTable};
use crate::{exhausted, ParseError, Parser};
use tarn_diagnostic::ErrorCode;
use tarn_ir::{Assoc, Literal, Name, Plicity, Term, TokenKind};

impl Parser<'_> {
    /// Parse one expression with the operator table as the fixity list
    /// stands right now. Operators declared later in the file do not
    /// exist yet from this expression's point of view.
    pub(crate) fn parse_expr(&mut self) -> Result<Term, ParseError> {
        ensure_sufficient_stack(|| {
            let table = OpTable::build(self.ctx.fixities());
            self.parse_level(&table, 0)
        })
    }

    fn parse_level(&mut self, table: &OpTable, index: usize) -> Result<Term, ParseError> {
        let Some(level) = table.level(index) else {
            return self.parse_operand();
        };
        match level {
            OpLevel::Arrow => {
                let left = self.parse_level(table, index + 1)?;
                if !self.check(&TokenKind::Arrow) {
                    return Ok(left);
                }
                self.advance();
                let right = self.parse_level(table, index)?;
                Ok(Term::Pi {
                    plicity: Plicity::Explicit,
                    name: Name::machine(0, "X"),
                    dom: Box::new(left),
                    cod: Box::new(right),
                })
            }
            OpLevel::Equality => {
                let mut left = self.parse_level(table, index + 1)?;
                while self.check(&TokenKind::Eq) {
                    self.advance();
                    let right = self.parse_level(table, index + 1)?;
                    left = Term::apply(Term::user_ref("="), vec![left, right]);
                }
                Ok(left)
            }
            OpLevel::User { ops, assoc } => match assoc {
                Assoc::Left => {
                    let mut left = self.parse_level(table, index + 1)?;
                    while let Some(op) = self.current_level_op(ops) {
                        self.advance();
                        let right = self.parse_level(table, index + 1)?;
                        left = Term::apply(Term::Ref(Name::user(&op)), vec![left, right]);
                    }
                    Ok(left)
                }
                Assoc::Right => {
                    let left = self.parse_level(table, index + 1)?;
                    let Some(op) = self.current_level_op(ops) else {
                        return Ok(left);
                    };
                    self.advance();
                    let right = self.parse_level(table, index)?;
                    Ok(Term::apply(Term::Ref(Name::user(&op)), vec![left, right]))
                }
                Assoc::Non => {
                    let left = self.parse_level(table, index + 1)?;
                    let Some(op) = self.current_level_op(ops) else {
                        return Ok(left);
                    };
                    self.advance();
                    let right = self.parse_level(table, index + 1)?;
                    if let Some(chained) = self.current_level_op(ops) {
                        return Err(ParseError::new(
                            ErrorCode::E1007,
                            format!("operator `{chained}` is non-associative and cannot be chained"),
                            self.current_span(),
                        ));
                    }
                    Ok(Term::apply(Term::Ref(Name::user(&op)), vec![left, right]))
                }
            },
        }
    }

    /// The current token as an operator of the given level, if it is one.
    fn current_level_op(&self, ops: &[String]) -> Option<String> {
        match self.current_kind() {
            TokenKind::Op(text) if ops.iter().any(|op| op == text) => Some(text.clone()),
            _ => None,
        }
    }

    /// One operand between operators: an application, a bare atom, a
    /// lambda, or a dependent function type with a written binder.
    fn parse_operand(&mut self) -> Result<Term, ParseError> {
        let mut best = None;
        if let Some(term) = self.attempt(&mut best, Self::parse_app) {
            return Ok(term);
        }
        if let Some(term) = self.attempt(&mut best, Self::parse_atom) {
            return Ok(term);
        }
        if let Some(term) = self.attempt(&mut best, Self::parse_lambda) {
            return Ok(term);
        }
        if let Some(term) = self.attempt(&mut best, Self::parse_binder_type) {
            return Ok(term);
        }
        Err(exhausted(
            best,
            ParseError::new(
                ErrorCode::E1002,
                format!("expected an expression, found {}", self.current_kind()),
                self.current_span(),
            ),
        ))
    }

    /// Application: an atom head, implicit-argument bindings, then at
    /// least one positional atom argument. With no positional argument
    /// there is no application node; the head stands alone.
    fn parse_app(&mut self) -> Result<Term, ParseError> {
        let head = self.parse_atom()?;
        let mut implicits = Vec::new();
        while self.check(&TokenKind::LBrace) {
            implicits.push(self.parse_implicit_arg()?);
        }
        let mut args = vec![self.parse_atom()?];
        while self.at_atom_start() {
            args.push(self.parse_atom()?);
        }
        Ok(Term::App {
            head: Box::new(head),
            implicits,
            args,
        })
    }

    /// `{name}` or `{name = expr}`; bare `{name}` binds the reference
    /// `name` itself.
    pub(crate) fn parse_implicit_arg(&mut self) -> Result<(Name, Term), ParseError> {
        self.expect(&TokenKind::LBrace)?;
        let name = self.expect_ident()?;
        let value = if self.check(&TokenKind::Eq) {
            self.advance();
            self.parse_expr()?
        } else {
            Term::Ref(name.clone())
        };
        self.expect(&TokenKind::RBrace)?;
        Ok((name, value))
    }

    pub(crate) fn at_atom_start(&self) -> bool {
        matches!(
            self.current_kind(),
            TokenKind::Ident(_)
                | TokenKind::Underscore
                | TokenKind::LParen
                | TokenKind::Set
                | TokenKind::Int(_)
                | TokenKind::Str(_)
                | TokenKind::QuoteBracket
        )
    }

    /// Atoms, first match wins: quoted term, reference, `_`,
    /// parenthesized expression, `Set`, literal constant.
    pub(crate) fn parse_atom(&mut self) -> Result<Term, ParseError> {
        let kind = self.current_kind().clone();
        match kind {
            TokenKind::QuoteBracket => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(&TokenKind::RBracket)?;
                Ok(Term::Quote(Box::new(inner)))
            }
            TokenKind::Ident(text) => {
                self.advance();
                Ok(Term::Ref(Name::dotted(&text)))
            }
            TokenKind::Underscore => {
                self.advance();
                Ok(Term::Placeholder)
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Set => {
                self.advance();
                Ok(Term::Universe)
            }
            TokenKind::Int(value) => {
                self.advance();
                Ok(Term::Const(Literal::Int(value)))
            }
            TokenKind::Str(text) => {
                self.advance();
                Ok(Term::Const(Literal::Str(text)))
            }
            other => Err(ParseError::new(
                ErrorCode::E1002,
                format!("expected an expression, found {other}"),
                self.current_span(),
            )),
        }
    }

    /// An atom, optionally dotted: `.t` marks a left-hand-side term as
    /// irrelevant to matching.
    pub(crate) fn parse_hidden_atom(&mut self) -> Result<Term, ParseError> {
        if self.check(&TokenKind::Dot) {
            self.advance();
            Ok(Term::Hidden(Box::new(self.parse_atom()?)))
        } else {
            self.parse_atom()
        }
    }

    pub(crate) fn at_hidden_atom_start(&self) -> bool {
        self.check(&TokenKind::Dot) || self.at_atom_start()
    }

    /// `\x => body`, optionally `\x : ty => body`.
    fn parse_lambda(&mut self) -> Result<Term, ParseError> {
        self.expect(&TokenKind::Backslash)?;
        let name = self.expect_ident()?;
        let ty = if self.check(&TokenKind::Colon) {
            self.advance();
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.expect(&TokenKind::FatArrow)?;
        let body = self.parse_expr()?;
        Ok(Term::Lam {
            name,
            ty,
            body: Box::new(body),
        })
    }

    /// `(x : dom) -> cod` and `{x : dom} -> cod`, the latter binding
    /// implicitly.
    fn parse_binder_type(&mut self) -> Result<Term, ParseError> {
        let (plicity, close) = if self.check(&TokenKind::LParen) {
            (Plicity::Explicit, TokenKind::RParen)
        } else if self.check(&TokenKind::LBrace) {
            (Plicity::Implicit, TokenKind::RBrace)
        } else {
            return Err(ParseError::new(
                ErrorCode::E1002,
                format!("expected a binder, found {}", self.current_kind()),
                self.current_span(),
            ));
        };
        self.advance();
        let name = self.expect_ident()?;
        self.expect(&TokenKind::Colon)?;
        let dom = self.parse_expr()?;
        self.expect(&close)?;
        self.expect(&TokenKind::Arrow)?;
        let cod = self.parse_expr()?;
        Ok(Term::Pi {
            plicity,
            name,
            dom: Box::new(dom),
            cod: Box::new(cod),
        })
    }
}
