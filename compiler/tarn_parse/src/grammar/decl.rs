//! Declaration grammar.

use crate::{exhausted, ParseError, Parser};
use tarn_diagnostic::ErrorCode;
use tarn_ir::{Assoc, Clause, Decl, Fixity, FixityDecl, Name, Term, TokenKind};
use tracing::debug;

impl Parser<'_> {
    /// One declaration, by ordered choice: fixity pragma, data
    /// declaration, type signature, pattern clause.
    ///
    /// Alternatives are transactional: an abandoned branch rolls back
    /// the token position and any fixities it registered. When every
    /// branch fails, the failure that consumed the most input is
    /// reported.
    pub(crate) fn parse_decl(&mut self) -> Result<Decl, ParseError> {
        let mut best = None;
        if let Some(decl) = self.attempt(&mut best, Self::parse_fixity_decl) {
            return Ok(decl);
        }
        if let Some(decl) = self.attempt(&mut best, Self::parse_data_decl) {
            return Ok(decl);
        }
        if let Some(decl) = self.attempt(&mut best, Self::parse_type_sig) {
            return Ok(decl);
        }
        if let Some(decl) = self.attempt(&mut best, Self::parse_clause) {
            return Ok(decl);
        }
        Err(exhausted(
            best,
            ParseError::new(
                ErrorCode::E1005,
                format!("expected a declaration, found {}", self.current_kind()),
                self.current_span(),
            ),
        ))
    }

    /// `infixl 6 +, -`. Each listed operator is merged into the fixity
    /// table as soon as it is seen, so everything after this pragma
    /// parses with the updated grammar. Conflicting redeclarations are
    /// not rejected; their entries coexist in the table.
    fn parse_fixity_decl(&mut self) -> Result<Decl, ParseError> {
        let assoc = match self.current_kind() {
            TokenKind::Infixl => Assoc::Left,
            TokenKind::Infixr => Assoc::Right,
            TokenKind::Infix => Assoc::Non,
            other => {
                return Err(ParseError::new(
                    ErrorCode::E1005,
                    format!("expected a fixity pragma, found {other}"),
                    self.current_span(),
                ));
            }
        };
        self.advance();
        let prec = self.expect_prec()?;

        let mut decls = Vec::new();
        loop {
            let op = self.expect_op()?;
            let decl = FixityDecl {
                op,
                fixity: Fixity { assoc, prec },
            };
            debug!(op = %decl.op, prec, "fixity visible from here on");
            self.ctx.add_fixity(decl.clone());
            decls.push(decl);
            if self.check(&TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        Ok(Decl::Fixity(decls))
    }

    fn expect_prec(&mut self) -> Result<u32, ParseError> {
        let span = self.current_span();
        let value = self.expect_nat()?;
        u32::try_from(value).map_err(|_| {
            ParseError::new(ErrorCode::E1001, "operator precedence is out of range", span)
        })
    }

    /// `name : ty`
    fn parse_type_sig(&mut self) -> Result<Decl, ParseError> {
        let name = self.expect_ident()?;
        self.expect(&TokenKind::Colon)?;
        let ty = self.parse_expr()?;
        Ok(Decl::TypeSig { name, ty })
    }

    /// A pattern clause, prefix form first, then the infix form. The
    /// returned group carries the placeholder head name; collection
    /// assigns the real name once the whole module has parsed.
    fn parse_clause(&mut self) -> Result<Decl, ParseError> {
        let mut best = None;
        if let Some(decl) = self.attempt(&mut best, Self::parse_prefix_clause) {
            return Ok(decl);
        }
        if let Some(decl) = self.attempt(&mut best, Self::parse_infix_clause) {
            return Ok(decl);
        }
        Err(exhausted(
            best,
            ParseError::new(
                ErrorCode::E1005,
                format!("expected a clause, found {}", self.current_kind()),
                self.current_span(),
            ),
        ))
    }

    /// `name {imp}* pattern* = rhs`
    fn parse_prefix_clause(&mut self) -> Result<Decl, ParseError> {
        let head = self.expect_ident()?;
        let mut implicits = Vec::new();
        while self.check(&TokenKind::LBrace) {
            implicits.push(self.parse_implicit_arg()?);
        }
        let mut args = Vec::new();
        while self.at_hidden_atom_start() {
            args.push(self.parse_hidden_atom()?);
        }
        self.expect(&TokenKind::Eq)?;
        let rhs = self.parse_expr()?;

        let lhs = if implicits.is_empty() && args.is_empty() {
            Term::Ref(head.clone())
        } else {
            Term::App {
                head: Box::new(Term::Ref(head.clone())),
                implicits,
                args,
            }
        };
        Ok(clause_group(head, lhs, rhs))
    }

    /// `l ⊕ r = rhs`, defining the operator `⊕` by pattern. The
    /// operator needs no fixity entry: the fixity table governs
    /// expressions, not clause heads.
    fn parse_infix_clause(&mut self) -> Result<Decl, ParseError> {
        let left = self.parse_atom()?;
        let op = self.expect_op()?;
        let right = self.parse_atom()?;
        self.expect(&TokenKind::Eq)?;
        let rhs = self.parse_expr()?;

        let head = Name::user(&op);
        let lhs = Term::apply(Term::Ref(head.clone()), vec![left, right]);
        Ok(clause_group(head, lhs, rhs))
    }
}

/// Wrap one clause as a singleton group under the placeholder head.
fn clause_group(head: Name, lhs: Term, rhs: Term) -> Decl {
    Decl::Clauses {
        name: Name::clause_placeholder(),
        clauses: vec![Clause { head, lhs, rhs }],
    }
}
