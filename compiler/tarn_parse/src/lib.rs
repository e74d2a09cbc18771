//! Recursive descent parser for Tarn.
//!
//! Turns a token stream into declarations: fixity pragmas, type
//! signatures, data declarations, pattern clauses, and runs the
//! implicit-argument elaboration pass per declaration.
//!
//! The grammar is not static: a fixity pragma mutates the operator
//! table while the file is still being parsed, and every later
//! expression climbs over a table rebuilt from that live state. Ordered
//! choice between declaration forms is therefore transactional: an
//! abandoned alternative restores the token position *and* the ambient
//! context together (see `snapshot`).
//!
//! There is no error recovery: the first failure aborts the whole-file
//! parse and no declarations are returned.

mod collect;
mod cursor;
mod error;
mod grammar;
mod snapshot;
mod stack;
mod table;

#[cfg(test)]
mod tests;

pub use cursor::Cursor;
pub use error::ParseError;

use collect::collect_clauses;
use snapshot::Snapshot;
use tarn_diagnostic::ErrorCode;
use tarn_elab::{elaborate_decl, Context, ElabError};
use tarn_ir::{Decl, Name, Span, TokenKind, TokenList};
use tracing::trace;

/// Parser state: the token cursor plus the ambient context it mutates.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    ctx: Context,
}

impl<'a> Parser<'a> {
    /// Create a new parser over a lexed token stream.
    pub fn new(tokens: &'a TokenList, ctx: Context) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            ctx,
        }
    }

    /// The ambient context as it currently stands.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    // Cursor delegation.

    #[inline]
    fn current_kind(&self) -> &TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    #[inline]
    fn previous_span(&self) -> Span {
        self.cursor.previous_span()
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    #[inline]
    fn check(&self, kind: &TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn check_ident(&self) -> bool {
        self.cursor.check_ident()
    }

    #[inline]
    fn advance(&mut self) {
        self.cursor.advance();
    }

    #[inline]
    fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        self.cursor.expect(kind)
    }

    #[inline]
    fn expect_ident(&mut self) -> Result<Name, ParseError> {
        self.cursor.expect_ident()
    }

    #[inline]
    fn expect_op(&mut self) -> Result<String, ParseError> {
        self.cursor.expect_op()
    }

    #[inline]
    fn expect_nat(&mut self) -> Result<u64, ParseError> {
        self.cursor.expect_nat()
    }

    // Transactional alternation.

    fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.cursor.position(), self.ctx.clone())
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.cursor.set_position(snapshot.pos);
        self.ctx = snapshot.ctx;
    }

    /// Try one alternative of an ordered choice. On failure the cursor
    /// and the context roll back together, and the failure is recorded
    /// when it progressed further than the best one so far.
    fn attempt<T>(
        &mut self,
        best: &mut Option<(usize, ParseError)>,
        alternative: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Option<T> {
        let snapshot = self.snapshot();
        match alternative(self) {
            Ok(value) => Some(value),
            Err(error) => {
                let progress = self.cursor.position();
                if best.as_ref().map_or(true, |(furthest, _)| progress > *furthest) {
                    *best = Some((progress, error));
                }
                self.restore(snapshot);
                None
            }
        }
    }

    /// Parse the whole module: declarations separated by `;`, each
    /// elaborated against the context as it stands right after its own
    /// parse, then clause collection over the full list.
    pub fn parse_module(mut self) -> Result<(Vec<Decl>, Context), ParseError> {
        let mut decls = Vec::new();
        while !self.is_at_end() {
            let start = self.current_span();
            let decl = self.parse_decl()?;
            if !self.check(&TokenKind::Semi) {
                return Err(ParseError::new(
                    ErrorCode::E1006,
                    format!("expected `;` after declaration, found {}", self.current_kind()),
                    self.current_span(),
                ));
            }
            self.advance();
            let span = start.merge(self.previous_span());
            let decl = elaborate_decl(&mut self.ctx, decl)
                .map_err(|error| ParseError::new(elab_code(&error), error.to_string(), span))?;
            trace!(decl = %decl, "parsed declaration");
            decls.push(decl);
        }
        Ok((collect_clauses(decls), self.ctx))
    }
}

/// The error of the alternative that got furthest, or the fallback when
/// no alternative consumed anything.
fn exhausted(best: Option<(usize, ParseError)>, fallback: ParseError) -> ParseError {
    match best {
        Some((_, error)) => error,
        None => fallback,
    }
}

fn elab_code(error: &ElabError) -> ErrorCode {
    match error {
        ElabError::DuplicateImplicit { .. } => ErrorCode::E2001,
    }
}

/// Parse one module's token stream against an ambient context.
///
/// On success, returns the declaration list and the updated context; on
/// failure, a single fatal [`ParseError`] and nothing else.
pub fn parse_module(tokens: &TokenList, ctx: Context) -> Result<(Vec<Decl>, Context), ParseError> {
    Parser::new(tokens, ctx).parse_module()
}
