//! Data declarations.
//!
//! Two mutually exclusive surfaces, both lowered to one kind plus
//! constructor-type representation: the indexed form spells everything
//! out, the parametric form synthesizes its kinds and constructor
//! types.

use crate::{ParseError, Parser};
use tarn_diagnostic::ErrorCode;
use tarn_ir::{DataDecl, Decl, Name, Plicity, Term, TokenKind};

impl Parser<'_> {
    pub(crate) fn parse_data_decl(&mut self) -> Result<Decl, ParseError> {
        self.expect(&TokenKind::Data)?;
        let name = self.expect_ident()?;
        if self.check(&TokenKind::Colon) {
            self.parse_indexed_data(name)
        } else {
            self.parse_parametric_data(name)
        }
    }

    /// `data T : kind where C1 : ty1 | C2 : ty2`. Each constructor's
    /// declared type is used verbatim.
    fn parse_indexed_data(&mut self, name: Name) -> Result<Decl, ParseError> {
        self.expect(&TokenKind::Colon)?;
        let kind = self.parse_expr()?;
        self.expect(&TokenKind::Where)?;

        let mut ctors = vec![self.parse_ctor_sig()?];
        while self.check(&TokenKind::Bar) {
            self.advance();
            ctors.push(self.parse_ctor_sig()?);
        }
        Ok(Decl::Data(DataDecl {
            name,
            ty: kind,
            ctors,
        }))
    }

    fn parse_ctor_sig(&mut self) -> Result<(Name, Term), ParseError> {
        let name = self.expect_ctor_name()?;
        self.expect(&TokenKind::Colon)?;
        let ty = self.parse_expr()?;
        Ok((name, ty))
    }

    /// `data T p1 .. pn = C a b | D`. Synthesizes the kind
    /// `(p1 : Set) -> .. -> (pn : Set) -> Set` and each constructor's
    /// type as explicit arrows over its argument atoms, ending in
    /// `T p1 .. pn`.
    ///
    /// Parameter kinds are not inferred from usage; every parameter is
    /// assumed to live in `Set`. Known limitation of this form.
    fn parse_parametric_data(&mut self, name: Name) -> Result<Decl, ParseError> {
        let mut params = Vec::new();
        while self.check_ident() {
            params.push(self.expect_ident()?);
        }
        self.expect(&TokenKind::Eq)?;

        let mut ctors = vec![self.parse_parametric_ctor(&name, &params)?];
        while self.check(&TokenKind::Bar) {
            self.advance();
            ctors.push(self.parse_parametric_ctor(&name, &params)?);
        }

        let kind = params.iter().rev().fold(Term::Universe, |cod, param| Term::Pi {
            plicity: Plicity::Explicit,
            name: param.clone(),
            dom: Box::new(Term::Universe),
            cod: Box::new(cod),
        });
        Ok(Decl::Data(DataDecl {
            name,
            ty: kind,
            ctors,
        }))
    }

    fn parse_parametric_ctor(
        &mut self,
        ty_name: &Name,
        params: &[Name],
    ) -> Result<(Name, Term), ParseError> {
        let name = self.expect_ctor_name()?;
        let mut arg_tys = Vec::new();
        while self.at_atom_start() {
            arg_tys.push(self.parse_atom()?);
        }

        let result = if params.is_empty() {
            Term::Ref(ty_name.clone())
        } else {
            Term::apply(
                Term::Ref(ty_name.clone()),
                params.iter().cloned().map(Term::Ref).collect(),
            )
        };
        let ty = arg_tys.into_iter().rev().fold(result, |cod, dom| Term::Pi {
            plicity: Plicity::Explicit,
            name: Name::machine(0, "X"),
            dom: Box::new(dom),
            cod: Box::new(cod),
        });
        Ok((name, ty))
    }

    fn expect_ctor_name(&mut self) -> Result<Name, ParseError> {
        if self.check_ident() {
            self.expect_ident()
        } else {
            Err(ParseError::new(
                ErrorCode::E1008,
                format!("expected a constructor name, found {}", self.current_kind()),
                self.current_span(),
            ))
        }
    }
}
