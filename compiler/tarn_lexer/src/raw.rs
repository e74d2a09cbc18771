//! Raw tokens straight out of logos, before keyword and reserved-symbol
//! cooking.
//!
//! Reserved words lex as plain identifier runs and reserved symbols as
//! plain operator runs; `keywords` resolves both in the conversion step.
//! Keeping the raw layer shape-only means the token configuration lives
//! in exactly one place.

use logos::Logos;

// `--` always starts a line comment, even where a longer operator run
// would otherwise match; its skip pattern outranks the operator regex.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"--[^\n]*")]
#[logos(skip r"\{-[^-]*-+([^}-][^-]*-+)*\}")]
pub(crate) enum RawToken {
    /// Identifier, possibly dotted: `map`, `Data.Vect`
    #[regex(r"[A-Za-z][A-Za-z0-9_']*(\.[A-Za-z][A-Za-z0-9_']*)*")]
    Ident,

    /// Decimal integer literal, `_` separators permitted
    #[regex(r"[0-9][0-9_]*")]
    Int,

    /// String literal, escapes still raw
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    Str,

    // Low priority so a bare `--` resolves as a comment, not a run.
    /// Maximal run of operator characters
    #[regex(r"[!#$%&*+/<=>?@^|~:-]+", priority = 1)]
    Op,

    #[token("![")]
    QuoteBracket,

    #[token("_")]
    Underscore,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("]")]
    RBracket,
    #[token("\\")]
    Backslash,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
}
