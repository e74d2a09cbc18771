//! Lexer for Tarn, built on logos.
//!
//! Lexing is two-phase: `raw` recognizes token shapes (identifier runs,
//! operator runs, literals, punctuation, comments), and the conversion
//! here cooks them into [`TokenKind`]s, resolving reserved words and
//! reserved operator symbols and processing string escapes. The returned
//! [`TokenList`] always ends with an `Eof` token.

mod keywords;
mod raw;

use logos::Logos;
use raw::RawToken;
use tarn_ir::{Span, Token, TokenKind, TokenList};
use thiserror::Error;

/// A lexical error. Fatal: the file is rejected as a whole.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unterminated string literal")]
    UnterminatedString { span: Span },
    #[error("unrecognized character in source")]
    InvalidCharacter { span: Span },
    #[error("integer literal does not fit in 64 bits")]
    IntOutOfRange { span: Span },
    #[error("invalid escape sequence `\\{escape}`")]
    InvalidEscape { span: Span, escape: char },
}

impl LexError {
    /// Where the error occurred.
    pub fn span(&self) -> Span {
        match self {
            LexError::UnterminatedString { span }
            | LexError::InvalidCharacter { span }
            | LexError::IntOutOfRange { span }
            | LexError::InvalidEscape { span, .. } => *span,
        }
    }
}

/// Lex a whole source file.
pub fn lex(source: &str) -> Result<TokenList, LexError> {
    let mut tokens = TokenList::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::from_range(lexer.span());
        let text = lexer.slice();

        let raw = match result {
            Ok(raw) => raw,
            Err(()) => {
                return Err(if text.starts_with('"') {
                    LexError::UnterminatedString { span }
                } else {
                    LexError::InvalidCharacter { span }
                });
            }
        };

        let kind = match raw {
            RawToken::Ident => keywords::reserved_word(text)
                .unwrap_or_else(|| TokenKind::Ident(text.to_owned())),
            RawToken::Int => {
                let digits: String = text.chars().filter(|c| *c != '_').collect();
                match digits.parse::<u64>() {
                    Ok(value) => TokenKind::Int(value),
                    Err(_) => return Err(LexError::IntOutOfRange { span }),
                }
            }
            RawToken::Str => TokenKind::Str(unescape(text, span)?),
            RawToken::Op => keywords::reserved_symbol(text)
                .unwrap_or_else(|| TokenKind::Op(text.to_owned())),
            RawToken::QuoteBracket => TokenKind::QuoteBracket,
            RawToken::Underscore => TokenKind::Underscore,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::Backslash => TokenKind::Backslash,
            RawToken::Semi => TokenKind::Semi,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Dot => TokenKind::Dot,
        };
        tokens.push(Token::new(kind, span));
    }

    let end = u32::try_from(source.len()).unwrap_or(u32::MAX);
    tokens.push(Token::new(TokenKind::Eof, Span::point(end)));
    Ok(tokens)
}

/// Process the escapes of a raw string literal (quotes included).
fn unescape(text: &str, span: Span) -> Result<String, LexError> {
    let inner = &text[1..text.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some(other) => return Err(LexError::InvalidEscape { span, escape: other }),
            // The literal's regex guarantees a character after `\`.
            None => return Err(LexError::InvalidCharacter { span }),
        }
    }
    Ok(out)
}
