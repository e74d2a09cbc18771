//! Token configuration: reserved words and reserved operator symbols.
//!
//! The raw layer only distinguishes shapes: identifier runs, operator
//! runs, literals, punctuation. Which identifiers are reserved words and
//! which symbol runs carry reserved meaning is decided here, in one
//! place, so the language's token configuration can be read at a glance.

use tarn_ir::TokenKind;

/// Resolve a reserved word, or `None` for a plain identifier.
pub(crate) fn reserved_word(text: &str) -> Option<TokenKind> {
    match text {
        "data" => Some(TokenKind::Data),
        "where" => Some(TokenKind::Where),
        "infixl" => Some(TokenKind::Infixl),
        "infixr" => Some(TokenKind::Infixr),
        "infix" => Some(TokenKind::Infix),
        "Set" => Some(TokenKind::Set),
        _ => None,
    }
}

/// Resolve a reserved operator symbol, or `None` for a user operator.
pub(crate) fn reserved_symbol(text: &str) -> Option<TokenKind> {
    match text {
        "=" => Some(TokenKind::Eq),
        "->" => Some(TokenKind::Arrow),
        "=>" => Some(TokenKind::FatArrow),
        ":" => Some(TokenKind::Colon),
        "|" => Some(TokenKind::Bar),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_words() {
        assert_eq!(reserved_word("data"), Some(TokenKind::Data));
        assert_eq!(reserved_word("Set"), Some(TokenKind::Set));
        assert_eq!(reserved_word("set"), None);
        assert_eq!(reserved_word("database"), None);
    }

    #[test]
    fn test_reserved_symbols() {
        assert_eq!(reserved_symbol("="), Some(TokenKind::Eq));
        assert_eq!(reserved_symbol("->"), Some(TokenKind::Arrow));
        assert_eq!(reserved_symbol("=="), None);
        assert_eq!(reserved_symbol("-->"), None);
    }
}
