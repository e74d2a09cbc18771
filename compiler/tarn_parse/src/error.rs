//! Parse errors.

use tarn_diagnostic::{Diagnostic, ErrorCode};
use tarn_ir::Span;

/// Parse error with an error code for rich diagnostics.
///
/// The front end is fail-fast: one of these aborts the whole-file parse
/// and no declarations are returned.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseError {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Human-readable expectation message.
    pub message: String,
    /// Location of the error.
    pub span: Span,
    /// Optional context for suggestions.
    pub context: Option<String>,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        ParseError {
            code,
            message: message.into(),
            span,
            context: None,
        }
    }

    /// Add context for better error messages.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Convert to a full Diagnostic for rich error reporting.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code)
            .with_message(self.message.as_str())
            .with_label(self.span, self.context.as_deref().unwrap_or("here"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_diagnostic() {
        let error = ParseError::new(ErrorCode::E1006, "expected `;`", Span::new(4, 5))
            .with_context("declarations end with a terminator");
        let diag = error.to_diagnostic();
        assert_eq!(diag.code, ErrorCode::E1006);
        assert_eq!(diag.message, "expected `;`");
        assert_eq!(diag.primary_span(), Span::new(4, 5));
        assert_eq!(diag.labels[0].message, "declarations end with a terminator");
    }
}
