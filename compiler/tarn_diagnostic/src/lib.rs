//! Diagnostic system for the Tarn front end.
//!
//! Every failure carries an error code for searchability, a message
//! saying what went wrong, and one primary span saying where. The front
//! end is fail-fast: a diagnostic always aborts the whole-file parse,
//! so there is no queueing or severity machinery here.

use std::fmt;
use tarn_ir::Span;

/// Error codes for all front-end diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E0xxx: lexer errors
/// - E1xxx: parser errors
/// - E2xxx: implicit-elaboration errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // ===== Lexer Errors (E0xxx) =====
    /// Unterminated string literal
    E0001,
    /// Unrecognized character in source
    E0002,
    /// Integer literal out of range
    E0003,
    /// Invalid escape sequence
    E0004,

    // ===== Parser Errors (E1xxx) =====
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Expected identifier
    E1003,
    /// Expected operator
    E1004,
    /// Expected declaration
    E1005,
    /// Missing statement terminator
    E1006,
    /// Non-associative operator chained
    E1007,
    /// Expected constructor
    E1008,

    // ===== Elaboration Errors (E2xxx) =====
    /// Implicit argument bound more than once
    E2001,
}

impl ErrorCode {
    /// The code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E2001 => "E2001",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A labeled source range inside a diagnostic.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Label {
    pub span: Span,
    pub message: String,
}

/// A structured diagnostic: code, message, labels.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
    pub labels: Vec<Label>,
}

impl Diagnostic {
    /// Start an error diagnostic with the given code.
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            message: String::new(),
            labels: Vec::new(),
        }
    }

    /// Set the main message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach a labeled span.
    #[must_use]
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label {
            span,
            message: message.into(),
        });
        self
    }

    /// The primary span: the first label's, or a dummy when none is set.
    pub fn primary_span(&self) -> Span {
        self.labels.first().map_or(Span::DUMMY, |label| label.span)
    }
}
