//! Parse error types and error reporting

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::diagnostic::Diagnostic;
use crate::position::Position;
use crate::source::Source;
use crate::token::TokenKind;

/// A parse error anchored in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ParseError {
    /// The kind of error that occurred
    pub kind: ParseErrorKind,

    /// Source location of the error
    pub position: Position,
}

/// Something the parser would have accepted at a failure point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expectation {
    Token(TokenKind),
    Expression,
    EndOfInput,
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Token(kind) => write!(f, "{kind}"),
            Expectation::Expression => write!(f, "expression"),
            Expectation::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// The kind of parse error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// Unexpected token found
    #[error("expected {}, found {found}", describe(.expected))]
    UnexpectedToken {
        expected: Vec<Expectation>,
        found: TokenKind,
    },

    /// Unexpected end of input
    #[error("expected {}, found end of input", describe(.expected))]
    UnexpectedEof { expected: Vec<Expectation> },

    /// Left side of `=` is not an identifier or property access
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,

    /// Number lexeme that does not convert to a float
    #[error("invalid number literal `{value}`")]
    InvalidNumber { value: String },

    /// Parser exceeded its nesting limit
    #[error("maximum nesting depth ({limit}) exceeded in {context}")]
    NestingTooDeep {
        limit: usize,
        context: &'static str,
    },
}

/// `a`, `a or b`, `a, b or c`
fn describe(expected: &[Expectation]) -> String {
    match expected {
        [] => "something else".to_string(),
        [only] => only.to_string(),
        [init @ .., last] => {
            let init: Vec<String> = init.iter().map(ToString::to_string).collect();
            format!("{} or {last}", init.join(", "))
        }
    }
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: Position) -> Self {
        Self { kind, position }
    }

    /// Create an "unexpected token" error.
    pub fn unexpected_token(expected: Vec<Expectation>, found: TokenKind, position: Position) -> Self {
        Self::new(ParseErrorKind::UnexpectedToken { expected, found }, position)
    }

    /// Create an "unexpected end of input" error.
    pub fn unexpected_eof(expected: Vec<Expectation>, position: Position) -> Self {
        Self::new(ParseErrorKind::UnexpectedEof { expected }, position)
    }

    /// Create a "nesting too deep" error.
    pub fn nesting_too_deep(limit: usize, context: &'static str, position: Position) -> Self {
        Self::new(ParseErrorKind::NestingTooDeep { limit, context }, position)
    }

    pub fn into_diagnostic(self, source: Arc<Source>) -> Diagnostic {
        Diagnostic::new(self.kind.to_string())
            .at(self.position)
            .attach(source)
    }
}
