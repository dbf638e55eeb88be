//! Parser for the Clam language
//!
//! This module implements a recursive descent parser that transforms the
//! token stream from the scanner into an AST. Binary expressions use
//! precedence climbing over the ladder in [`precedence`].
//!
//! A failed declaration does not stop the parse. The error is recorded, the
//! parser skips to the next declaration boundary and carries on, so one run
//! reports every independent syntax error.

pub mod error;
pub mod expr;
pub mod guards;
pub mod precedence;
pub mod recovery;
pub mod stmt;

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::ast::*;
use crate::diagnostic::{Diagnostic, Diagnostics};
use crate::position::Position;
use crate::scanner::scan_all;
use crate::source::Source;
use crate::token::{Token, TokenKind};

pub use error::{Expectation, ParseError, ParseErrorKind};
pub use guards::MAX_PARSE_DEPTH;

/// Scan and parse a whole program.
pub fn parse(name: impl Into<String>, text: &str) -> Result<Vec<Declaration>, Diagnostics> {
    Parser::from_text(name, text)?.parse()
}

/// Parse a program from tokens already scanned out of `source`.
pub fn parse_tokens(source: Arc<Source>, tokens: Vec<Token>) -> Result<Vec<Declaration>, Diagnostics> {
    Parser::new(source, tokens).parse()
}

/// Scan and parse a single expression spanning the whole text.
pub fn parse_expression(name: impl Into<String>, text: &str) -> Result<Expression, Diagnostics> {
    Parser::from_text(name, text)?.parse_expression()
}

/// Parser state for the Clam programming language.
pub struct Parser {
    source: Arc<Source>,

    /// Pre-scanned input
    tokens: Vec<Token>,

    /// Current position in token stream
    pos: usize,

    /// Current nesting depth, see [`guards::nested`]
    depth: usize,

    /// Alternatives tried at token index `expected_at`
    expected: Vec<Expectation>,
    expected_at: usize,

    /// Accumulated parse errors (allows continuing after errors)
    errors: Vec<ParseError>,
}

impl Parser {
    pub fn new(source: Arc<Source>, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            depth: 0,
            expected: Vec::new(),
            expected_at: 0,
            errors: Vec::new(),
        }
    }

    /// Scan `text` and build a parser over the tokens.
    pub fn from_text(name: impl Into<String>, text: &str) -> Result<Self, Diagnostic> {
        let source = Arc::new(Source::new(name, text));
        let tokens = scan_all(&source)?;
        Ok(Self::new(source, tokens))
    }

    /// Parse the entire token stream as a program.
    ///
    /// Returns the declarations on success, or every diagnostic found.
    pub fn parse(mut self) -> Result<Vec<Declaration>, Diagnostics> {
        let mut declarations = Vec::new();

        // Parse top-level declarations until EOF
        while !self.at_eof() {
            if let Some(declaration) = self.declaration() {
                declarations.push(declaration);
            }
        }

        tracing::debug!(
            source = self.source.name(),
            declarations = declarations.len(),
            errors = self.errors.len(),
            "parsed program"
        );

        if !self.errors.is_empty() {
            return Err(self.into_diagnostics());
        }
        Ok(declarations)
    }

    /// Parse the entire token stream as one expression.
    pub fn parse_expression(mut self) -> Result<Expression, Diagnostics> {
        match expr::parse_expression(&mut self) {
            Ok(expression) if self.at_eof() => return Ok(expression),
            Ok(_) => {
                let error = self.unexpected(Expectation::EndOfInput);
                self.errors.push(error);
            }
            Err(error) => self.errors.push(error),
        }
        Err(self.into_diagnostics())
    }

    /// Parse one declaration, recovering from a failure.
    ///
    /// On failure the error is recorded and the parser is moved past the
    /// broken declaration, always consuming at least one token.
    pub(crate) fn declaration(&mut self) -> Option<Declaration> {
        let start = self.pos;
        self.expected.clear();
        match stmt::parse_declaration(self) {
            Ok(declaration) => Some(declaration),
            Err(error) => {
                tracing::trace!(%error, position = %error.position, "recovering from parse error");
                self.errors.push(error);
                if self.pos == start {
                    self.advance();
                }
                recovery::sync_to_declaration_boundary(self);
                None
            }
        }
    }

    fn into_diagnostics(mut self) -> Diagnostics {
        let mut seen = FxHashSet::default();
        self.errors.retain(|error| seen.insert(error.position));
        self.errors.sort_by_key(|error| error.position);

        let source = self.source;
        Diagnostics::new(
            self.errors
                .into_iter()
                .map(|error| error.into_diagnostic(Arc::clone(&source)))
                .collect(),
        )
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Get the current token, `None` at end of input.
    #[inline]
    pub fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    #[inline]
    pub fn current_kind(&self) -> Option<TokenKind> {
        self.current().map(|token| token.kind)
    }

    /// Peek at the token after the current one.
    #[inline]
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos + 1)
    }

    /// Move past the current token.
    pub fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Check if the current token has the given kind.
    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == Some(kind)
    }

    /// Check if we've reached EOF.
    #[inline]
    pub fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Consume the current token if it has the given kind.
    pub fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the current token if it matches the expected kind.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        match self.current() {
            Some(token) if token.kind == kind => {
                let token = token.clone();
                self.advance();
                Ok(token)
            }
            _ => Err(self.unexpected(Expectation::Token(kind))),
        }
    }

    pub fn expect_identifier(&mut self) -> Result<Identifier, ParseError> {
        self.expect(TokenKind::Identifier)
            .map(|token| Identifier::new(token.lexeme))
    }

    // ========================================================================
    // Error Handling
    // ========================================================================

    /// Note an alternative that would have been accepted at the current token.
    pub fn expecting(&mut self, expectation: Expectation) {
        if self.expected_at != self.pos {
            self.expected.clear();
            self.expected_at = self.pos;
        }
        if !self.expected.contains(&expectation) {
            self.expected.push(expectation);
        }
    }

    /// Build the error for a failed expectation at the current token,
    /// listing every alternative noted there.
    pub fn unexpected(&mut self, expectation: Expectation) -> ParseError {
        self.expecting(expectation);
        let expected = self.expected.clone();
        match self.current() {
            Some(token) => ParseError::unexpected_token(expected, token.kind, Position::at(token.position.start)),
            None => ParseError::unexpected_eof(expected, self.current_position()),
        }
    }

    /// Where an error at the current token is reported: the token's first
    /// character, or just past the last token at end of input.
    pub fn current_position(&self) -> Position {
        match self.current() {
            Some(token) => Position::at(token.position.start),
            None => Position::at(self.tokens.last().map_or(0, |token| token.position.end + 1)),
        }
    }

    /// Position covering tokens `start..end` (token indices).
    pub fn span_of(&self, start: usize, end: usize) -> Position {
        let first = &self.tokens[start].position;
        let last = &self.tokens[end.max(start + 1) - 1].position;
        first.merge(last)
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn source(&self) -> &Arc<Source> {
        &self.source
    }
}
