//! Scanner: turns a [`Source`] into [`Token`]s.
//!
//! Lexical errors are not aggregated. The first one ends the scan.

use std::sync::Arc;

use logos::Logos;
use thiserror::Error;

use crate::diagnostic::Diagnostic;
use crate::position::Position;
use crate::source::Source;
use crate::token::{Token, TokenKind};

/// Error raised by the logos callbacks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LexErrorKind {
    #[default]
    UnrecognizedToken,
    UnterminatedString,
}

/// A lexical error with its position in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unrecognized token '{character}'")]
    UnrecognizedToken { character: char, position: Position },

    #[error("unterminated string")]
    UnterminatedString { position: Position },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnrecognizedToken { position, .. } => *position,
            LexError::UnterminatedString { position } => *position,
        }
    }

    pub fn into_diagnostic(self, source: Arc<Source>) -> Diagnostic {
        Diagnostic::new(self.to_string())
            .at(self.position())
            .attach(source)
    }
}

/// Incremental scanner over one source.
///
/// Yields tokens until end of input or until the first error, after which
/// it is exhausted.
pub struct Scanner<'a> {
    source: &'a Arc<Source>,
    lexer: logos::Lexer<'a, TokenKind>,
    /// Start of the token under construction (character offset)
    start: usize,
    /// Read cursor (character offset)
    current: usize,
    /// Byte offset matching `current`
    byte_cursor: usize,
    failed: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a Arc<Source>) -> Self {
        Self {
            source,
            lexer: TokenKind::lexer(source.text()),
            start: 0,
            current: 0,
            byte_cursor: 0,
            failed: false,
        }
    }

    /// Scan one token. `Ok(None)` signals end of input.
    pub fn scan(&mut self) -> Result<Option<Token>, LexError> {
        if self.failed {
            return Ok(None);
        }
        let Some(result) = self.lexer.next() else {
            return Ok(None);
        };
        let span = self.lexer.span();
        self.start = self.advance_to(span.start);

        match result {
            Ok(kind) => {
                self.current = self.advance_to(span.end);
                Ok(Some(self.submit(kind)))
            }
            Err(LexErrorKind::UnterminatedString) => {
                self.failed = true;
                self.current = self.advance_to(span.end);
                Err(LexError::UnterminatedString {
                    position: Position::new(self.start, self.current - 1),
                })
            }
            Err(LexErrorKind::UnrecognizedToken) => {
                self.failed = true;
                let character = self.source.text()[span.start..]
                    .chars()
                    .next()
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                Err(LexError::UnrecognizedToken {
                    character,
                    position: Position::at(self.start),
                })
            }
        }
    }

    fn submit(&self, kind: TokenKind) -> Token {
        let lexeme = self.lexer.slice();
        let token = Token::new(kind, lexeme, Position::new(self.start, self.current - 1));
        tracing::trace!(kind = ?token.kind, lexeme, start = self.start, "token");
        token
    }

    /// Move the character cursor forward to a byte offset reported by logos.
    fn advance_to(&mut self, byte: usize) -> usize {
        let skipped = self.source.text()[self.byte_cursor..byte].chars().count();
        self.byte_cursor = byte;
        self.current += skipped;
        self.current
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Token, Diagnostic>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.scan() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => None,
            Err(error) => Some(Err(error.into_diagnostic(Arc::clone(self.source)))),
        }
    }
}

impl std::iter::FusedIterator for Scanner<'_> {}

/// Scan the whole source, stopping at the first lexical error.
pub fn scan_all(source: &Arc<Source>) -> Result<Vec<Token>, Diagnostic> {
    let tokens = Scanner::new(source).collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(source = source.name(), tokens = tokens.len(), "scanned source");
    Ok(tokens)
}
