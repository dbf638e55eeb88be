//! Clam Language Front End
//!
//! Scanner, parser and diagnostics for Clam, a Lox-family language.
//!
//! Text flows through [`Source`] → [`Scanner`] → tokens → [`Parser`] → AST,
//! or ends in a non-empty list of [`Diagnostic`]s:
//!
//! ```
//! use clam_parser::ast::Declaration;
//!
//! let program = clam_parser::parse("main.lox", "var answer = 6 * 7;").unwrap();
//! assert!(matches!(program[0], Declaration::Var(_)));
//!
//! let errors = clam_parser::parse("main.lox", "print 1 +;").unwrap_err();
//! assert_eq!(errors.first().message(), "expected expression, found `;`");
//! ```

pub mod ast;
pub mod diagnostic;
pub mod parser;
pub mod position;
pub mod scanner;
pub mod source;
pub mod token;

pub use diagnostic::{Diagnostic, Diagnostics, JsonDiagnostic};
pub use parser::{parse, parse_expression, parse_tokens, ParseError, ParseErrorKind, Parser};
pub use position::{LineSpan, Position};
pub use scanner::{scan_all, LexError, Scanner};
pub use source::{IndexError, Source};
pub use token::{Token, TokenKind};
