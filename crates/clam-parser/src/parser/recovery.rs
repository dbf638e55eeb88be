//! Error recovery strategies for the parser.
//!
//! When the parser encounters an error, it uses these strategies to
//! resynchronize and continue parsing to find more errors.

use super::Parser;
use crate::token::TokenKind;

/// Synchronize to the next declaration boundary.
///
/// Skips tokens until just past a `;`, or until a token that starts a
/// declaration or statement. A `}` is left in place for the enclosing block
/// to consume.
pub fn sync_to_declaration_boundary(parser: &mut Parser) {
    while let Some(kind) = parser.current_kind() {
        match kind {
            // Declaration and statement starting tokens
            TokenKind::Class
            | TokenKind::Fun
            | TokenKind::Var
            | TokenKind::For
            | TokenKind::If
            | TokenKind::While
            | TokenKind::Print
            | TokenKind::Return => return,

            // Semicolon marks end of previous statement
            TokenKind::Semicolon => {
                parser.advance();
                return;
            }

            // Closing brace might end a block
            TokenKind::RightBrace => return,

            // Keep skipping
            _ => parser.advance(),
        }
    }
}
