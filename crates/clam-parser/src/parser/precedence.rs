//! Operator precedence table for expression parsing.
//!
//! Every binary operator is left-associative; assignment is the only
//! right-associative construct and is handled outside the table.

use crate::ast::{BinaryOperator, Expression};
use crate::token::TokenKind;

/// Operator precedence level (higher = tighter binding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    None = 0,
    Assignment = 1,     // =
    LogicalOr = 2,      // or
    LogicalAnd = 3,     // and
    Equality = 4,       // ==, !=
    Comparison = 5,     // <, >, <=, >=
    Additive = 6,       // +, -
    Multiplicative = 7, // *, /
    Unary = 8,          // !, -
    Invocation = 9,     // (), .
    Primary = 10,       // Literals, identifiers, ()
}

impl Precedence {
    /// The next tighter level.
    pub fn next(self) -> Precedence {
        match self {
            Precedence::None => Precedence::Assignment,
            Precedence::Assignment => Precedence::LogicalOr,
            Precedence::LogicalOr => Precedence::LogicalAnd,
            Precedence::LogicalAnd => Precedence::Equality,
            Precedence::Equality => Precedence::Comparison,
            Precedence::Comparison => Precedence::Additive,
            Precedence::Additive => Precedence::Multiplicative,
            Precedence::Multiplicative => Precedence::Unary,
            Precedence::Unary => Precedence::Invocation,
            Precedence::Invocation | Precedence::Primary => Precedence::Primary,
        }
    }

    /// Binding strength of an already-built expression, used when printing.
    pub fn of_expression(expression: &Expression) -> Precedence {
        match expression {
            Expression::Assignment(_) => Precedence::Assignment,
            Expression::Binary(binary) => binary.operator.precedence(),
            Expression::Unary(_) => Precedence::Unary,
            Expression::Invocation(_) | Expression::PropertyAccess(_) => Precedence::Invocation,
            _ => Precedence::Primary,
        }
    }
}

impl BinaryOperator {
    pub fn precedence(&self) -> Precedence {
        match self {
            BinaryOperator::LogicalOr => Precedence::LogicalOr,
            BinaryOperator::LogicalAnd => Precedence::LogicalAnd,
            BinaryOperator::Equal | BinaryOperator::NotEqual => Precedence::Equality,
            BinaryOperator::Greater
            | BinaryOperator::GreaterEqual
            | BinaryOperator::Less
            | BinaryOperator::LessEqual => Precedence::Comparison,
            BinaryOperator::Add | BinaryOperator::Subtract => Precedence::Additive,
            BinaryOperator::Multiply | BinaryOperator::Divide => Precedence::Multiplicative,
        }
    }
}

/// Map an infix token to its binary operator.
pub fn binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    let operator = match kind {
        TokenKind::Or => BinaryOperator::LogicalOr,
        TokenKind::And => BinaryOperator::LogicalAnd,
        TokenKind::EqualEqual => BinaryOperator::Equal,
        TokenKind::BangEqual => BinaryOperator::NotEqual,
        TokenKind::Greater => BinaryOperator::Greater,
        TokenKind::GreaterEqual => BinaryOperator::GreaterEqual,
        TokenKind::Less => BinaryOperator::Less,
        TokenKind::LessEqual => BinaryOperator::LessEqual,
        TokenKind::Plus => BinaryOperator::Add,
        TokenKind::Minus => BinaryOperator::Subtract,
        TokenKind::Star => BinaryOperator::Multiply,
        TokenKind::Slash => BinaryOperator::Divide,
        _ => return None,
    };
    Some(operator)
}

/// Get the precedence of a binary operator token.
pub fn get_precedence(kind: TokenKind) -> Precedence {
    binary_operator(kind).map_or(Precedence::None, |operator| operator.precedence())
}
