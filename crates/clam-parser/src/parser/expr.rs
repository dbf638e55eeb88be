//! Expression parsing
//!
//! ```text
//! expression  := assignment
//! assignment  := (invocation ".")? IDENT "=" assignment | binary
//! binary      := unary (OPERATOR unary)*      // precedence climbing
//! unary       := ("!" | "-") unary | invocation
//! invocation  := primary ("(" arguments? ")" | "." IDENT)*
//! primary     := literal | IDENT | "this" | "super" | "(" expression ")"
//! ```

use super::error::{Expectation, ParseError, ParseErrorKind};
use super::guards;
use super::precedence::{binary_operator, Precedence};
use super::Parser;
use crate::ast::*;
use crate::token::TokenKind;

/// Parse an expression.
pub fn parse_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    guards::nested(parser, "expression", parse_assignment)
}

/// Assignment is right-associative and only accepts identifiers and
/// property accesses as targets.
fn parse_assignment(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start = parser.pos();
    let target = parse_binary(parser, Precedence::LogicalOr)?;
    let end = parser.pos();

    if !parser.matches(TokenKind::Equal) {
        return Ok(target);
    }
    if !target.is_assignable() {
        return Err(ParseError::new(
            ParseErrorKind::InvalidAssignmentTarget,
            parser.span_of(start, end),
        ));
    }

    let value = parse_expression(parser)?;
    Ok(Expression::assignment(target, value))
}

/// Precedence climbing: fold operators binding at least as tight as
/// `minimum`, left-associatively.
fn parse_binary(parser: &mut Parser, minimum: Precedence) -> Result<Expression, ParseError> {
    let mut left = parse_unary(parser)?;

    while let Some(operator) = parser.current_kind().and_then(binary_operator) {
        let precedence = operator.precedence();
        if precedence < minimum {
            break;
        }
        parser.advance();
        let right = parse_binary(parser, precedence.next())?;
        left = Expression::binary(left, operator, right);
    }

    Ok(left)
}

fn parse_unary(parser: &mut Parser) -> Result<Expression, ParseError> {
    let operator = match parser.current_kind() {
        Some(TokenKind::Bang) => UnaryOperator::LogicalNot,
        Some(TokenKind::Minus) => UnaryOperator::Negate,
        _ => return parse_invocation(parser),
    };
    parser.advance();

    let operand = guards::nested(parser, "unary expression", parse_unary)?;
    Ok(Expression::unary(operator, operand))
}

fn parse_invocation(parser: &mut Parser) -> Result<Expression, ParseError> {
    let mut expression = parse_primary(parser)?;

    loop {
        if parser.matches(TokenKind::LeftParen) {
            let arguments = parse_arguments(parser)?;
            expression = Expression::invocation(expression, arguments);
        } else if parser.matches(TokenKind::Dot) {
            let property = parser.expect_identifier()?;
            expression = Expression::property_access(expression, property);
        } else {
            break;
        }
    }

    Ok(expression)
}

/// Arguments after the opening parenthesis, closing parenthesis included.
fn parse_arguments(parser: &mut Parser) -> Result<Vec<Expression>, ParseError> {
    let mut arguments = Vec::new();
    if parser.matches(TokenKind::RightParen) {
        return Ok(arguments);
    }

    loop {
        arguments.push(parse_expression(parser)?);
        if !parser.matches(TokenKind::Comma) {
            break;
        }
    }

    parser.expecting(Expectation::Token(TokenKind::Comma));
    parser.expect(TokenKind::RightParen)?;
    Ok(arguments)
}

fn parse_primary(parser: &mut Parser) -> Result<Expression, ParseError> {
    let Some(token) = parser.current().cloned() else {
        return Err(parser.unexpected(Expectation::Expression));
    };

    let expression = match token.kind {
        TokenKind::True => Expression::BooleanLiteral(true),
        TokenKind::False => Expression::BooleanLiteral(false),
        TokenKind::Nil => Expression::Nil,
        TokenKind::This => Expression::This,
        TokenKind::Super => Expression::Super,
        TokenKind::Number => {
            let value = token.lexeme.parse::<f64>().map_err(|_| {
                ParseError::new(
                    ParseErrorKind::InvalidNumber {
                        value: token.lexeme.clone(),
                    },
                    token.position,
                )
            })?;
            Expression::NumberLiteral(value)
        }
        TokenKind::String => Expression::StringLiteral(token.lexeme),
        TokenKind::Identifier => Expression::Identifier(Identifier::new(token.lexeme)),
        TokenKind::LeftParen => {
            parser.advance();
            let inner = parse_expression(parser)?;
            parser.expect(TokenKind::RightParen)?;
            return Ok(inner);
        }
        _ => return Err(parser.unexpected(Expectation::Expression)),
    };

    parser.advance();
    Ok(expression)
}
