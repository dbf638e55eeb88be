//! Declaration and statement parsing
//!
//! ```text
//! declaration := classDecl | funDecl | varDecl | statement
//! classDecl   := "class" IDENT ("<" IDENT)? "{" funDecl* "}"
//! funDecl     := "fun" IDENT "(" parameters? ")" block
//! varDecl     := "var" IDENT ("=" expression)? ";"
//! statement   := exprStmt | forStmt | ifStmt | printStmt
//!              | returnStmt | whileStmt | block
//! ```

use super::error::{Expectation, ParseError};
use super::expr::parse_expression;
use super::guards;
use super::Parser;
use crate::ast::*;
use crate::token::TokenKind;

/// Parse a declaration.
pub fn parse_declaration(parser: &mut Parser) -> Result<Declaration, ParseError> {
    match parser.current_kind() {
        Some(TokenKind::Class) => parse_class_declaration(parser).map(Declaration::Class),
        Some(TokenKind::Fun) => parse_fun_declaration(parser).map(Declaration::Fun),
        Some(TokenKind::Var) => parse_var_declaration(parser).map(Declaration::Var),
        _ => parse_statement(parser).map(Declaration::Statement),
    }
}

fn parse_class_declaration(parser: &mut Parser) -> Result<ClassDeclaration, ParseError> {
    parser.expect(TokenKind::Class)?;
    let name = parser.expect_identifier()?;

    let base_class = if parser.matches(TokenKind::Less) {
        Some(parser.expect_identifier()?)
    } else {
        parser.expecting(Expectation::Token(TokenKind::Less));
        None
    };

    parser.expect(TokenKind::LeftBrace)?;
    let mut methods = Vec::new();
    while parser.check(TokenKind::Fun) {
        methods.push(parse_fun_declaration(parser)?);
    }
    parser.expecting(Expectation::Token(TokenKind::Fun));
    parser.expect(TokenKind::RightBrace)?;

    Ok(ClassDeclaration {
        name,
        base_class,
        methods,
    })
}

fn parse_fun_declaration(parser: &mut Parser) -> Result<FunDeclaration, ParseError> {
    guards::nested(parser, "function", parse_fun_body)
}

fn parse_fun_body(parser: &mut Parser) -> Result<FunDeclaration, ParseError> {
    parser.expect(TokenKind::Fun)?;
    let name = parser.expect_identifier()?;

    parser.expect(TokenKind::LeftParen)?;
    let mut parameters = Vec::new();
    if !parser.check(TokenKind::RightParen) {
        loop {
            parameters.push(parser.expect_identifier()?);
            if !parser.matches(TokenKind::Comma) {
                break;
            }
        }
        parser.expecting(Expectation::Token(TokenKind::Comma));
    } else {
        parser.expecting(Expectation::Token(TokenKind::Identifier));
    }
    parser.expect(TokenKind::RightParen)?;

    let body = parse_block(parser)?;
    Ok(FunDeclaration {
        name,
        parameters,
        body,
    })
}

fn parse_var_declaration(parser: &mut Parser) -> Result<VarDeclaration, ParseError> {
    parser.expect(TokenKind::Var)?;
    let name = parser.expect_identifier()?;

    let initializer = if parser.matches(TokenKind::Equal) {
        Some(parse_expression(parser)?)
    } else {
        parser.expecting(Expectation::Token(TokenKind::Equal));
        None
    };
    parser.expect(TokenKind::Semicolon)?;

    Ok(VarDeclaration { name, initializer })
}

/// Parse a statement.
pub fn parse_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    guards::nested(parser, "statement", |parser| match parser.current_kind() {
        Some(TokenKind::For) => parse_for_statement(parser),
        Some(TokenKind::If) => parse_if_statement(parser),
        Some(TokenKind::Print) => parse_print_statement(parser),
        Some(TokenKind::Return) => parse_return_statement(parser),
        Some(TokenKind::While) => parse_while_statement(parser),
        Some(TokenKind::LeftBrace) => parse_block(parser).map(Statement::Block),
        _ => parse_expression_statement(parser),
    })
}

fn parse_expression_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let expression = parse_expression(parser)?;
    parser.expect(TokenKind::Semicolon)?;
    Ok(Statement::expression(expression))
}

/// Parse for statement: for (init; condition; increment) body
fn parse_for_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    parser.expect(TokenKind::For)?;
    parser.expect(TokenKind::LeftParen)?;

    let initializer = match parser.current_kind() {
        Some(TokenKind::Semicolon) => {
            parser.advance();
            None
        }
        Some(TokenKind::Var) => Some(ForInitializer::Var(parse_var_declaration(parser)?)),
        _ => {
            parser.expecting(Expectation::Token(TokenKind::Var));
            parser.expecting(Expectation::Token(TokenKind::Semicolon));
            let expression = parse_expression(parser)?;
            parser.expect(TokenKind::Semicolon)?;
            Some(ForInitializer::Expression(expression))
        }
    };

    let condition = if parser.check(TokenKind::Semicolon) {
        None
    } else {
        parser.expecting(Expectation::Token(TokenKind::Semicolon));
        Some(parse_expression(parser)?)
    };
    parser.expect(TokenKind::Semicolon)?;

    let increment = if parser.check(TokenKind::RightParen) {
        None
    } else {
        parser.expecting(Expectation::Token(TokenKind::RightParen));
        Some(parse_expression(parser)?)
    };
    parser.expect(TokenKind::RightParen)?;

    let body = Box::new(parse_statement(parser)?);
    Ok(Statement::For(ForStatement {
        initializer,
        condition,
        increment,
        body,
    }))
}

/// Parse if statement; `else` binds to the nearest `if`.
fn parse_if_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    parser.expect(TokenKind::If)?;
    parser.expect(TokenKind::LeftParen)?;
    let condition = parse_expression(parser)?;
    parser.expect(TokenKind::RightParen)?;

    let then_branch = Box::new(parse_statement(parser)?);
    let else_branch = if parser.matches(TokenKind::Else) {
        Some(Box::new(parse_statement(parser)?))
    } else {
        None
    };

    Ok(Statement::If(IfStatement {
        condition,
        then_branch,
        else_branch,
    }))
}

fn parse_print_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    parser.expect(TokenKind::Print)?;
    let expression = parse_expression(parser)?;
    parser.expect(TokenKind::Semicolon)?;
    Ok(Statement::print(expression))
}

fn parse_return_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    parser.expect(TokenKind::Return)?;
    let value = if parser.check(TokenKind::Semicolon) {
        None
    } else {
        parser.expecting(Expectation::Token(TokenKind::Semicolon));
        Some(parse_expression(parser)?)
    };
    parser.expect(TokenKind::Semicolon)?;
    Ok(Statement::Return(ReturnStatement { value }))
}

fn parse_while_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    parser.expect(TokenKind::While)?;
    parser.expect(TokenKind::LeftParen)?;
    let condition = parse_expression(parser)?;
    parser.expect(TokenKind::RightParen)?;
    let body = Box::new(parse_statement(parser)?);
    Ok(Statement::While(WhileStatement { condition, body }))
}

/// Parse a block. Errors inside the block are recorded and recovered from
/// declaration by declaration, so only a missing brace fails the block.
pub fn parse_block(parser: &mut Parser) -> Result<BlockStatement, ParseError> {
    parser.expect(TokenKind::LeftBrace)?;

    let mut declarations = Vec::new();
    while !parser.check(TokenKind::RightBrace) && !parser.at_eof() {
        if let Some(declaration) = parser.declaration() {
            declarations.push(declaration);
        }
    }
    parser.expect(TokenKind::RightBrace)?;

    Ok(BlockStatement { declarations })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Declaration, ParseError> {
        let mut parser = Parser::from_text("test", text).unwrap();
        parse_declaration(&mut parser)
    }

    #[test]
    fn test_parse_class_with_base() {
        let Declaration::Class(class) = parse("class B < A { fun f() {} }").unwrap() else {
            panic!("Expected class declaration");
        };
        assert_eq!(class.name.as_str(), "B");
        assert_eq!(class.base_class.as_ref().map(Identifier::as_str), Some("A"));
        assert_eq!(class.methods.len(), 1);
        assert_eq!(class.methods[0].name.as_str(), "f");
    }

    #[test]
    fn test_class_body_expectations() {
        let error = parse("class A { var x; }").unwrap_err();
        assert_eq!(error.to_string(), "expected `fun` or `}`, found `var`");
    }

    #[test]
    fn test_parse_for_with_var_initializer() {
        let Declaration::Statement(Statement::For(stmt)) =
            parse("for (var i = 0; i < 3; i = i + 1) print i;").unwrap()
        else {
            panic!("Expected for statement");
        };
        assert_eq!(stmt.var_initializer().map(|v| v.name.as_str()), Some("i"));
        assert!(stmt.expression_initializer().is_none());
        assert!(stmt.condition.is_some());
        assert!(stmt.increment.is_some());
    }

    #[test]
    fn test_parse_for_with_empty_clauses() {
        let Declaration::Statement(Statement::For(stmt)) = parse("for (;;) {}").unwrap() else {
            panic!("Expected for statement");
        };
        assert!(stmt.initializer.is_none());
        assert!(stmt.condition.is_none());
        assert!(stmt.increment.is_none());
    }

    #[test]
    fn test_for_initializer_expectations() {
        let error = parse("for (}").unwrap_err();
        assert_eq!(
            error.to_string(),
            "expected `var`, `;` or expression, found `}`"
        );
    }

    #[test]
    fn test_dangling_else_binds_inner() {
        let Declaration::Statement(Statement::If(outer)) =
            parse("if (a) if (b) print 1; else print 2;").unwrap()
        else {
            panic!("Expected if statement");
        };
        assert!(outer.else_branch.is_none());
        let Statement::If(inner) = *outer.then_branch else {
            panic!("Expected nested if statement");
        };
        assert!(inner.else_branch.is_some());
    }
}
