//! Statement AST nodes
//!
//! Statements never introduce names at their own level; `var`, `fun` and
//! `class` are [`Declaration`]s. A block holds declarations so it can open a
//! scope.

use serde::Serialize;

use super::*;

/// Statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Statement {
    /// Expression evaluated for its effect: `f(x);`
    Expression(ExpressionStatement),

    /// For loop
    For(ForStatement),

    /// If statement
    If(IfStatement),

    /// `print value;`
    Print(PrintStatement),

    /// `return;` or `return value;`
    Return(ReturnStatement),

    /// While loop
    While(WhileStatement),

    /// Block: `{ declarations }`
    Block(BlockStatement),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionStatement {
    pub expression: Expression,
}

/// `for (initializer; condition; increment) body`
///
/// Every clause is optional. The initializer is either a variable
/// declaration or an expression, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForStatement {
    pub initializer: Option<ForInitializer>,
    pub condition: Option<Expression>,
    pub increment: Option<Expression>,
    pub body: Box<Statement>,
}

/// First clause of a `for` loop
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ForInitializer {
    Var(VarDeclaration),
    Expression(Expression),
}

impl ForStatement {
    pub fn var_initializer(&self) -> Option<&VarDeclaration> {
        match &self.initializer {
            Some(ForInitializer::Var(declaration)) => Some(declaration),
            _ => None,
        }
    }

    pub fn expression_initializer(&self) -> Option<&Expression> {
        match &self.initializer {
            Some(ForInitializer::Expression(expression)) => Some(expression),
            _ => None,
        }
    }
}

/// `if (condition) then else otherwise`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_branch: Box<Statement>,
    pub else_branch: Option<Box<Statement>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrintStatement {
    pub expression: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnStatement {
    pub value: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BlockStatement {
    pub declarations: Vec<Declaration>,
}

impl Statement {
    pub fn expression(expression: Expression) -> Self {
        Statement::Expression(ExpressionStatement { expression })
    }

    pub fn print(expression: Expression) -> Self {
        Statement::Print(PrintStatement { expression })
    }

    pub fn block(declarations: Vec<Declaration>) -> Self {
        Statement::Block(BlockStatement { declarations })
    }
}
