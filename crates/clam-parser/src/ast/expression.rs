//! Expression AST nodes

use serde::Serialize;

use super::*;

/// Expression (produces a value)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expression {
    /// `target = value`, target is an identifier or a property access
    Assignment(AssignmentExpression),

    /// `left op right`
    Binary(BinaryExpression),

    /// `-operand`, `!operand`
    Unary(UnaryExpression),

    /// `callee(arguments)`
    Invocation(InvocationExpression),

    /// `target.property`
    PropertyAccess(PropertyAccessExpression),

    /// `true`, `false`
    BooleanLiteral(bool),

    /// `nil`
    Nil,

    /// `this`
    This,

    /// `super`
    Super,

    /// Number literal: 42, 3.14
    NumberLiteral(f64),

    /// String literal, lexeme including its quotes
    StringLiteral(String),

    /// Identifier reference
    Identifier(Identifier),
}

// ============================================================================
// Compound Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentExpression {
    pub target: Box<Expression>,
    pub value: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryExpression {
    pub left: Box<Expression>,
    pub operator: BinaryOperator,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnaryExpression {
    pub operator: UnaryOperator,
    pub operand: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvocationExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyAccessExpression {
    pub target: Box<Expression>,
    pub property: Identifier,
}

// ============================================================================
// Operators
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOperator {
    LogicalOr,
    LogicalAnd,
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::LogicalOr => "or",
            BinaryOperator::LogicalAnd => "and",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnaryOperator {
    Negate,
    LogicalNot,
}

impl UnaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOperator::Negate => "-",
            UnaryOperator::LogicalNot => "!",
        }
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl Expression {
    pub fn assignment(target: Expression, value: Expression) -> Self {
        Expression::Assignment(AssignmentExpression {
            target: Box::new(target),
            value: Box::new(value),
        })
    }

    pub fn binary(left: Expression, operator: BinaryOperator, right: Expression) -> Self {
        Expression::Binary(BinaryExpression {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    pub fn unary(operator: UnaryOperator, operand: Expression) -> Self {
        Expression::Unary(UnaryExpression {
            operator,
            operand: Box::new(operand),
        })
    }

    pub fn invocation(callee: Expression, arguments: Vec<Expression>) -> Self {
        Expression::Invocation(InvocationExpression {
            callee: Box::new(callee),
            arguments,
        })
    }

    pub fn property_access(target: Expression, property: impl Into<Identifier>) -> Self {
        Expression::PropertyAccess(PropertyAccessExpression {
            target: Box::new(target),
            property: property.into(),
        })
    }

    pub fn identifier(name: &str) -> Self {
        Expression::Identifier(Identifier::from(name))
    }

    /// Whether this expression may appear on the left of `=`.
    pub fn is_assignable(&self) -> bool {
        matches!(self, Expression::Identifier(_) | Expression::PropertyAccess(_))
    }

    /// Check if this expression is a literal
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Expression::BooleanLiteral(_)
                | Expression::Nil
                | Expression::NumberLiteral(_)
                | Expression::StringLiteral(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignable() {
        assert!(Expression::identifier("a").is_assignable());
        assert!(Expression::property_access(Expression::This, "x").is_assignable());
        assert!(!Expression::NumberLiteral(1.0).is_assignable());
        assert!(!Expression::invocation(Expression::identifier("f"), vec![]).is_assignable());
    }

    #[test]
    fn test_literal() {
        assert!(Expression::Nil.is_literal());
        assert!(Expression::StringLiteral("s".into()).is_literal());
        assert!(!Expression::This.is_literal());
    }
}
