//! AST visitor pattern for traversing the syntax tree
//!
//! This module provides a visitor trait for walking the AST. Visitors can be used
//! for analysis, code generation, and other tree-walking operations.
//!
//! # Example
//!
//! ```rust
//! use clam_parser::ast::*;
//!
//! struct CountIdentifiers {
//!     count: usize,
//! }
//!
//! impl Visitor for CountIdentifiers {
//!     fn visit_identifier(&mut self, _id: &Identifier) {
//!         self.count += 1;
//!     }
//! }
//! ```

use super::*;

/// AST visitor trait
///
/// Each visit method has a default implementation that calls the
/// corresponding walk function, so an implementor overrides only the nodes it
/// cares about.
pub trait Visitor: Sized {
    // Top-level
    fn visit_program(&mut self, program: &[Declaration]) {
        walk_program(self, program);
    }

    // Declarations
    fn visit_declaration(&mut self, declaration: &Declaration) {
        walk_declaration(self, declaration);
    }

    fn visit_class_declaration(&mut self, declaration: &ClassDeclaration) {
        walk_class_declaration(self, declaration);
    }

    fn visit_fun_declaration(&mut self, declaration: &FunDeclaration) {
        walk_fun_declaration(self, declaration);
    }

    fn visit_var_declaration(&mut self, declaration: &VarDeclaration) {
        walk_var_declaration(self, declaration);
    }

    // Statements
    fn visit_statement(&mut self, stmt: &Statement) {
        walk_statement(self, stmt);
    }

    fn visit_for_statement(&mut self, stmt: &ForStatement) {
        walk_for_statement(self, stmt);
    }

    fn visit_if_statement(&mut self, stmt: &IfStatement) {
        walk_if_statement(self, stmt);
    }

    fn visit_while_statement(&mut self, stmt: &WhileStatement) {
        walk_while_statement(self, stmt);
    }

    fn visit_block_statement(&mut self, stmt: &BlockStatement) {
        walk_block_statement(self, stmt);
    }

    // Expressions
    fn visit_expression(&mut self, expr: &Expression) {
        walk_expression(self, expr);
    }

    fn visit_assignment_expression(&mut self, expr: &AssignmentExpression) {
        walk_assignment_expression(self, expr);
    }

    fn visit_binary_expression(&mut self, expr: &BinaryExpression) {
        walk_binary_expression(self, expr);
    }

    fn visit_unary_expression(&mut self, expr: &UnaryExpression) {
        walk_unary_expression(self, expr);
    }

    fn visit_invocation_expression(&mut self, expr: &InvocationExpression) {
        walk_invocation_expression(self, expr);
    }

    fn visit_property_access_expression(&mut self, expr: &PropertyAccessExpression) {
        walk_property_access_expression(self, expr);
    }

    // Leaves
    fn visit_identifier(&mut self, _id: &Identifier) {}
}

// ============================================================================
// Walk functions
// ============================================================================

pub fn walk_program<V: Visitor>(visitor: &mut V, program: &[Declaration]) {
    for declaration in program {
        visitor.visit_declaration(declaration);
    }
}

pub fn walk_declaration<V: Visitor>(visitor: &mut V, declaration: &Declaration) {
    match declaration {
        Declaration::Statement(stmt) => visitor.visit_statement(stmt),
        Declaration::Class(decl) => visitor.visit_class_declaration(decl),
        Declaration::Fun(decl) => visitor.visit_fun_declaration(decl),
        Declaration::Var(decl) => visitor.visit_var_declaration(decl),
    }
}

pub fn walk_class_declaration<V: Visitor>(visitor: &mut V, decl: &ClassDeclaration) {
    visitor.visit_identifier(&decl.name);
    if let Some(base_class) = &decl.base_class {
        visitor.visit_identifier(base_class);
    }
    for method in &decl.methods {
        visitor.visit_fun_declaration(method);
    }
}

pub fn walk_fun_declaration<V: Visitor>(visitor: &mut V, decl: &FunDeclaration) {
    visitor.visit_identifier(&decl.name);
    for parameter in &decl.parameters {
        visitor.visit_identifier(parameter);
    }
    visitor.visit_block_statement(&decl.body);
}

pub fn walk_var_declaration<V: Visitor>(visitor: &mut V, decl: &VarDeclaration) {
    visitor.visit_identifier(&decl.name);
    if let Some(initializer) = &decl.initializer {
        visitor.visit_expression(initializer);
    }
}

pub fn walk_statement<V: Visitor>(visitor: &mut V, stmt: &Statement) {
    match stmt {
        Statement::Expression(stmt) => visitor.visit_expression(&stmt.expression),
        Statement::For(stmt) => visitor.visit_for_statement(stmt),
        Statement::If(stmt) => visitor.visit_if_statement(stmt),
        Statement::Print(stmt) => visitor.visit_expression(&stmt.expression),
        Statement::Return(stmt) => {
            if let Some(value) = &stmt.value {
                visitor.visit_expression(value);
            }
        }
        Statement::While(stmt) => visitor.visit_while_statement(stmt),
        Statement::Block(stmt) => visitor.visit_block_statement(stmt),
    }
}

pub fn walk_for_statement<V: Visitor>(visitor: &mut V, stmt: &ForStatement) {
    match &stmt.initializer {
        Some(ForInitializer::Var(decl)) => visitor.visit_var_declaration(decl),
        Some(ForInitializer::Expression(expr)) => visitor.visit_expression(expr),
        None => {}
    }
    if let Some(condition) = &stmt.condition {
        visitor.visit_expression(condition);
    }
    if let Some(increment) = &stmt.increment {
        visitor.visit_expression(increment);
    }
    visitor.visit_statement(&stmt.body);
}

pub fn walk_if_statement<V: Visitor>(visitor: &mut V, stmt: &IfStatement) {
    visitor.visit_expression(&stmt.condition);
    visitor.visit_statement(&stmt.then_branch);
    if let Some(else_branch) = &stmt.else_branch {
        visitor.visit_statement(else_branch);
    }
}

pub fn walk_while_statement<V: Visitor>(visitor: &mut V, stmt: &WhileStatement) {
    visitor.visit_expression(&stmt.condition);
    visitor.visit_statement(&stmt.body);
}

pub fn walk_block_statement<V: Visitor>(visitor: &mut V, stmt: &BlockStatement) {
    for declaration in &stmt.declarations {
        visitor.visit_declaration(declaration);
    }
}

pub fn walk_expression<V: Visitor>(visitor: &mut V, expr: &Expression) {
    match expr {
        Expression::Assignment(expr) => visitor.visit_assignment_expression(expr),
        Expression::Binary(expr) => visitor.visit_binary_expression(expr),
        Expression::Unary(expr) => visitor.visit_unary_expression(expr),
        Expression::Invocation(expr) => visitor.visit_invocation_expression(expr),
        Expression::PropertyAccess(expr) => visitor.visit_property_access_expression(expr),
        Expression::Identifier(id) => visitor.visit_identifier(id),
        Expression::BooleanLiteral(_)
        | Expression::Nil
        | Expression::This
        | Expression::Super
        | Expression::NumberLiteral(_)
        | Expression::StringLiteral(_) => {}
    }
}

pub fn walk_assignment_expression<V: Visitor>(visitor: &mut V, expr: &AssignmentExpression) {
    visitor.visit_expression(&expr.target);
    visitor.visit_expression(&expr.value);
}

pub fn walk_binary_expression<V: Visitor>(visitor: &mut V, expr: &BinaryExpression) {
    visitor.visit_expression(&expr.left);
    visitor.visit_expression(&expr.right);
}

pub fn walk_unary_expression<V: Visitor>(visitor: &mut V, expr: &UnaryExpression) {
    visitor.visit_expression(&expr.operand);
}

pub fn walk_invocation_expression<V: Visitor>(visitor: &mut V, expr: &InvocationExpression) {
    visitor.visit_expression(&expr.callee);
    for argument in &expr.arguments {
        visitor.visit_expression(argument);
    }
}

pub fn walk_property_access_expression<V: Visitor>(
    visitor: &mut V,
    expr: &PropertyAccessExpression,
) {
    visitor.visit_expression(&expr.target);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountIdentifiers {
        names: Vec<String>,
    }

    impl Visitor for CountIdentifiers {
        fn visit_identifier(&mut self, id: &Identifier) {
            self.names.push(id.to_string());
        }
    }

    #[test]
    fn test_visits_every_identifier() {
        // var x = f(a).b;
        let program = vec![Declaration::Var(VarDeclaration {
            name: Identifier::from("x"),
            initializer: Some(Expression::property_access(
                Expression::invocation(
                    Expression::identifier("f"),
                    vec![Expression::identifier("a")],
                ),
                "b",
            )),
        })];

        let mut counter = CountIdentifiers::default();
        counter.visit_program(&program);
        // Property names are not references, so `b` is not visited
        assert_eq!(counter.names, vec!["x", "f", "a"]);
    }
}
