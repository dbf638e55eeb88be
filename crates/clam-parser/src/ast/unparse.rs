//! Pretty-printer turning an AST back into source text.
//!
//! Output re-parses to a structurally identical tree. Parentheses are only
//! emitted where the precedence ladder requires them.

use std::fmt;

use super::*;
use crate::parser::precedence::Precedence;

const INDENT: &str = "    ";

/// Print a whole program, one top-level declaration per line.
pub fn unparse(program: &[Declaration]) -> String {
    let mut printer = Printer::default();
    for declaration in program {
        printer.declaration(declaration);
        printer.out.push('\n');
    }
    printer.out
}

#[derive(Default)]
struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn indentation(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn declaration(&mut self, declaration: &Declaration) {
        match declaration {
            Declaration::Statement(stmt) => self.statement(stmt),
            Declaration::Class(class) => self.class(class),
            Declaration::Fun(fun) => {
                self.write("fun ");
                self.function(fun);
            }
            Declaration::Var(var) => self.var(var),
        }
    }

    fn class(&mut self, class: &ClassDeclaration) {
        self.write("class ");
        self.write(class.name.as_str());
        if let Some(base_class) = &class.base_class {
            self.write(" < ");
            self.write(base_class.as_str());
        }
        if class.methods.is_empty() {
            self.write(" {}");
            return;
        }
        self.write(" {\n");
        self.indent += 1;
        for method in &class.methods {
            self.indentation();
            self.write("fun ");
            self.function(method);
            self.out.push('\n');
        }
        self.indent -= 1;
        self.indentation();
        self.write("}");
    }

    fn function(&mut self, fun: &FunDeclaration) {
        self.write(fun.name.as_str());
        self.write("(");
        let parameters: Vec<&str> = fun.parameters.iter().map(Identifier::as_str).collect();
        self.write(&parameters.join(", "));
        self.write(") ");
        self.block(&fun.body);
    }

    fn var(&mut self, var: &VarDeclaration) {
        self.write("var ");
        self.write(var.name.as_str());
        if let Some(initializer) = &var.initializer {
            self.write(" = ");
            self.expression(initializer);
        }
        self.write(";");
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Expression(stmt) => {
                self.expression(&stmt.expression);
                self.write(";");
            }
            Statement::For(stmt) => self.for_statement(stmt),
            Statement::If(stmt) => self.if_statement(stmt),
            Statement::Print(stmt) => {
                self.write("print ");
                self.expression(&stmt.expression);
                self.write(";");
            }
            Statement::Return(stmt) => match &stmt.value {
                Some(value) => {
                    self.write("return ");
                    self.expression(value);
                    self.write(";");
                }
                None => self.write("return;"),
            },
            Statement::While(stmt) => {
                self.write("while (");
                self.expression(&stmt.condition);
                self.write(") ");
                self.statement(&stmt.body);
            }
            Statement::Block(block) => self.block(block),
        }
    }

    fn for_statement(&mut self, stmt: &ForStatement) {
        self.write("for (");
        match &stmt.initializer {
            Some(ForInitializer::Var(var)) => self.var(var),
            Some(ForInitializer::Expression(expression)) => {
                self.expression(expression);
                self.write(";");
            }
            None => self.write(";"),
        }
        if let Some(condition) = &stmt.condition {
            self.write(" ");
            self.expression(condition);
        }
        self.write(";");
        if let Some(increment) = &stmt.increment {
            self.write(" ");
            self.expression(increment);
        }
        self.write(") ");
        self.statement(&stmt.body);
    }

    fn if_statement(&mut self, stmt: &IfStatement) {
        self.write("if (");
        self.expression(&stmt.condition);
        self.write(") ");

        // An `else` binds to the nearest `if`, so a then-branch ending in an
        // `if` without its own `else` has to be braced to keep the outer `else`.
        if stmt.else_branch.is_some() && ends_with_open_if(&stmt.then_branch) {
            self.block(&BlockStatement {
                declarations: vec![Declaration::Statement((*stmt.then_branch).clone())],
            });
        } else {
            self.statement(&stmt.then_branch);
        }

        if let Some(else_branch) = &stmt.else_branch {
            self.write(" else ");
            self.statement(else_branch);
        }
    }

    fn block(&mut self, block: &BlockStatement) {
        if block.declarations.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{\n");
        self.indent += 1;
        for declaration in &block.declarations {
            self.indentation();
            self.declaration(declaration);
            self.out.push('\n');
        }
        self.indent -= 1;
        self.indentation();
        self.write("}");
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn expression(&mut self, expr: &Expression) {
        match expr {
            Expression::Assignment(assignment) => {
                self.expression(&assignment.target);
                self.write(" = ");
                self.expression(&assignment.value);
            }
            Expression::Binary(binary) => {
                let precedence = binary.operator.precedence();
                self.operand(&binary.left, precedence);
                self.write(" ");
                self.write(binary.operator.symbol());
                self.write(" ");
                self.operand(&binary.right, precedence.next());
            }
            Expression::Unary(unary) => {
                self.write(unary.operator.symbol());
                self.operand(&unary.operand, Precedence::Unary);
            }
            Expression::Invocation(invocation) => {
                self.operand(&invocation.callee, Precedence::Invocation);
                self.write("(");
                for (index, argument) in invocation.arguments.iter().enumerate() {
                    if index > 0 {
                        self.write(", ");
                    }
                    self.expression(argument);
                }
                self.write(")");
            }
            Expression::PropertyAccess(access) => {
                self.operand(&access.target, Precedence::Invocation);
                self.write(".");
                self.write(access.property.as_str());
            }
            Expression::BooleanLiteral(value) => self.write(if *value { "true" } else { "false" }),
            Expression::Nil => self.write("nil"),
            Expression::This => self.write("this"),
            Expression::Super => self.write("super"),
            Expression::NumberLiteral(value) => self.write(&value.to_string()),
            Expression::StringLiteral(lexeme) => self.write(lexeme),
            Expression::Identifier(id) => self.write(id.as_str()),
        }
    }

    /// Print `expr`, parenthesized when it binds looser than `minimum`.
    fn operand(&mut self, expr: &Expression, minimum: Precedence) {
        if Precedence::of_expression(expr) < minimum {
            self.write("(");
            self.expression(expr);
            self.write(")");
        } else {
            self.expression(expr);
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut printer = Printer::default();
        printer.declaration(self);
        f.write_str(&printer.out)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut printer = Printer::default();
        printer.statement(self);
        f.write_str(&printer.out)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut printer = Printer::default();
        printer.expression(self);
        f.write_str(&printer.out)
    }
}

/// Whether the statement's trailing sub-statement is an `if` with no `else`.
fn ends_with_open_if(stmt: &Statement) -> bool {
    match stmt {
        Statement::If(stmt) => match &stmt.else_branch {
            None => true,
            Some(else_branch) => ends_with_open_if(else_branch),
        },
        Statement::While(stmt) => ends_with_open_if(&stmt.body),
        Statement::For(stmt) => ends_with_open_if(&stmt.body),
        _ => false,
    }
}
