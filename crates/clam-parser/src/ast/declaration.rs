//! Declaration AST nodes

use serde::Serialize;

use super::*;

/// Top-level or block-level declaration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Declaration {
    /// A plain statement in declaration position
    Statement(Statement),

    /// `class Name < Base { methods }`
    Class(ClassDeclaration),

    /// `fun name(params) { body }`
    Fun(FunDeclaration),

    /// `var name = initializer;`
    Var(VarDeclaration),
}

/// Class declaration.
///
/// The base class is recorded as written; nothing checks that it names a
/// class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDeclaration {
    pub name: Identifier,
    pub base_class: Option<Identifier>,
    pub methods: Vec<FunDeclaration>,
}

/// Function or method declaration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunDeclaration {
    pub name: Identifier,
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
}

/// Variable declaration, with or without an initializer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarDeclaration {
    pub name: Identifier,
    pub initializer: Option<Expression>,
}

impl Declaration {
    /// Whether this is a statement rather than a named declaration.
    pub fn is_statement(&self) -> bool {
        matches!(self, Declaration::Statement(_))
    }

    /// The declared name, if any.
    pub fn name(&self) -> Option<&Identifier> {
        match self {
            Declaration::Class(class) => Some(&class.name),
            Declaration::Fun(fun) => Some(&fun.name),
            Declaration::Var(var) => Some(&var.name),
            Declaration::Statement(_) => None,
        }
    }
}

impl From<Statement> for Declaration {
    fn from(statement: Statement) -> Self {
        Declaration::Statement(statement)
    }
}
