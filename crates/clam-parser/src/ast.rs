//! Abstract syntax tree for Clam programs
//!
//! The tree has three tiers, each a closed sum type:
//! - [`Declaration`]: class, function and variable declarations, or a statement
//! - [`Statement`]: control flow, `print`, `return`, blocks and expression statements
//! - [`Expression`]: operators, invocations, property access and literals
//!
//! Nodes own their children and carry no source positions, so two trees
//! compare equal exactly when they have the same structure.

pub mod declaration;
pub mod expression;
pub mod statement;
pub mod unparse;
pub mod visitor;

use std::fmt;

use serde::Serialize;

pub use declaration::*;
pub use expression::*;
pub use statement::*;
pub use unparse::unparse;
pub use visitor::*;

/// A name: variable, function, class, parameter or property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Identifier(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Identifier(name.to_string())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A parsed program: its top-level declarations in source order.
pub type Program = Vec<Declaration>;
