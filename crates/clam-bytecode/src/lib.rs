//! Clam VM Bytecode Definitions
//!
//! This crate fixes the instruction set a code generator targets when it
//! lowers a Clam AST: the opcodes of the stack machine, the width of each
//! operand and the program-size limits those widths imply. It neither emits
//! nor executes bytecode.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod opcode;
pub mod operand;

pub use opcode::{OpCode, OpCodeError};
pub use operand::{
    ArgumentCount, ConstantIndex, GlobalIndex, JumpOffset, LocalOffset, MAX_ARGUMENTS,
    MAX_CONSTANTS, MAX_GLOBALS, MAX_JUMP, MAX_LOCALS,
};
