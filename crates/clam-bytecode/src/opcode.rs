//! Bytecode opcodes for the Clam VM
//!
//! This module defines the complete instruction set of the Clam stack
//! machine. Opcodes are numbered densely from zero in declaration order.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::operand::{ARGUMENT_WIDTH, CONSTANT_WIDTH, GLOBAL_WIDTH, JUMP_WIDTH, LOCAL_WIDTH};

/// Error decoding an opcode byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OpCodeError {
    /// The byte does not name an opcode
    #[error("unknown opcode 0x{0:02X}")]
    Unknown(u8),
}

/// Bytecode opcode enumeration
///
/// All opcodes are single bytes. Some take operands that follow the opcode
/// byte in the bytecode stream; see [`OpCode::operand_width`].
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OpCode {
    // ===== Constants =====
    /// Push a constant from the pool (operand: constant index)
    Constant = 0,
    /// Push nil
    Nil,
    /// Push true
    True,
    /// Push false
    False,
    /// Push a function prototype from the pool (operand: constant index)
    Fun,

    // ===== Arithmetic & Logical =====
    /// Pop a, push -a
    Negate,
    /// Pop a, push !a
    Not,
    /// Pop b, pop a, push a + b
    Add,
    /// Pop b, pop a, push a - b
    Subtract,
    /// Pop b, pop a, push a * b
    Multiply,
    /// Pop b, pop a, push a / b
    Divide,

    // ===== Comparison =====
    /// Pop b, pop a, push a == b
    Equal,
    /// Pop b, pop a, push a > b
    Greater,
    /// Pop b, pop a, push a < b
    Less,

    // ===== Variables =====
    /// Push a global (operand: global index)
    GetGlobal,
    /// Store top of stack into a global (operand: global index)
    SetGlobal,
    /// Push a local (operand: local offset)
    GetLocal,
    /// Store top of stack into a local (operand: local offset)
    SetLocal,
    /// Discard top of stack
    Pop,

    // ===== Closures =====
    /// Wrap a function prototype into a closure (operand: constant index)
    Closure,
    /// Capture a local of the enclosing frame (operand: local offset)
    Capture,
    /// Push a captured variable (operand: local offset)
    GetUpvalue,
    /// Store top of stack into a captured variable (operand: local offset)
    SetUpvalue,

    // ===== Control Flow =====
    /// Pop a, jump if a is falsey (operand: jump offset)
    JumpIfFalse,
    /// Unconditional jump (operand: jump offset)
    Jump,
    /// Call the callee below the arguments (operand: argument count)
    Call,
    /// Call a method by name (operands: constant index, argument count)
    Invoke,
    /// Return top of stack to the caller
    Return,

    // ===== Misc =====
    /// Pop and print top of stack
    Print,
    /// Marks code a correct generator never reaches
    Impossible,
}

impl OpCode {
    /// Every opcode, in encoding order
    pub const ALL: [OpCode; 30] = [
        OpCode::Constant,
        OpCode::Nil,
        OpCode::True,
        OpCode::False,
        OpCode::Fun,
        OpCode::Negate,
        OpCode::Not,
        OpCode::Add,
        OpCode::Subtract,
        OpCode::Multiply,
        OpCode::Divide,
        OpCode::Equal,
        OpCode::Greater,
        OpCode::Less,
        OpCode::GetGlobal,
        OpCode::SetGlobal,
        OpCode::GetLocal,
        OpCode::SetLocal,
        OpCode::Pop,
        OpCode::Closure,
        OpCode::Capture,
        OpCode::GetUpvalue,
        OpCode::SetUpvalue,
        OpCode::JumpIfFalse,
        OpCode::Jump,
        OpCode::Call,
        OpCode::Invoke,
        OpCode::Return,
        OpCode::Print,
        OpCode::Impossible,
    ];

    /// Convert byte to opcode
    ///
    /// Returns None if the byte does not correspond to a valid opcode.
    pub fn from_u8(byte: u8) -> Option<Self> {
        Self::ALL.get(usize::from(byte)).copied()
    }

    /// Convert opcode to byte
    #[inline]
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Mnemonic used in disassembly listings
    pub fn name(self) -> &'static str {
        match self {
            Self::Constant => "CONSTANT",
            Self::Nil => "NIL",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Fun => "FUN",
            Self::Negate => "NEGATE",
            Self::Not => "NOT",
            Self::Add => "ADD",
            Self::Subtract => "SUBTRACT",
            Self::Multiply => "MULTIPLY",
            Self::Divide => "DIVIDE",
            Self::Equal => "EQUAL",
            Self::Greater => "GREATER",
            Self::Less => "LESS",
            Self::GetGlobal => "GET_GLOBAL",
            Self::SetGlobal => "SET_GLOBAL",
            Self::GetLocal => "GET_LOCAL",
            Self::SetLocal => "SET_LOCAL",
            Self::Pop => "POP",
            Self::Closure => "CLOSURE",
            Self::Capture => "CAPTURE",
            Self::GetUpvalue => "GET_UPVALUE",
            Self::SetUpvalue => "SET_UPVALUE",
            Self::JumpIfFalse => "JUMP_IF_FALSE",
            Self::Jump => "JUMP",
            Self::Call => "CALL",
            Self::Invoke => "INVOKE",
            Self::Return => "RETURN",
            Self::Print => "PRINT",
            Self::Impossible => "IMPOSSIBLE",
        }
    }

    /// Total size in bytes of the operands following this opcode
    pub fn operand_width(self) -> usize {
        match self {
            Self::Constant | Self::Fun | Self::Closure => CONSTANT_WIDTH,
            Self::GetGlobal | Self::SetGlobal => GLOBAL_WIDTH,
            Self::GetLocal
            | Self::SetLocal
            | Self::Capture
            | Self::GetUpvalue
            | Self::SetUpvalue => LOCAL_WIDTH,
            Self::JumpIfFalse | Self::Jump => JUMP_WIDTH,
            Self::Call => ARGUMENT_WIDTH,
            Self::Invoke => CONSTANT_WIDTH + ARGUMENT_WIDTH,
            _ => 0,
        }
    }

    /// Size in bytes of the whole instruction, opcode included
    pub fn instruction_len(self) -> usize {
        1 + self.operand_width()
    }

    /// Check if this opcode is a jump instruction
    pub fn is_jump(self) -> bool {
        matches!(self, Self::Jump | Self::JumpIfFalse)
    }
}

impl TryFrom<u8> for OpCode {
    type Error = OpCodeError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Self::from_u8(byte).ok_or(OpCodeError::Unknown(byte))
    }
}

impl From<OpCode> for u8 {
    fn from(opcode: OpCode) -> u8 {
        opcode.to_u8()
    }
}

impl std::fmt::Display for OpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
