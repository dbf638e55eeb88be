//! Operand types and the limits their widths impose
//!
//! Multi-byte operands follow the opcode byte in big-endian order.

use std::mem::size_of;

/// Index into the constant pool
pub type ConstantIndex = u16;

/// Index of a global variable slot
pub type GlobalIndex = u8;

/// Stack slot of a local variable relative to the frame base
pub type LocalOffset = u8;

/// Relative jump distance in bytes, measured from the end of the instruction
pub type JumpOffset = i16;

/// Number of arguments passed to a call or method invocation
pub type ArgumentCount = u16;

/// Maximum number of constants in one pool
pub const MAX_CONSTANTS: usize = ConstantIndex::MAX as usize + 1;

/// Maximum number of global variables
pub const MAX_GLOBALS: usize = GlobalIndex::MAX as usize + 1;

/// Maximum number of locals in one frame
pub const MAX_LOCALS: usize = LocalOffset::MAX as usize + 1;

/// Maximum forward jump distance
pub const MAX_JUMP: usize = JumpOffset::MAX as usize + 1;

/// Maximum number of call arguments
pub const MAX_ARGUMENTS: usize = ArgumentCount::MAX as usize + 1;

pub(crate) const CONSTANT_WIDTH: usize = size_of::<ConstantIndex>();
pub(crate) const GLOBAL_WIDTH: usize = size_of::<GlobalIndex>();
pub(crate) const LOCAL_WIDTH: usize = size_of::<LocalOffset>();
pub(crate) const JUMP_WIDTH: usize = size_of::<JumpOffset>();
pub(crate) const ARGUMENT_WIDTH: usize = size_of::<ArgumentCount>();
