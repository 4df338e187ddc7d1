//! 6502 CPU emulation for the NES.
//!
//! Full documented instruction set plus the undocumented opcodes nestest runs.
//! Memory is reached through the [`Bus`](crate::bus::Bus) trait.

pub mod addressing;
pub mod cpu;
pub mod flags;
pub mod instructions;
pub mod opcodes;
pub mod registers;
pub mod trace;


/// Power-on program counter for the reference layout (PRG ROM at `$C000`).
pub const RESET_PC: u16 = 0xC000;
/// Power-on stack pointer.
pub const RESET_SP: u8 = 0xFD;
/// Power-on status: interrupt disable and the unused bit.
pub const RESET_STATUS: u8 = flags::FLAG_INTERRUPT_DISABLE | flags::FLAG_UNUSED;

/// The stack lives in page one.
pub const STACK_PAGE: u16 = 0x0100;
/// BRK/IRQ vector.
pub const IRQ_VECTOR: u16 = 0xFFFE;
