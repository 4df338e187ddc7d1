//! Per-instruction trace lines, laid out like the nestest log.
//!
//! ```text
//! C000  4C F5 C5  JMP  A:00 X:00 Y:00 P:24 SP:FD CYC:0
//! C72A  04 A9    *NOP  A:AA X:97 Y:4E P:EF SP:F9 CYC:2730
//! ```

use std::fmt;

use crate::cpu::{opcodes::Instruction, registers::Registers};

/// The instruction about to execute and the machine state before it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trace {
    pub instruction: &'static Instruction,
    /// Encoded bytes; only the first `instruction.size` are meaningful.
    pub bytes: [u8; 3],
    pub registers: Registers,
    pub cycles: u64,
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = self.bytes[..self.instruction.size as usize]
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<_>>()
            .join(" ");
        let marker = if self.instruction.documented { ' ' } else { '*' };
        let r = &self.registers;

        write!(
            f,
            "{:04X}  {:<8} {}{}  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            r.pc, encoded, marker, self.instruction.mnemonic, r.a, r.x, r.y, r.status, r.sp, self.cycles
        )
    }
}
