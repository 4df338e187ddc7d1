//! Addressing-mode resolution.
//!
//! Modes are resolved after the engine has moved `pc` past the whole instruction,
//! from the operand bytes it already fetched. Immediate and relative operands are
//! addressed at `pc - 1`. See
//! [CPU addressing modes](https://www.nesdev.org/wiki/CPU_addressing_modes).

use crate::{bus::Bus, cpu::cpu::Cpu};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    /// `JMP ($nnnn)` only.
    Indirect,
    /// `($nn,X)`
    IndexedIndirect,
    /// `($nn),Y`
    IndirectIndexed,
    Relative,
}

impl AddressingMode {
    /// Encoded instruction size in bytes, opcode included.
    pub const fn instruction_size(self) -> u8 {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 1,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::IndexedIndirect
            | AddressingMode::IndirectIndexed
            | AddressingMode::Relative => 2,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 3,
        }
    }
}

/// What an instruction operates on once its mode is resolved.
///
/// Implied and accumulator modes both resolve to `Accumulator`; implied
/// instructions never dereference it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Accumulator,
    Memory(u16),
}

/// `(base + index) mod 256`: indexed zero-page access never leaves page zero.
pub fn zero_page_indexed(base: u8, index: u8) -> u16 {
    base.wrapping_add(index) as u16
}

pub fn page_crossed(a: u16, b: u16) -> bool {
    (a & 0xFF00) != (b & 0xFF00)
}

impl<B: Bus> Cpu<B> {
    /// Effective operand for `mode`, and whether indexing crossed a page.
    pub(crate) fn resolve(&mut self, mode: AddressingMode, operand: [u8; 2]) -> (Operand, bool) {
        let pc = self.regs.pc;
        let zp = operand[0];
        let absolute = u16::from_le_bytes(operand);

        match mode {
            AddressingMode::Implied | AddressingMode::Accumulator => (Operand::Accumulator, false),
            AddressingMode::Immediate | AddressingMode::Relative => {
                (Operand::Memory(pc.wrapping_sub(1)), false)
            }
            AddressingMode::ZeroPage => (Operand::Memory(zp as u16), false),
            AddressingMode::ZeroPageX => (Operand::Memory(zero_page_indexed(zp, self.regs.x)), false),
            AddressingMode::ZeroPageY => (Operand::Memory(zero_page_indexed(zp, self.regs.y)), false),
            AddressingMode::Absolute => (Operand::Memory(absolute), false),
            AddressingMode::AbsoluteX => {
                let addr = absolute.wrapping_add(self.regs.x as u16);
                (Operand::Memory(addr), page_crossed(absolute, addr))
            }
            AddressingMode::AbsoluteY => {
                let addr = absolute.wrapping_add(self.regs.y as u16);
                (Operand::Memory(addr), page_crossed(absolute, addr))
            }
            AddressingMode::Indirect => {
                let lo = self.bus.read(absolute) as u16;

                let hi_addr = (absolute & 0xFF00) | (absolute.wrapping_add(1) & 0x00FF); // page-boundary bug
                let hi = self.bus.read(hi_addr) as u16;

                (Operand::Memory((hi << 8) | lo), false)
            }
            AddressingMode::IndexedIndirect => {
                let ptr = zp.wrapping_add(self.regs.x);
                (Operand::Memory(self.zero_page_pointer(ptr)), false)
            }
            AddressingMode::IndirectIndexed => {
                let base = self.zero_page_pointer(zp);
                let addr = base.wrapping_add(self.regs.y as u16);
                (Operand::Memory(addr), page_crossed(base, addr))
            }
        }
    }

    /// Pointer stored at `ptr`, high byte wrapping within zero page.
    fn zero_page_pointer(&mut self, ptr: u8) -> u16 {
        let lo = self.bus.read(ptr as u16) as u16;
        let hi = self.bus.read(ptr.wrapping_add(1) as u16) as u16;
        (hi << 8) | lo
    }
}
