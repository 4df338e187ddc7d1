//! The 6502 register file.

use crate::cpu::{RESET_PC, RESET_SP, RESET_STATUS};

/// Program counter, accumulator, index registers, stack pointer and status.
///
/// `sp` is an offset into page one; `status` keeps bit 5 set at all times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    pub pc: u16,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub status: u8,
}

impl Registers {
    /// Register state after power-on for the reference layout.
    pub const fn power_on() -> Self {
        Self {
            pc: RESET_PC,
            a: 0,
            x: 0,
            y: 0,
            sp: RESET_SP,
            status: RESET_STATUS,
        }
    }

    pub fn flag(&self, mask: u8) -> bool {
        self.status & mask != 0
    }

    pub fn set_flag(&mut self, mask: u8, on: bool) {
        if on {
            self.status |= mask;
        } else {
            self.status &= !mask;
        }
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::power_on()
    }
}
