//! Instruction semantics.
//!
//! Each operation receives the operand its addressing mode resolved to. The
//! undocumented read-modify-write opcodes are the two documented operations run
//! back to back on the same operand, so their flags are whatever the second one
//! leaves behind.

use crate::{
    bus::Bus,
    cpu::{
        IRQ_VECTOR,
        addressing::Operand,
        cpu::Cpu,
        flags::{
            FLAG_BREAK, FLAG_CARRY, FLAG_DECIMAL, FLAG_INTERRUPT_DISABLE, FLAG_NEGATIVE,
            FLAG_OVERFLOW, FLAG_UNUSED, FLAG_ZERO,
        },
    },
};

impl<B: Bus> Cpu<B> {
    fn load(&mut self, operand: Operand) -> u8 {
        match operand {
            Operand::Accumulator => self.regs.a,
            Operand::Memory(addr) => self.bus.read(addr),
        }
    }

    fn store(&mut self, operand: Operand, value: u8) {
        match operand {
            Operand::Accumulator => self.regs.a = value,
            Operand::Memory(addr) => self.bus.write(addr, value),
        }
    }

    fn carry_in(&self) -> u8 {
        self.regs.flag(FLAG_CARRY) as u8
    }

    // Loads, stores, transfers

    pub(crate) fn lda(&mut self, operand: Operand) {
        self.regs.a = self.load(operand);
        self.update_zero_and_negative_flags(self.regs.a);
    }

    pub(crate) fn ldx(&mut self, operand: Operand) {
        self.regs.x = self.load(operand);
        self.update_zero_and_negative_flags(self.regs.x);
    }

    pub(crate) fn ldy(&mut self, operand: Operand) {
        self.regs.y = self.load(operand);
        self.update_zero_and_negative_flags(self.regs.y);
    }

    pub(crate) fn sta(&mut self, operand: Operand) {
        self.store(operand, self.regs.a);
    }

    pub(crate) fn stx(&mut self, operand: Operand) {
        self.store(operand, self.regs.x);
    }

    pub(crate) fn sty(&mut self, operand: Operand) {
        self.store(operand, self.regs.y);
    }

    pub(crate) fn tax(&mut self) {
        self.regs.x = self.regs.a;
        self.update_zero_and_negative_flags(self.regs.x);
    }

    pub(crate) fn tay(&mut self) {
        self.regs.y = self.regs.a;
        self.update_zero_and_negative_flags(self.regs.y);
    }

    pub(crate) fn tsx(&mut self) {
        self.regs.x = self.regs.sp;
        self.update_zero_and_negative_flags(self.regs.x);
    }

    pub(crate) fn txa(&mut self) {
        self.regs.a = self.regs.x;
        self.update_zero_and_negative_flags(self.regs.a);
    }

    /// The only transfer that leaves the flags alone.
    pub(crate) fn txs(&mut self) {
        self.regs.sp = self.regs.x;
    }

    pub(crate) fn tya(&mut self) {
        self.regs.a = self.regs.y;
        self.update_zero_and_negative_flags(self.regs.a);
    }

    // Arithmetic and logic

    /// A,Z,C,N,V = A + M + C
    pub(crate) fn adc(&mut self, operand: Operand) {
        let value = self.load(operand);
        let a = self.regs.a;

        let sum = a as u16 + value as u16 + self.carry_in() as u16;
        let result = sum as u8;

        self.regs.set_flag(FLAG_CARRY, sum > 0xFF);
        self.regs
            .set_flag(FLAG_OVERFLOW, (!(a ^ value) & (a ^ result) & 0x80) != 0);

        self.regs.a = result;
        self.update_zero_and_negative_flags(result);
    }

    /// A,Z,C,N,V = A - M - (1 - C). Carry means no borrow. Decimal mode is ignored.
    pub(crate) fn sbc(&mut self, operand: Operand) {
        let value = self.load(operand);
        let a = self.regs.a;

        let diff = a as i16 - value as i16 - (1 - self.carry_in() as i16);
        let result = diff as u8;

        self.regs.set_flag(FLAG_CARRY, diff >= 0);
        self.regs
            .set_flag(FLAG_OVERFLOW, ((a ^ value) & (a ^ result) & 0x80) != 0);

        self.regs.a = result;
        self.update_zero_and_negative_flags(result);
    }

    pub(crate) fn and(&mut self, operand: Operand) {
        self.regs.a &= self.load(operand);
        self.update_zero_and_negative_flags(self.regs.a);
    }

    pub(crate) fn ora(&mut self, operand: Operand) {
        self.regs.a |= self.load(operand);
        self.update_zero_and_negative_flags(self.regs.a);
    }

    pub(crate) fn eor(&mut self, operand: Operand) {
        self.regs.a ^= self.load(operand);
        self.update_zero_and_negative_flags(self.regs.a);
    }

    pub(crate) fn bit(&mut self, operand: Operand) {
        let value = self.load(operand);

        self.regs.set_flag(FLAG_ZERO, self.regs.a & value == 0);
        self.regs.set_flag(FLAG_NEGATIVE, value & 0x80 != 0);
        self.regs.set_flag(FLAG_OVERFLOW, value & 0x40 != 0);
    }

    fn compare(&mut self, register: u8, operand: Operand) {
        let value = self.load(operand);
        let result = register.wrapping_sub(value);

        self.regs.set_flag(FLAG_CARRY, register >= value);
        self.update_zero_and_negative_flags(result);
    }

    pub(crate) fn cmp(&mut self, operand: Operand) {
        self.compare(self.regs.a, operand);
    }

    pub(crate) fn cpx(&mut self, operand: Operand) {
        self.compare(self.regs.x, operand);
    }

    pub(crate) fn cpy(&mut self, operand: Operand) {
        self.compare(self.regs.y, operand);
    }

    // Increments and decrements

    pub(crate) fn inc(&mut self, operand: Operand) {
        let value = self.load(operand).wrapping_add(1);
        self.store(operand, value);
        self.update_zero_and_negative_flags(value);
    }

    pub(crate) fn dec(&mut self, operand: Operand) {
        let value = self.load(operand).wrapping_sub(1);
        self.store(operand, value);
        self.update_zero_and_negative_flags(value);
    }

    pub(crate) fn inx(&mut self) {
        self.regs.x = self.regs.x.wrapping_add(1);
        self.update_zero_and_negative_flags(self.regs.x);
    }

    pub(crate) fn iny(&mut self) {
        self.regs.y = self.regs.y.wrapping_add(1);
        self.update_zero_and_negative_flags(self.regs.y);
    }

    pub(crate) fn dex(&mut self) {
        self.regs.x = self.regs.x.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.regs.x);
    }

    pub(crate) fn dey(&mut self) {
        self.regs.y = self.regs.y.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.regs.y);
    }

    // Shifts and rotates: accumulator or memory, carry gets the bit shifted out

    pub(crate) fn asl(&mut self, operand: Operand) {
        let value = self.load(operand);
        let result = value << 1;

        self.regs.set_flag(FLAG_CARRY, value & 0x80 != 0);
        self.store(operand, result);
        self.update_zero_and_negative_flags(result);
    }

    pub(crate) fn lsr(&mut self, operand: Operand) {
        let value = self.load(operand);
        let result = value >> 1;

        self.regs.set_flag(FLAG_CARRY, value & 0x01 != 0);
        self.store(operand, result);
        self.update_zero_and_negative_flags(result);
    }

    pub(crate) fn rol(&mut self, operand: Operand) {
        let value = self.load(operand);
        let result = (value << 1) | self.carry_in();

        self.regs.set_flag(FLAG_CARRY, value & 0x80 != 0);
        self.store(operand, result);
        self.update_zero_and_negative_flags(result);
    }

    pub(crate) fn ror(&mut self, operand: Operand) {
        let value = self.load(operand);
        let result = (value >> 1) | (self.carry_in() << 7);

        self.regs.set_flag(FLAG_CARRY, value & 0x01 != 0);
        self.store(operand, result);
        self.update_zero_and_negative_flags(result);
    }

    // Branches: the operand is the signed displacement byte

    pub(crate) fn bcc(&mut self, operand: Operand) {
        let offset = self.load(operand);
        self.branch(!self.regs.flag(FLAG_CARRY), offset);
    }

    pub(crate) fn bcs(&mut self, operand: Operand) {
        let offset = self.load(operand);
        self.branch(self.regs.flag(FLAG_CARRY), offset);
    }

    pub(crate) fn beq(&mut self, operand: Operand) {
        let offset = self.load(operand);
        self.branch(self.regs.flag(FLAG_ZERO), offset);
    }

    pub(crate) fn bne(&mut self, operand: Operand) {
        let offset = self.load(operand);
        self.branch(!self.regs.flag(FLAG_ZERO), offset);
    }

    pub(crate) fn bmi(&mut self, operand: Operand) {
        let offset = self.load(operand);
        self.branch(self.regs.flag(FLAG_NEGATIVE), offset);
    }

    pub(crate) fn bpl(&mut self, operand: Operand) {
        let offset = self.load(operand);
        self.branch(!self.regs.flag(FLAG_NEGATIVE), offset);
    }

    pub(crate) fn bvs(&mut self, operand: Operand) {
        let offset = self.load(operand);
        self.branch(self.regs.flag(FLAG_OVERFLOW), offset);
    }

    pub(crate) fn bvc(&mut self, operand: Operand) {
        let offset = self.load(operand);
        self.branch(!self.regs.flag(FLAG_OVERFLOW), offset);
    }

    // Jumps, subroutines, interrupts

    pub(crate) fn jmp(&mut self, operand: Operand) {
        if let Operand::Memory(target) = operand {
            self.regs.pc = target;
        }
    }

    /// Pushes the address of the JSR's last byte, high byte first.
    pub(crate) fn jsr(&mut self, operand: Operand) {
        if let Operand::Memory(target) = operand {
            let return_addr = self.regs.pc.wrapping_sub(1);
            self.push_word(return_addr);
            self.regs.pc = target;
        }
    }

    pub(crate) fn rts(&mut self) {
        self.regs.pc = self.pop_word().wrapping_add(1);
    }

    pub(crate) fn rti(&mut self) {
        self.plp();
        self.regs.pc = self.pop_word();
    }

    pub(crate) fn brk(&mut self) {
        let return_addr = self.regs.pc.wrapping_add(1); // +1 because of padding byte
        self.push_word(return_addr);
        self.push(self.regs.status | FLAG_BREAK | FLAG_UNUSED);

        self.regs.status |= FLAG_INTERRUPT_DISABLE;

        let lo = self.bus.read(IRQ_VECTOR) as u16;
        let hi = self.bus.read(IRQ_VECTOR.wrapping_add(1)) as u16;
        self.regs.pc = (hi << 8) | lo;
    }

    // Stack

    pub(crate) fn pha(&mut self) {
        self.push(self.regs.a);
    }

    pub(crate) fn pla(&mut self) {
        self.regs.a = self.pop();
        self.update_zero_and_negative_flags(self.regs.a);
    }

    /// B and the unused bit are set in the pushed copy only.
    pub(crate) fn php(&mut self) {
        self.push(self.regs.status | FLAG_BREAK | FLAG_UNUSED);
    }

    pub(crate) fn plp(&mut self) {
        let value = self.pop();
        self.regs.status = (value & !FLAG_BREAK) | FLAG_UNUSED;
    }

    // Flags

    pub(crate) fn clc(&mut self) {
        self.regs.status &= !FLAG_CARRY;
    }

    pub(crate) fn sec(&mut self) {
        self.regs.status |= FLAG_CARRY;
    }

    pub(crate) fn cli(&mut self) {
        self.regs.status &= !FLAG_INTERRUPT_DISABLE;
    }

    pub(crate) fn sei(&mut self) {
        self.regs.status |= FLAG_INTERRUPT_DISABLE;
    }

    pub(crate) fn cld(&mut self) {
        self.regs.status &= !FLAG_DECIMAL;
    }

    pub(crate) fn sed(&mut self) {
        self.regs.status |= FLAG_DECIMAL;
    }

    pub(crate) fn clv(&mut self) {
        self.regs.status &= !FLAG_OVERFLOW;
    }

    // Undocumented

    pub(crate) fn slo(&mut self, operand: Operand) {
        self.asl(operand);
        self.ora(operand);
    }

    pub(crate) fn rla(&mut self, operand: Operand) {
        self.rol(operand);
        self.and(operand);
    }

    pub(crate) fn sre(&mut self, operand: Operand) {
        self.lsr(operand);
        self.eor(operand);
    }

    pub(crate) fn rra(&mut self, operand: Operand) {
        self.ror(operand);
        self.adc(operand);
    }

    pub(crate) fn dcp(&mut self, operand: Operand) {
        self.dec(operand);
        self.cmp(operand);
    }

    pub(crate) fn isc(&mut self, operand: Operand) {
        self.inc(operand);
        self.sbc(operand);
    }

    pub(crate) fn lax(&mut self, operand: Operand) {
        self.lda(operand);
        self.ldx(operand);
    }

    pub(crate) fn sax(&mut self, operand: Operand) {
        self.store(operand, self.regs.a & self.regs.x);
    }
}
