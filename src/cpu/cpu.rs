use crate::{
    bus::{Bus, Memory},
    cpu::{
        RESET_PC, STACK_PAGE,
        addressing::{Operand, page_crossed},
        flags::{FLAG_NEGATIVE, FLAG_ZERO},
        opcodes::{self, Instruction, Operation},
        registers::Registers,
        trace::Trace,
    },
    error::{CpuError, LoadError},
};

/// The fetch/decode/execute engine.
///
/// Owns its bus; every mutation goes through `&mut self`, so one step always
/// completes before anything else can observe registers or memory.
pub struct Cpu<B: Bus> {
    pub(crate) regs: Registers,
    pub(crate) cycles: u64,
    pub(crate) bus: B,
}

impl<B: Bus> Cpu<B> {
    /// CPU in the power-on state on top of `bus`.
    pub fn new(bus: B) -> Self {
        Self {
            regs: Registers::power_on(),
            cycles: 0,
            bus,
        }
    }

    /// Back to the power-on state. Memory is left alone.
    pub fn power_on(&mut self) {
        self.regs = Registers::power_on();
        self.cycles = 0;
        log::debug!(
            target: "cpu",
            "power on: PC=${:04X} SP=${:02X} P=${:02X}",
            self.regs.pc, self.regs.sp, self.regs.status
        );
    }

    /// Execute exactly one instruction.
    ///
    /// On an unknown opcode nothing changes and the opcode and its address are
    /// returned; stepping again reports the same fault.
    pub fn step(&mut self) -> Result<(), CpuError> {
        let pc = self.regs.pc;
        let opcode = self.bus.read(pc);

        let Some(instruction) = opcodes::lookup(opcode) else {
            log::warn!(target: "cpu", "unknown opcode ${opcode:02X} at ${pc:04X}");
            return Err(CpuError::UnknownOpcode {
                opcode,
                address: pc,
            });
        };

        let bytes = self.fetch(pc, opcode, instruction.size);
        if log::log_enabled!(target: "cpu", log::Level::Trace) {
            let trace = self.snapshot(instruction, bytes);
            log::trace!(target: "cpu", "{trace}");
        }

        self.regs.pc = pc.wrapping_add(instruction.size as u16);
        self.cycles += instruction.cycles as u64;

        let (operand, crossed) = self.resolve(instruction.mode, [bytes[1], bytes[2]]);
        if instruction.page_penalty && crossed {
            self.cycles += 1;
        }

        self.execute(instruction.operation, operand);
        Ok(())
    }

    /// Step up to `steps` times, stopping at the first fault. Returns the
    /// number of instructions executed.
    pub fn run_for(&mut self, steps: usize) -> Result<usize, CpuError> {
        for executed in 0..steps {
            if let Err(err) = self.step() {
                log::debug!(target: "cpu", "stopped after {executed} instructions");
                return Err(err);
            }
        }
        Ok(steps)
    }

    /// Step until `done` holds for the register file (checked before each step).
    pub fn run_until(&mut self, mut done: impl FnMut(&Registers) -> bool) -> Result<usize, CpuError> {
        let mut executed = 0;
        while !done(&self.regs) {
            self.step()?;
            executed += 1;
        }
        Ok(executed)
    }

    /// Trace line for the instruction at `pc`, or `None` if it is unknown.
    ///
    /// Reads the instruction bytes through the bus, so a bus with read side
    /// effects sees them. The per-step `trace!` line reuses the bytes `step`
    /// already fetched instead.
    pub fn trace(&mut self) -> Option<Trace> {
        let pc = self.regs.pc;
        let opcode = self.bus.read(pc);
        let instruction = opcodes::lookup(opcode)?;
        let bytes = self.fetch(pc, opcode, instruction.size);
        Some(self.snapshot(instruction, bytes))
    }

    /// `opcode` followed by its operand bytes, each read once. Bytes past
    /// `size` are zero.
    fn fetch(&mut self, pc: u16, opcode: u8, size: u8) -> [u8; 3] {
        let mut bytes = [opcode, 0, 0];
        for (offset, byte) in bytes.iter_mut().enumerate().take(size as usize).skip(1) {
            *byte = self.bus.read(pc.wrapping_add(offset as u16));
        }
        bytes
    }

    fn snapshot(&self, instruction: &'static Instruction, bytes: [u8; 3]) -> Trace {
        Trace {
            instruction,
            bytes,
            registers: self.regs,
            cycles: self.cycles,
        }
    }

    pub fn registers(&self) -> Registers {
        self.regs
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn into_bus(self) -> B {
        self.bus
    }

    pub(crate) fn update_zero_and_negative_flags(&mut self, value: u8) {
        self.regs.set_flag(FLAG_ZERO, value == 0);
        self.regs.set_flag(FLAG_NEGATIVE, value & 0x80 != 0);
    }

    pub(crate) fn push(&mut self, value: u8) {
        let addr = STACK_PAGE | self.regs.sp as u16;
        self.bus.write(addr, value);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
    }

    pub(crate) fn pop(&mut self) -> u8 {
        self.regs.sp = self.regs.sp.wrapping_add(1);
        let addr = STACK_PAGE | self.regs.sp as u16;
        self.bus.read(addr)
    }

    pub(crate) fn push_word(&mut self, value: u16) {
        self.push((value >> 8) as u8);
        self.push(value as u8);
    }

    pub(crate) fn pop_word(&mut self) -> u16 {
        let lo = self.pop() as u16;
        let hi = self.pop() as u16;
        (hi << 8) | lo
    }

    /// Taken branch: signed displacement from the next instruction, one extra
    /// cycle, plus one more when the target is on another page.
    pub(crate) fn branch(&mut self, condition: bool, offset: u8) {
        if condition {
            let old_pc = self.regs.pc;
            self.regs.pc = old_pc.wrapping_add_signed(offset as i8 as i16);
            self.cycles += 1;

            if page_crossed(old_pc, self.regs.pc) {
                self.cycles += 1;
            }
        }
    }
}

impl Cpu<Memory> {
    /// Flat memory with `program` at `$C000` and the CPU in its power-on state.
    pub fn with_program(program: &[u8]) -> Result<Self, LoadError> {
        let mut memory = Memory::new();
        memory.load(RESET_PC, program)?;
        Ok(Self::new(memory))
    }
}

impl<B: Bus> Cpu<B> {
    /// Dispatch one decoded operation against its resolved operand.
    fn execute(&mut self, operation: Operation, operand: Operand) {
        use Operation::*;

        match operation {
            Adc => self.adc(operand),
            And => self.and(operand),
            Asl => self.asl(operand),
            Bcc => self.bcc(operand),
            Bcs => self.bcs(operand),
            Beq => self.beq(operand),
            Bit => self.bit(operand),
            Bmi => self.bmi(operand),
            Bne => self.bne(operand),
            Bpl => self.bpl(operand),
            Brk => self.brk(),
            Bvc => self.bvc(operand),
            Bvs => self.bvs(operand),
            Clc => self.clc(),
            Cld => self.cld(),
            Cli => self.cli(),
            Clv => self.clv(),
            Cmp => self.cmp(operand),
            Cpx => self.cpx(operand),
            Cpy => self.cpy(operand),
            Dec => self.dec(operand),
            Dex => self.dex(),
            Dey => self.dey(),
            Eor => self.eor(operand),
            Inc => self.inc(operand),
            Inx => self.inx(),
            Iny => self.iny(),
            Jmp => self.jmp(operand),
            Jsr => self.jsr(operand),
            Lda => self.lda(operand),
            Ldx => self.ldx(operand),
            Ldy => self.ldy(operand),
            Lsr => self.lsr(operand),
            Nop => {}
            Ora => self.ora(operand),
            Pha => self.pha(),
            Php => self.php(),
            Pla => self.pla(),
            Plp => self.plp(),
            Rol => self.rol(operand),
            Ror => self.ror(operand),
            Rti => self.rti(),
            Rts => self.rts(),
            Sbc => self.sbc(operand),
            Sec => self.sec(),
            Sed => self.sed(),
            Sei => self.sei(),
            Sta => self.sta(operand),
            Stx => self.stx(operand),
            Sty => self.sty(operand),
            Tax => self.tax(),
            Tay => self.tay(),
            Tsx => self.tsx(),
            Txa => self.txa(),
            Txs => self.txs(),
            Tya => self.tya(),
            Slo => self.slo(operand),
            Rla => self.rla(operand),
            Sre => self.sre(operand),
            Rra => self.rra(operand),
            Sax => self.sax(operand),
            Lax => self.lax(operand),
            Dcp => self.dcp(operand),
            Isc => self.isc(operand),
        }
    }
}
