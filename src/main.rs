//! CPU runner entry point.
//!
//! Loads a program image, powers the CPU on at `$C000` and steps until an unknown
//! opcode or the step limit. Set `NES6502_LOG=trace` for one nestest-style line per
//! instruction.
//! Usage: nes6502 [path/to/image.nes] [max-steps]

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use ansi_term::Colour::{Cyan, Green, Purple, Red, Yellow};
use log::{Level, LevelFilter, Log, Metadata, Record};

use nes6502::{Cpu, CpuError, Error, Memory, cartridge::Cartridge};

/// Prints log records to stderr with coloured level tags.
struct TraceLogger {
    level: LevelFilter,
}

impl Log for TraceLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let tag = match record.level() {
            Level::Error => Red.bold().paint("ERROR"),
            Level::Warn => Yellow.bold().paint("WARN "),
            Level::Info => Green.bold().paint("INFO "),
            Level::Debug => Cyan.paint("DEBUG"),
            Level::Trace => Purple.paint("TRACE"),
        };
        let _ = writeln!(io::stderr().lock(), "{} {}", tag, record.args());
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

fn init_logging() {
    let level = env::var("NES6502_LOG")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(LevelFilter::Info);

    if log::set_boxed_logger(Box::new(TraceLogger { level })).is_ok() {
        log::set_max_level(level);
    }
}

fn run(path: &str, max_steps: Option<usize>) -> Result<usize, Error> {
    let cart = Cartridge::load(path)?;
    log::info!(
        "loaded {path}: {} bytes of PRG ({:?})",
        cart.prg_rom.len(),
        cart.format
    );

    let mut memory = Memory::new();
    cart.install(&mut memory)?;

    let mut cpu = Cpu::new(memory);
    cpu.power_on();

    let executed = match max_steps {
        Some(limit) => cpu.run_for(limit)?,
        None => cpu.run_until(|_| false)?,
    };

    let regs = cpu.registers();
    log::info!(
        "halted at ${:04X} after {executed} instructions, {} cycles",
        regs.pc,
        cpu.cycles()
    );
    Ok(executed)
}

fn main() -> ExitCode {
    init_logging();

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "test/nestest.nes".to_string());
    let max_steps = match env::args().nth(2).map(|arg| arg.parse::<usize>()) {
        None => None,
        Some(Ok(limit)) => Some(limit),
        Some(Err(err)) => {
            log::error!("invalid step limit: {err}");
            return ExitCode::from(2);
        }
    };

    match run(&path, max_steps) {
        Ok(_) => ExitCode::SUCCESS,
        Err(Error::Cpu(CpuError::UnknownOpcode { opcode, address })) => {
            log::error!("unknown opcode ${opcode:02X} at ${address:04X}, emulation halted");
            ExitCode::FAILURE
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
