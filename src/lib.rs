//! nes6502: the 6502 CPU core of the NES (Ricoh 2A03), written in Rust.
//!
//! Implements the processor as documented on the
//! [NESdev Wiki](https://www.nesdev.org/wiki/CPU): every documented opcode plus the
//! undocumented ones exercised by nestest, bit-exact flags and addressing-mode quirks.
//!
//! ## Modules
//!
//! - **bus** – [`Bus`](bus::Bus) trait and the flat 64 KiB [`Memory`](bus::Memory)
//! - **cartridge** – [iNES](https://www.nesdev.org/wiki/INES) PRG extraction and raw images
//! - **cpu** – registers, [addressing modes](https://www.nesdev.org/wiki/CPU_addressing_modes),
//!   the opcode table and the fetch/decode/execute engine
//! - **error** – error types shared by the core and its loaders

pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod error;

pub use bus::{Bus, Memory};
pub use cpu::cpu::Cpu;
pub use error::{CpuError, Error};
