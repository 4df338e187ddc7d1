//! Error types for the CPU core and its loaders.

use thiserror::Error;

use crate::cartridge::CartridgeError;

/// The only fatal condition inside the CPU core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CpuError {
    /// The byte at `address` has no entry in the instruction table.
    #[error("unknown opcode ${opcode:02X} at ${address:04X}")]
    UnknownOpcode { opcode: u8, address: u16 },
}

/// Placing a program image into memory failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("{len}-byte image at ${start:04X} runs past the end of the address space")]
    ImageOverflow { start: u16, len: usize },
}

/// Top-level error for running an image end to end.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Cpu(#[from] CpuError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Cartridge(#[from] CartridgeError),
}
