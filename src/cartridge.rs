//! Program image loading: iNES (.nes) files and raw binaries.
//!
//! Implements just enough of [iNES](https://www.nesdev.org/wiki/INES) to pull PRG ROM out
//! of a file: 16-byte header (magic "NES\x1A", PRG size in 16 KiB units, CHR size in
//! 8 KiB units, flags 6–7), optional 512-byte trainer, then PRG ROM. Mappers are not
//! modeled, so only NROM-sized PRG (16 or 32 KiB) is accepted.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::bus::Memory;
use crate::cpu::RESET_PC;
use crate::error::LoadError;

pub const INES_MAGIC: [u8; 4] = *b"NES\x1A";

const HEADER_SIZE: usize = 16;
const TRAINER_SIZE: usize = 512;
const PRG_BANK_SIZE: usize = 16 * 1024;
const CHR_BANK_SIZE: usize = 8 * 1024;

#[derive(Debug, Error)]
pub enum CartridgeError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("iNES header truncated ({0} bytes)")]
    TruncatedHeader(usize),
    #[error("iNES image declares {expected} bytes of PRG ROM but only {actual} follow the header")]
    TruncatedPrg { expected: usize, actual: usize },
    #[error("image contains no program bytes")]
    EmptyPrg,
    #[error("{0} KiB of PRG ROM needs a mapper; only 16 and 32 KiB are supported")]
    UnsupportedPrgSize(usize),
}

/// Where the program bytes came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    INes,
    /// No header: the whole file is the program image.
    Raw,
}

#[derive(Debug)]
pub struct Cartridge {
    pub prg_rom: Vec<u8>,
    /// CHR ROM size in bytes as declared by the header (0 for raw images).
    pub chr_rom_size: usize,
    /// Mapper number from flags 6–7; informational only.
    pub mapper_id: u8,
    pub format: Format,
}

impl Cartridge {
    /// Read an image from disk. See [`Cartridge::from_bytes`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CartridgeError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| CartridgeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&data)
    }

    /// Parse an iNES image, or take `data` verbatim when it lacks the iNES magic.
    pub fn from_bytes(data: &[u8]) -> Result<Self, CartridgeError> {
        if !data.starts_with(&INES_MAGIC) {
            if data.is_empty() {
                return Err(CartridgeError::EmptyPrg);
            }
            return Ok(Self {
                prg_rom: data.to_vec(),
                chr_rom_size: 0,
                mapper_id: 0,
                format: Format::Raw,
            });
        }

        if data.len() < HEADER_SIZE {
            return Err(CartridgeError::TruncatedHeader(data.len()));
        }

        let prg_rom_size = data[4] as usize * PRG_BANK_SIZE;
        let chr_rom_size = data[5] as usize * CHR_BANK_SIZE;
        let has_trainer = data[6] & 0x04 != 0;
        let mapper_id = (data[6] >> 4) | (data[7] & 0xF0);

        match prg_rom_size {
            0 => return Err(CartridgeError::EmptyPrg),
            PRG_BANK_SIZE | 0x8000 => {}
            other => return Err(CartridgeError::UnsupportedPrgSize(other / 1024)),
        }

        let prg_start = HEADER_SIZE + if has_trainer { TRAINER_SIZE } else { 0 };
        let prg_end = prg_start + prg_rom_size;
        if data.len() < prg_end {
            return Err(CartridgeError::TruncatedPrg {
                expected: prg_rom_size,
                actual: data.len().saturating_sub(prg_start),
            });
        }

        if mapper_id != 0 {
            log::warn!(target: "cartridge", "mapper {mapper_id} not emulated, loading PRG as NROM");
        }

        Ok(Self {
            prg_rom: data[prg_start..prg_end].to_vec(),
            chr_rom_size,
            mapper_id,
            format: Format::INes,
        })
    }

    /// Place the program into memory.
    ///
    /// 16 KiB PRG is mirrored at `$8000` and `$C000` (NROM-128), 32 KiB PRG fills
    /// `$8000`–`$FFFF`, raw images go to the reset address `$C000`.
    pub fn install(&self, memory: &mut Memory) -> Result<(), LoadError> {
        match self.format {
            Format::Raw => memory.load(RESET_PC, &self.prg_rom),
            Format::INes if self.prg_rom.len() == PRG_BANK_SIZE => {
                memory.load(0x8000, &self.prg_rom)?;
                memory.load(0xC000, &self.prg_rom)
            }
            Format::INes => memory.load(0x8000, &self.prg_rom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ines(prg_banks: u8, flags6: u8, prg: &[u8]) -> Vec<u8> {
        let mut data = vec![0; HEADER_SIZE];
        data[..4].copy_from_slice(&INES_MAGIC);
        data[4] = prg_banks;
        data[5] = 1;
        data[6] = flags6;
        if flags6 & 0x04 != 0 {
            data.extend(std::iter::repeat(0xFF).take(TRAINER_SIZE));
        }
        data.extend_from_slice(prg);
        data
    }

    #[test]
    fn parses_nrom_128() {
        let mut prg = vec![0xEA; PRG_BANK_SIZE];
        prg[0] = 0x4C;
        let cart = Cartridge::from_bytes(&ines(1, 0, &prg)).unwrap();

        assert_eq!(cart.format, Format::INes);
        assert_eq!(cart.prg_rom.len(), PRG_BANK_SIZE);
        assert_eq!(cart.prg_rom[0], 0x4C);
        assert_eq!(cart.chr_rom_size, CHR_BANK_SIZE);
    }

    #[test]
    fn skips_trainer() {
        let mut prg = vec![0; PRG_BANK_SIZE];
        prg[0] = 0x78;
        let cart = Cartridge::from_bytes(&ines(1, 0x04, &prg)).unwrap();
        assert_eq!(cart.prg_rom[0], 0x78);
    }

    #[test]
    fn reads_mapper_number() {
        let prg = vec![0; PRG_BANK_SIZE];
        let cart = Cartridge::from_bytes(&ines(1, 0x10, &prg)).unwrap();
        assert_eq!(cart.mapper_id, 1);
    }

    #[test]
    fn rejects_short_prg() {
        let err = Cartridge::from_bytes(&ines(2, 0, &[0; 100])).unwrap_err();
        assert!(matches!(
            err,
            CartridgeError::TruncatedPrg { expected: 0x8000, actual: 100 }
        ));
    }

    #[test]
    fn rejects_mapper_sized_prg() {
        let err = Cartridge::from_bytes(&ines(4, 0, &[])).unwrap_err();
        assert!(matches!(err, CartridgeError::UnsupportedPrgSize(64)));
    }

    #[test]
    fn rejects_truncated_header() {
        let err = Cartridge::from_bytes(b"NES\x1A\x01").unwrap_err();
        assert!(matches!(err, CartridgeError::TruncatedHeader(5)));
    }

    #[test]
    fn raw_image_goes_to_reset_address() {
        let cart = Cartridge::from_bytes(&[0xA9, 0x01]).unwrap();
        assert_eq!(cart.format, Format::Raw);

        let mut mem = Memory::new();
        cart.install(&mut mem).unwrap();
        assert_eq!(mem.peek(0xC000), 0xA9);
        assert_eq!(mem.peek(0xC001), 0x01);
    }

    #[test]
    fn nrom_128_is_mirrored() {
        let mut prg = vec![0; PRG_BANK_SIZE];
        prg[0x10] = 0x42;
        let cart = Cartridge::from_bytes(&ines(1, 0, &prg)).unwrap();

        let mut mem = Memory::new();
        cart.install(&mut mem).unwrap();
        assert_eq!(mem.peek(0x8010), 0x42);
        assert_eq!(mem.peek(0xC010), 0x42);
    }

    #[test]
    fn cartridge_debug_output() {
        let cart = Cartridge::from_bytes(&[0xEA]).unwrap();
        let text = format!("{cart:?}");
        assert!(text.contains("format: Raw"));
        assert!(text.contains("mapper_id: 0"));

        let err = Cartridge::from_bytes(b"NES").unwrap_err();
        assert!(matches!(err, CartridgeError::TruncatedHeader(3)));
    }

    #[test]
    fn empty_file_is_rejected() {
        assert!(matches!(
            Cartridge::from_bytes(&[]),
            Err(CartridgeError::EmptyPrg)
        ));
    }
}
