//! Memory bus for the CPU core.
//!
//! The CPU talks to memory only through [`Bus`]. [`Memory`] is the flat 64 KiB
//! array the core runs against: no mirroring, no memory-mapped I/O.

use crate::error::LoadError;

/// Size of the 6502 address space.
pub const ADDRESS_SPACE: usize = 0x1_0000;

/// Trait for bus access used by the CPU.
pub trait Bus {
    fn read(&mut self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, data: u8);
}

/// Flat 64 KiB memory, addresses `$0000`–`$FFFF`.
pub struct Memory {
    cells: Box<[u8]>,
}

impl Memory {
    /// Zero-filled memory.
    pub fn new() -> Self {
        Self {
            cells: vec![0; ADDRESS_SPACE].into_boxed_slice(),
        }
    }

    /// Copy a program image into memory starting at `start`.
    ///
    /// The image must fit below the end of the address space; nothing is written
    /// when it does not.
    pub fn load(&mut self, start: u16, image: &[u8]) -> Result<(), LoadError> {
        let begin = start as usize;
        let end = begin + image.len();
        if end > ADDRESS_SPACE {
            return Err(LoadError::ImageOverflow {
                start,
                len: image.len(),
            });
        }

        self.cells[begin..end].copy_from_slice(image);
        log::debug!(target: "bus", "loaded {} bytes at ${:04X}", image.len(), start);
        Ok(())
    }

    /// Read without going through the bus (diagnostics, tests).
    pub fn peek(&self, addr: u16) -> u8 {
        self.cells[addr as usize]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for Memory {
    fn read(&mut self, addr: u16) -> u8 {
        self.cells[addr as usize]
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.cells[addr as usize] = data;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_memory_is_zeroed() {
        let mem = Memory::new();
        assert_eq!(mem.as_slice().len(), ADDRESS_SPACE);
        assert!(mem.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn read_write_whole_range() {
        let mut mem = Memory::new();
        mem.write(0x0000, 0x11);
        mem.write(0xFFFF, 0x22);

        assert_eq!(mem.read(0x0000), 0x11);
        assert_eq!(mem.read(0xFFFF), 0x22);
    }

    #[test]
    fn load_places_image() {
        let mut mem = Memory::new();
        mem.load(0xC000, &[0xA9, 0x42, 0xEA]).unwrap();

        assert_eq!(mem.peek(0xC000), 0xA9);
        assert_eq!(mem.peek(0xC001), 0x42);
        assert_eq!(mem.peek(0xC002), 0xEA);
    }

    #[test]
    fn load_up_to_last_byte() {
        let mut mem = Memory::new();
        let image = vec![0xEA; 0x4000];
        mem.load(0xC000, &image).unwrap();
        assert_eq!(mem.peek(0xFFFF), 0xEA);
    }

    #[test]
    fn load_rejects_overflowing_image() {
        let mut mem = Memory::new();
        let err = mem.load(0xFFFF, &[1, 2]).unwrap_err();

        assert!(matches!(err, LoadError::ImageOverflow { start: 0xFFFF, len: 2 }));
        assert_eq!(mem.peek(0xFFFF), 0);
    }
}
