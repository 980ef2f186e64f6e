use crate::constants::{
    MEMORY_SIZE, PROGRAM_CAPACITY, PROGRAM_END, PROGRAM_START, SPRITE_SHEET, SPRITE_SHEET_START,
};
use crate::error::Error;

/// # Memory
/// 4096 bytes of addressable memory.
///
/// The interpreter region (`0x000..0x200`) holds the sprite sheet and can't be written once the
/// memory is constructed. Programs are loaded into `PROGRAM_START..=PROGRAM_END`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

/// A rejected memory access, before it's been tied to the instruction that made it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AccessError {
    OutOfBounds { address: usize },
    Protected { address: usize },
}

impl AccessError {
    /// Attaches the faulting instruction.
    pub fn at(self, opcode: u16, pc: u16) -> Error {
        match self {
            AccessError::OutOfBounds { address } => Error::MemoryOutOfBounds {
                address,
                opcode,
                pc,
            },
            AccessError::Protected { address } => Error::ProtectedMemory {
                address,
                opcode,
                pc,
            },
        }
    }
}

impl Memory {
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        let start = SPRITE_SHEET_START as usize;
        bytes[start..start + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    /// Every byte of memory.
    pub fn bytes(&self) -> &[u8; MEMORY_SIZE] {
        &self.bytes
    }

    /// Reads `len` bytes starting at `start`.
    pub fn read(&self, start: u16, len: usize) -> Result<&[u8], AccessError> {
        let range = Self::range(start, len)?;
        Ok(&self.bytes[range])
    }

    /// Reads the big-endian word at `address` and the byte after it.
    pub fn word(&self, address: u16) -> Result<[u8; 2], AccessError> {
        let bytes = self.read(address, 2)?;
        Ok([bytes[0], bytes[1]])
    }

    /// Writes `data` starting at `start`.
    /// Writes that would touch the interpreter region are refused.
    pub fn write(&mut self, start: u16, data: &[u8]) -> Result<(), AccessError> {
        let range = Self::range(start, data.len())?;
        if !data.is_empty() && range.start < PROGRAM_START as usize {
            return Err(AccessError::Protected {
                address: range.start,
            });
        }
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }

    /// Replaces the program region with `rom`.
    ///
    /// The region is zeroed before the ROM is copied in so nothing from a previous program
    /// survives. A ROM that doesn't fit is rejected without touching memory.
    pub fn load_program(&mut self, rom: &[u8]) -> Result<(), Error> {
        if rom.len() > PROGRAM_CAPACITY {
            return Err(Error::RomTooLarge {
                length: rom.len(),
                capacity: PROGRAM_CAPACITY,
            });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..=PROGRAM_END as usize].fill(0);
        self.bytes[start..start + rom.len()].copy_from_slice(rom);
        Ok(())
    }

    fn range(start: u16, len: usize) -> Result<std::ops::Range<usize>, AccessError> {
        let start = start as usize;
        let end = start + len;
        if end > MEMORY_SIZE {
            return Err(AccessError::OutOfBounds {
                address: start.max(MEMORY_SIZE),
            });
        }
        Ok(start..end)
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
