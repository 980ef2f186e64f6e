use std::fmt;

/// Everything that can go wrong while loading or running a Chip-8 program.
///
/// `RomTooLarge` is recoverable: the machine is untouched and another ROM can be loaded.
/// Every other variant is a fault raised while executing; the machine stops and keeps
/// reporting the same fault until it is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("ROM is {length} bytes but the program region only holds {capacity}")]
    RomTooLarge { length: usize, capacity: usize },

    #[error("program counter {pc:#05X} is outside the program region")]
    ProgramCounterOutOfRange { pc: u16 },

    #[error("unknown opcode {opcode:#06X} at {pc:#05X}")]
    UnknownOpcode { opcode: u16, pc: u16 },

    #[error("stack {kind} executing {opcode:#06X} at {pc:#05X}")]
    StackFault {
        kind: StackFault,
        opcode: u16,
        pc: u16,
    },

    #[error("address {address:#06X} is out of bounds executing {opcode:#06X} at {pc:#05X}")]
    MemoryOutOfBounds { address: usize, opcode: u16, pc: u16 },

    #[error("address {address:#05X} is in the interpreter region; {opcode:#06X} at {pc:#05X} can't write it")]
    ProtectedMemory { address: usize, opcode: u16, pc: u16 },
}

impl Error {
    /// Whether the error stops execution of the loaded program.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::RomTooLarge { .. })
    }

    /// The program counter of the instruction that faulted, if any.
    pub fn pc(&self) -> Option<u16> {
        match *self {
            Error::RomTooLarge { .. } => None,
            Error::ProgramCounterOutOfRange { pc }
            | Error::UnknownOpcode { pc, .. }
            | Error::StackFault { pc, .. }
            | Error::MemoryOutOfBounds { pc, .. }
            | Error::ProtectedMemory { pc, .. } => Some(pc),
        }
    }

    /// The raw opcode that faulted, if one had been fetched.
    pub fn opcode(&self) -> Option<u16> {
        match *self {
            Error::RomTooLarge { .. } | Error::ProgramCounterOutOfRange { .. } => None,
            Error::UnknownOpcode { opcode, .. }
            | Error::StackFault { opcode, .. }
            | Error::MemoryOutOfBounds { opcode, .. }
            | Error::ProtectedMemory { opcode, .. } => Some(opcode),
        }
    }
}

/// Which end of the call stack was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackFault {
    Overflow,
    Underflow,
}

impl fmt::Display for StackFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackFault::Overflow => write!(f, "overflow"),
            StackFault::Underflow => write!(f, "underflow"),
        }
    }
}
