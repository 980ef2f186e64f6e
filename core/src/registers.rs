use crate::constants::{PROGRAM_END, PROGRAM_START, REGISTER_COUNT};

/// Width of a single instruction in bytes.
const INSTRUCTION_SIZE: u16 = 0x2;

/// # Registers
/// - 16 8-bit registers (V0..VF)
///     - VF doubles as the carry, borrow and collision flag
/// - (i) a 16-bit memory address register
/// - (pc) a 16-bit program counter
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RegisterFile {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
}

impl RegisterFile {
    pub fn new() -> Self {
        RegisterFile {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
        }
    }

    /// The address of the instruction after the current one.
    pub fn next(&self) -> u16 {
        self.pc.wrapping_add(INSTRUCTION_SIZE)
    }

    /// The address of the instruction after the next one.
    pub fn skip(&self) -> u16 {
        self.pc.wrapping_add(INSTRUCTION_SIZE * 2)
    }

    /// `next` if `condition` doesn't hold, `skip` if it does.
    pub fn skip_if(&self, condition: bool) -> u16 {
        if condition {
            self.skip()
        } else {
            self.next()
        }
    }

    pub fn pc_in_program(&self) -> bool {
        (PROGRAM_START..=PROGRAM_END).contains(&self.pc)
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}
