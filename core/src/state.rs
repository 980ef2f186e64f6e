use crate::framebuffer::Framebuffer;
use crate::memory::Memory;
use crate::registers::RegisterFile;
use crate::stack::CallStack;
use crate::timers::TimerPair;

/// Whether the machine is executing instructions.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    Running,
    /// `FX0A` is waiting for a key to go down; the key will be stored in the register.
    AwaitingKey(u8),
}

/// A snapshot of the Chip-8 internal state
///
/// ## CPU
/// - `registers`: V0..VF, I and the program counter
/// - `stack`: return addresses and the stack pointer
/// - `timers`: delay and sound
///
/// ## Memory
/// - 4096 bytes of addressable memory, with the sprite sheet at its start
/// - a 64x32 frame buffer storing the contents of the next frame to be drawn
///
/// ## Input
/// - Emulation halts in `Status::AwaitingKey` until a key's value is written to some register
///
/// Every instruction is a function from one `State` to the next, so a failed instruction
/// leaves the previous `State` exactly as it was.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct State {
    pub registers: RegisterFile,
    pub memory: Memory,
    pub stack: CallStack,
    pub frame_buffer: Framebuffer,
    pub timers: TimerPair,
    pub status: Status,
}

impl State {
    pub fn new() -> Self {
        State {
            registers: RegisterFile::new(),
            memory: Memory::new(),
            stack: CallStack::new(),
            frame_buffer: Framebuffer::new(),
            timers: TimerPair::new(),
            status: Status::Running,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
