pub use chip8::Chip8;
pub use clock::Clock;
pub use config::{Config, EdgePolicy};
pub use constants::{CPU_HZ, TIMER_HZ};
pub use error::{Error, StackFault};
pub use framebuffer::Frame;
pub use instruction::Instruction;
pub use state::Status;
pub use timers::TimerEvent;

mod chip8;
mod clock;
mod config;
pub mod constants;
mod error;
pub mod framebuffer;
mod instruction;
pub mod keypad;
pub mod memory;
mod opcode;
mod operations;
pub mod registers;
pub mod stack;
pub mod state;
pub mod timers;
