/// # Display
/// The Chip-8 display is 64x32 monochrome pixels.
pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// # Memory map
/// - `0x000..=0x1FF` is reserved for the interpreter; the sprite sheet lives at its start
/// - `0x200..=0xE9F` holds the loaded program
/// - `0xEA0..=0xFFF` was used by the COSMAC VIP interpreter for its stack, variables and display
pub const MEMORY_SIZE: usize = 4096;
pub const SPRITE_SHEET_START: u16 = 0x000;
pub const PROGRAM_START: u16 = 0x200;
pub const PROGRAM_END: u16 = 0xE9F;
pub const PROGRAM_CAPACITY: usize = (PROGRAM_END - PROGRAM_START) as usize + 1;

pub const REGISTER_COUNT: usize = 16;
pub const STACK_DEPTH: usize = 16;
pub const KEY_COUNT: usize = 16;

/// # Timing
/// Programs written for the Chip-8 are generally happy somewhere between 500Hz and 1kHz.
/// The timers always count down at 60Hz regardless of how fast the CPU runs.
pub const CPU_HZ: u32 = 700;
pub const TIMER_HZ: u32 = 60;

/// The most periods the CPU's capped `Clock` will report for a single stretch of elapsed time.
/// Anything beyond this is dropped so a stalled host doesn't come back to a burst of cycles.
pub const MAX_CATCH_UP_PERIODS: u32 = 32;

/// # Sprite Sheet
/// Glyphs for the hexadecimal digits 0..F, each 5 bytes tall and 4 pixels wide.
/// Digit `d` starts at `SPRITE_SHEET_START + d * SPRITE_HEIGHT`.
pub const SPRITE_HEIGHT: u16 = 5;
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
