/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each and are stored big-endian, so an opcode is composed from
/// the byte at `pc` (high) and the byte at `pc + 1` (low).
///
/// The most significant nibble selects a family of instructions. Within the `0`, `8`, `E`
/// and `F` families the remaining bits pick the specific instruction:
/// - `0___` is decided by its low 12 bits (`00E0`, `00EE`)
/// - `8___` is decided by its low nibble
/// - `E___` and `F___` are decided by their low byte
///
/// Nibbles not used to select the instruction carry its operands:
/// - `_NNN` a 12-bit address
/// - `__NN` an 8-bit immediate
/// - `___N` a 4-bit immediate (sprite height)
/// - `_X__` register Vx, or the range V0..=Vx
/// - `__Y_` register Vy
pub trait Opcode {
    /// Composes an opcode from its high and low bytes.
    fn from_bytes(high: u8, low: u8) -> Self;

    /// `[F___]`
    fn family(&self) -> u8;

    /// `[_X__]`
    fn x(&self) -> u8;

    /// `[__Y_]`
    fn y(&self) -> u8;

    /// `[___N]`
    fn n(&self) -> u8;

    /// `[__NN]`
    fn nn(&self) -> u8;

    /// `[_NNN]`
    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn from_bytes(high: u8, low: u8) -> Self {
        u16::from(high) << 8 | u16::from(low)
    }

    fn family(&self) -> u8 {
        ((self & 0xF000) >> 12) as u8
    }

    fn x(&self) -> u8 {
        ((self & 0x0F00) >> 8) as u8
    }

    fn y(&self) -> u8 {
        ((self & 0x00F0) >> 4) as u8
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn nn(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}
