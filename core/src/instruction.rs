use std::fmt;

use rand::rngs::StdRng;

use crate::config::Config;
use crate::error::Error;
use crate::keypad::Keypad;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// Everything an instruction can see besides the machine state.
pub struct Context<'a> {
    /// The raw opcode being executed, for error reporting.
    pub opcode: u16,
    pub keypad: &'a Keypad,
    pub rng: &'a mut StdRng,
    pub config: &'a Config,
}

/// A decoded Chip-8 instruction.
///
/// `x` and `y` name registers, `nn` is an immediate byte, `n` a sprite height and `addr` a
/// 12-bit address.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0`
    Clear,
    /// `00EE`
    Return,
    /// `1NNN`
    Jump { addr: u16 },
    /// `2NNN`
    Call { addr: u16 },
    /// `3XNN`
    SkipEq { x: u8, nn: u8 },
    /// `4XNN`
    SkipNe { x: u8, nn: u8 },
    /// `5XY0`
    SkipRegEq { x: u8, y: u8 },
    /// `6XNN`
    Load { x: u8, nn: u8 },
    /// `7XNN`
    Add { x: u8, nn: u8 },
    /// `8XY0`
    Move { x: u8, y: u8 },
    /// `8XY1`
    Or { x: u8, y: u8 },
    /// `8XY2`
    And { x: u8, y: u8 },
    /// `8XY3`
    Xor { x: u8, y: u8 },
    /// `8XY4`
    AddReg { x: u8, y: u8 },
    /// `8XY5`
    Sub { x: u8, y: u8 },
    /// `8XY6`
    ShiftRight { x: u8, y: u8 },
    /// `8XY7`
    SubNeg { x: u8, y: u8 },
    /// `8XYE`
    ShiftLeft { x: u8, y: u8 },
    /// `9XY0`
    SkipRegNe { x: u8, y: u8 },
    /// `ANNN`
    LoadI { addr: u16 },
    /// `BNNN`
    JumpV0 { addr: u16 },
    /// `CXNN`
    Random { x: u8, nn: u8 },
    /// `DXYN`
    Draw { x: u8, y: u8, n: u8 },
    /// `EX9E`
    SkipPressed { x: u8 },
    /// `EXA1`
    SkipReleased { x: u8 },
    /// `FX07`
    ReadDelay { x: u8 },
    /// `FX0A`
    AwaitKey { x: u8 },
    /// `FX15`
    SetDelay { x: u8 },
    /// `FX18`
    SetSound { x: u8 },
    /// `FX1E`
    AddI { x: u8 },
    /// `FX29`
    Glyph { x: u8 },
    /// `FX33`
    Bcd { x: u8 },
    /// `FX55`
    Store { x: u8 },
    /// `FX65`
    Read { x: u8 },
}

impl Instruction {
    /// Selects the Instruction for an opcode.
    ///
    /// The top nibble picks a family; families that hold more than one instruction are
    /// resolved by their own match, which never falls through to another family.
    /// Returns `None` for any bit pattern that isn't an instruction.
    pub fn decode(op: u16) -> Option<Instruction> {
        use Instruction::*;

        let (x, y, n, nn, addr) = (op.x(), op.y(), op.n(), op.nn(), op.nnn());
        match op.family() {
            0x0 => match addr {
                0x0E0 => Some(Clear),
                0x0EE => Some(Return),
                _ => None,
            },
            0x1 => Some(Jump { addr }),
            0x2 => Some(Call { addr }),
            0x3 => Some(SkipEq { x, nn }),
            0x4 => Some(SkipNe { x, nn }),
            0x5 => match n {
                0x0 => Some(SkipRegEq { x, y }),
                _ => None,
            },
            0x6 => Some(Load { x, nn }),
            0x7 => Some(Add { x, nn }),
            0x8 => match n {
                0x0 => Some(Move { x, y }),
                0x1 => Some(Or { x, y }),
                0x2 => Some(And { x, y }),
                0x3 => Some(Xor { x, y }),
                0x4 => Some(AddReg { x, y }),
                0x5 => Some(Sub { x, y }),
                0x6 => Some(ShiftRight { x, y }),
                0x7 => Some(SubNeg { x, y }),
                0xE => Some(ShiftLeft { x, y }),
                _ => None,
            },
            0x9 => match n {
                0x0 => Some(SkipRegNe { x, y }),
                _ => None,
            },
            0xA => Some(LoadI { addr }),
            0xB => Some(JumpV0 { addr }),
            0xC => Some(Random { x, nn }),
            0xD => Some(Draw { x, y, n }),
            0xE => match nn {
                0x9E => Some(SkipPressed { x }),
                0xA1 => Some(SkipReleased { x }),
                _ => None,
            },
            0xF => match nn {
                0x07 => Some(ReadDelay { x }),
                0x0A => Some(AwaitKey { x }),
                0x15 => Some(SetDelay { x }),
                0x18 => Some(SetSound { x }),
                0x1E => Some(AddI { x }),
                0x29 => Some(Glyph { x }),
                0x33 => Some(Bcd { x }),
                0x55 => Some(Store { x }),
                0x65 => Some(Read { x }),
                _ => None,
            },
            _ => None,
        }
    }

    /// Produces the state that follows `state` once this instruction has run.
    pub fn execute(self, state: &State, ctx: &mut Context) -> Result<State, Error> {
        use Instruction::*;

        match self {
            Clear => Ok(clr(state)),
            Return => rts(state, ctx),
            Jump { addr } => Ok(jump(addr, state)),
            Call { addr } => call(addr, state, ctx),
            SkipEq { x, nn } => Ok(ske(x, nn, state)),
            SkipNe { x, nn } => Ok(skne(x, nn, state)),
            SkipRegEq { x, y } => Ok(skre(x, y, state)),
            Load { x, nn } => Ok(load(x, nn, state)),
            Add { x, nn } => Ok(add(x, nn, state)),
            Move { x, y } => Ok(mv(x, y, state)),
            Or { x, y } => Ok(or(x, y, state)),
            And { x, y } => Ok(and(x, y, state)),
            Xor { x, y } => Ok(xor(x, y, state)),
            AddReg { x, y } => Ok(addr(x, y, state)),
            Sub { x, y } => Ok(sub(x, y, state)),
            ShiftRight { x, .. } => Ok(shr(x, state)),
            SubNeg { x, y } => Ok(subn(x, y, state)),
            ShiftLeft { x, .. } => Ok(shl(x, state)),
            SkipRegNe { x, y } => Ok(skrne(x, y, state)),
            LoadI { addr } => Ok(loadi(addr, state)),
            JumpV0 { addr } => Ok(jumpi(addr, state)),
            Random { x, nn } => Ok(rand(x, nn, state, ctx)),
            Draw { x, y, n } => draw(x, y, n, state, ctx),
            SkipPressed { x } => Ok(skpr(x, state, ctx)),
            SkipReleased { x } => Ok(skup(x, state, ctx)),
            ReadDelay { x } => Ok(moved(x, state)),
            AwaitKey { x } => Ok(keyd(x, state)),
            SetDelay { x } => Ok(loads(x, state)),
            SetSound { x } => Ok(ld(x, state)),
            AddI { x } => Ok(addi(x, state)),
            Glyph { x } => Ok(ldspr(x, state)),
            Bcd { x } => bcd(x, state, ctx),
            Store { x } => stor(x, state, ctx),
            Read { x } => read(x, state, ctx),
        }
    }
}

/// Disassembles the instruction using the conventional Chip-8 mnemonics.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            Clear => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Jump { addr } => write!(f, "JP {:#05X}", addr),
            Call { addr } => write!(f, "CALL {:#05X}", addr),
            SkipEq { x, nn } => write!(f, "SE V{:X}, {:#04X}", x, nn),
            SkipNe { x, nn } => write!(f, "SNE V{:X}, {:#04X}", x, nn),
            SkipRegEq { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            Load { x, nn } => write!(f, "LD V{:X}, {:#04X}", x, nn),
            Add { x, nn } => write!(f, "ADD V{:X}, {:#04X}", x, nn),
            Move { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddReg { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight { x, .. } => write!(f, "SHR V{:X}", x),
            SubNeg { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft { x, .. } => write!(f, "SHL V{:X}", x),
            SkipRegNe { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadI { addr } => write!(f, "LD I, {:#05X}", addr),
            JumpV0 { addr } => write!(f, "JP V0, {:#05X}", addr),
            Random { x, nn } => write!(f, "RND V{:X}, {:#04X}", x, nn),
            Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipPressed { x } => write!(f, "SKP V{:X}", x),
            SkipReleased { x } => write!(f, "SKNP V{:X}", x),
            ReadDelay { x } => write!(f, "LD V{:X}, DT", x),
            AwaitKey { x } => write!(f, "LD V{:X}, K", x),
            SetDelay { x } => write!(f, "LD DT, V{:X}", x),
            SetSound { x } => write!(f, "LD ST, V{:X}", x),
            AddI { x } => write!(f, "ADD I, V{:X}", x),
            Glyph { x } => write!(f, "LD F, V{:X}", x),
            Bcd { x } => write!(f, "LD B, V{:X}", x),
            Store { x } => write!(f, "LD [I], V{:X}", x),
            Read { x } => write!(f, "LD V{:X}, [I]", x),
        }
    }
}
