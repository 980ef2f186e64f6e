use rand::Rng;

use crate::constants::{SPRITE_HEIGHT, SPRITE_SHEET_START};
use crate::error::Error;
use crate::instruction::Context;
use crate::registers::RegisterFile;
use crate::state::{State, Status};

/// Swaps in `registers` and moves on to the next instruction.
fn next(state: &State, mut registers: RegisterFile) -> State {
    registers.pc = state.registers.next();
    State {
        registers,
        ..*state
    }
}

/// Moves to the next instruction, or the one after it if `condition` holds.
fn skip_if(state: &State, condition: bool) -> State {
    let mut registers = state.registers;
    registers.pc = state.registers.skip_if(condition);
    State {
        registers,
        ..*state
    }
}

fn vx(state: &State, x: u8) -> u8 {
    state.registers.v[x as usize]
}

/// clear
pub fn clr(state: &State) -> State {
    let mut frame_buffer = state.frame_buffer;
    frame_buffer.clear();
    State {
        frame_buffer,
        ..next(state, state.registers)
    }
}

/// PC = STACK.pop()
/// The saved address already points past the call.
pub fn rts(state: &State, ctx: &Context) -> Result<State, Error> {
    let mut stack = state.stack;
    let pc = stack.pop().map_err(|kind| Error::StackFault {
        kind,
        opcode: ctx.opcode,
        pc: state.registers.pc,
    })?;
    let mut registers = state.registers;
    registers.pc = pc;
    Ok(State {
        registers,
        stack,
        ..*state
    })
}

/// PC = addr
pub fn jump(addr: u16, state: &State) -> State {
    let mut registers = state.registers;
    registers.pc = addr;
    State {
        registers,
        ..*state
    }
}

/// STACK.push(PC + 2); PC = addr
pub fn call(addr: u16, state: &State, ctx: &Context) -> Result<State, Error> {
    let mut stack = state.stack;
    stack
        .push(state.registers.next())
        .map_err(|kind| Error::StackFault {
            kind,
            opcode: ctx.opcode,
            pc: state.registers.pc,
        })?;
    let mut registers = state.registers;
    registers.pc = addr;
    Ok(State {
        registers,
        stack,
        ..*state
    })
}

/// if Vx == nn then skip
pub fn ske(x: u8, nn: u8, state: &State) -> State {
    skip_if(state, vx(state, x) == nn)
}

/// if Vx != nn then skip
pub fn skne(x: u8, nn: u8, state: &State) -> State {
    skip_if(state, vx(state, x) != nn)
}

/// if Vx == Vy then skip
pub fn skre(x: u8, y: u8, state: &State) -> State {
    skip_if(state, vx(state, x) == vx(state, y))
}

/// Vx = nn
pub fn load(x: u8, nn: u8, state: &State) -> State {
    let mut registers = state.registers;
    registers.v[x as usize] = nn;
    next(state, registers)
}

/// Vx += nn
/// Overflow wraps and VF is left alone.
pub fn add(x: u8, nn: u8, state: &State) -> State {
    let mut registers = state.registers;
    registers.v[x as usize] = vx(state, x).wrapping_add(nn);
    next(state, registers)
}

/// Vx = Vy
pub fn mv(x: u8, y: u8, state: &State) -> State {
    let mut registers = state.registers;
    registers.v[x as usize] = vx(state, y);
    next(state, registers)
}

/// Vx |= Vy
pub fn or(x: u8, y: u8, state: &State) -> State {
    let mut registers = state.registers;
    registers.v[x as usize] |= vx(state, y);
    next(state, registers)
}

/// Vx &= Vy
pub fn and(x: u8, y: u8, state: &State) -> State {
    let mut registers = state.registers;
    registers.v[x as usize] &= vx(state, y);
    next(state, registers)
}

/// Vx ^= Vy
pub fn xor(x: u8, y: u8, state: &State) -> State {
    let mut registers = state.registers;
    registers.v[x as usize] ^= vx(state, y);
    next(state, registers)
}

// The ALU operations below write VF after Vx so the flag survives when x is 0xF.

/// Vx += Vy; VF = carry
pub fn addr(x: u8, y: u8, state: &State) -> State {
    let (res, carry) = vx(state, x).overflowing_add(vx(state, y));
    let mut registers = state.registers;
    registers.v[x as usize] = res;
    registers.v[0xF] = u8::from(carry);
    next(state, registers)
}

/// Vx -= Vy; VF = !borrow
pub fn sub(x: u8, y: u8, state: &State) -> State {
    let (res, borrow) = vx(state, x).overflowing_sub(vx(state, y));
    let mut registers = state.registers;
    registers.v[x as usize] = res;
    registers.v[0xF] = u8::from(!borrow);
    next(state, registers)
}

/// Vx >>= 1; VF = the bit shifted out
pub fn shr(x: u8, state: &State) -> State {
    let value = vx(state, x);
    let mut registers = state.registers;
    registers.v[x as usize] = value >> 1;
    registers.v[0xF] = value & 0x1;
    next(state, registers)
}

/// Vx = Vy - Vx; VF = !borrow
pub fn subn(x: u8, y: u8, state: &State) -> State {
    let (res, borrow) = vx(state, y).overflowing_sub(vx(state, x));
    let mut registers = state.registers;
    registers.v[x as usize] = res;
    registers.v[0xF] = u8::from(!borrow);
    next(state, registers)
}

/// Vx <<= 1; VF = the bit shifted out
pub fn shl(x: u8, state: &State) -> State {
    let value = vx(state, x);
    let mut registers = state.registers;
    registers.v[x as usize] = value << 1;
    registers.v[0xF] = value >> 7;
    next(state, registers)
}

/// if Vx != Vy then skip
pub fn skrne(x: u8, y: u8, state: &State) -> State {
    skip_if(state, vx(state, x) != vx(state, y))
}

/// I = addr
pub fn loadi(addr: u16, state: &State) -> State {
    let mut registers = state.registers;
    registers.i = addr;
    next(state, registers)
}

/// PC = V0 + addr
pub fn jumpi(addr: u16, state: &State) -> State {
    jump(addr + u16::from(vx(state, 0x0)), state)
}

/// Vx = rand_byte & nn
pub fn rand(x: u8, nn: u8, state: &State, ctx: &mut Context) -> State {
    let rand_byte: u8 = ctx.rng.random();
    let mut registers = state.registers;
    registers.v[x as usize] = rand_byte & nn;
    next(state, registers)
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the sprite in memory I..I+n onto the FrameBuffer at Vx, Vy.
/// Sets VF if any pixels were erased
pub fn draw(x: u8, y: u8, n: u8, state: &State, ctx: &Context) -> Result<State, Error> {
    let sprite = state
        .memory
        .read(state.registers.i, n as usize)
        .map_err(|e| e.at(ctx.opcode, state.registers.pc))?;

    let mut frame_buffer = state.frame_buffer;
    let collision = frame_buffer.draw(vx(state, x), vx(state, y), sprite, ctx.config.edges);

    let mut registers = state.registers;
    registers.v[0xF] = u8::from(collision);
    Ok(State {
        frame_buffer,
        ..next(state, registers)
    })
}

/// if Vx.pressed then skip
pub fn skpr(x: u8, state: &State, ctx: &Context) -> State {
    skip_if(state, ctx.keypad.is_pressed(vx(state, x)))
}

/// if !Vx.pressed then skip
pub fn skup(x: u8, state: &State, ctx: &Context) -> State {
    skip_if(state, !ctx.keypad.is_pressed(vx(state, x)))
}

/// Vx = DT
pub fn moved(x: u8, state: &State) -> State {
    let mut registers = state.registers;
    registers.v[x as usize] = state.timers.delay;
    next(state, registers)
}

/// await keypress for Vx
/// Nothing else runs until the machine sees a key go down.
pub fn keyd(x: u8, state: &State) -> State {
    State {
        status: Status::AwaitingKey(x),
        ..next(state, state.registers)
    }
}

/// DT = Vx
pub fn loads(x: u8, state: &State) -> State {
    let mut timers = state.timers;
    timers.delay = vx(state, x);
    State {
        timers,
        ..next(state, state.registers)
    }
}

/// ST = Vx
pub fn ld(x: u8, state: &State) -> State {
    let mut timers = state.timers;
    timers.sound = vx(state, x);
    State {
        timers,
        ..next(state, state.registers)
    }
}

/// I += Vx
pub fn addi(x: u8, state: &State) -> State {
    let mut registers = state.registers;
    registers.i = state.registers.i.wrapping_add(u16::from(vx(state, x)));
    next(state, registers)
}

/// I = address of the glyph for the low nibble of Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(x: u8, state: &State) -> State {
    let digit = u16::from(vx(state, x) & 0xF);
    let mut registers = state.registers;
    registers.i = SPRITE_SHEET_START + digit * SPRITE_HEIGHT;
    next(state, registers)
}

/// mem[I..I+3] = bcd(Vx)
pub fn bcd(x: u8, state: &State, ctx: &Context) -> Result<State, Error> {
    let value = vx(state, x);
    let digits = [value / 100, value / 10 % 10, value % 10];
    let mut memory = state.memory;
    memory
        .write(state.registers.i, &digits)
        .map_err(|e| e.at(ctx.opcode, state.registers.pc))?;
    Ok(State {
        memory,
        ..next(state, state.registers)
    })
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(x: u8, state: &State, ctx: &Context) -> Result<State, Error> {
    let mut memory = state.memory;
    memory
        .write(state.registers.i, &state.registers.v[..=x as usize])
        .map_err(|e| e.at(ctx.opcode, state.registers.pc))?;
    Ok(State {
        memory,
        ..next(state, state.registers)
    })
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(x: u8, state: &State, ctx: &Context) -> Result<State, Error> {
    let count = x as usize + 1;
    let bytes = state
        .memory
        .read(state.registers.i, count)
        .map_err(|e| e.at(ctx.opcode, state.registers.pc))?;
    let mut registers = state.registers;
    registers.v[..count].copy_from_slice(bytes);
    Ok(next(state, registers))
}
