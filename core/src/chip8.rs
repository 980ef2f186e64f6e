use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::error::Error;
use crate::framebuffer::Frame;
use crate::instruction::{Context, Instruction};
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::opcode::Opcode;
use crate::registers::RegisterFile;
use crate::stack::CallStack;
use crate::state::{State, Status};
use crate::timers::{TimerEvent, TimerPair};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the `keypad`, with public interfaces for pressing and releasing keys
///  - its own random number generator for `CXNN`
///  - the fault that stopped it, if any
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU one instruction at a time
/// - advancing its timers, which the host does at 60Hz independently of the CPU
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    keypad: Keypad,
    config: Config,
    rng: StdRng,
    fault: Option<Error>,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Chip8 {
            state: State::new(),
            keypad: Keypad::new(),
            config,
            rng: StdRng::from_os_rng(),
            fault: None,
        }
    }

    /// Makes `CXNN` produce the same sequence on every run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Load a rom into the program region
    ///
    /// # Arguments
    /// * `rom` the raw program, at most `PROGRAM_CAPACITY` bytes
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), Error> {
        self.state.memory.load_program(rom)?;
        debug!("loaded {} byte ROM", rom.len());
        Ok(())
    }

    /// Puts the machine back to how it was constructed, discarding the program and any fault.
    pub fn reset(&mut self) {
        self.state = State::new();
        self.fault = None;
        debug!("machine reset");
    }

    /// Advances the CPU by a single instruction
    /// - does nothing while awaiting a keypress
    /// - gets, decodes and executes the next opcode
    ///
    /// A fault stops the machine; every later call returns the same fault until `reset`.
    pub fn step(&mut self) -> Result<Status, Error> {
        if let Some(fault) = self.fault {
            return Err(fault);
        }
        if let Status::AwaitingKey(_) = self.state.status {
            return Ok(self.state.status);
        }
        match self.execute() {
            Ok(state) => {
                self.state = state;
                Ok(self.state.status)
            }
            Err(fault) => {
                warn!("halting: {}", fault);
                self.fault = Some(fault);
                Err(fault)
            }
        }
    }

    fn execute(&mut self) -> Result<State, Error> {
        let pc = self.state.registers.pc;
        if !self.state.registers.pc_in_program() {
            return Err(Error::ProgramCounterOutOfRange { pc });
        }
        let opcode = self.get_op()?;
        let instruction =
            Instruction::decode(opcode).ok_or(Error::UnknownOpcode { opcode, pc })?;
        trace!("{:03X}: {:04X} {}", pc, opcode, instruction);

        let mut ctx = Context {
            opcode,
            keypad: &self.keypad,
            rng: &mut self.rng,
            config: &self.config,
        };
        instruction.execute(&self.state, &mut ctx)
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self) -> Result<u16, Error> {
        let pc = self.state.registers.pc;
        let [high, low] = self
            .state
            .memory
            .word(pc)
            .map_err(|_| Error::ProgramCounterOutOfRange { pc })?;
        Ok(u16::from_bytes(high, low))
    }

    /// Counts both timers down once.
    /// Hosts call this at `TIMER_HZ` regardless of how many instructions ran in between.
    pub fn tick_timers(&mut self) -> Option<TimerEvent> {
        let event = self.state.timers.tick();
        if let Some(event) = event {
            debug!("timer event: {:?}", event);
        }
        event
    }

    /// Set the pressed status of key
    ///
    /// If the machine is waiting on `FX0A`, a key going down (not one that was already held)
    /// is stored in the waiting register and execution resumes.
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        if !self.keypad.press(key) {
            return;
        }
        if let Status::AwaitingKey(register) = self.state.status {
            debug!("V{:X} <- key {:X}", register, key);
            self.state.registers.v[register as usize] = key;
            self.state.status = Status::Running;
        }
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.keypad.release(key);
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn fault(&self) -> Option<Error> {
        self.fault
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.state.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.state.memory
    }

    pub fn stack(&self) -> &CallStack {
        &self.state.stack
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn timers(&self) -> &TimerPair {
        &self.state.timers
    }

    pub fn timers_mut(&mut self) -> &mut TimerPair {
        &mut self.state.timers
    }

    /// Whether a tone should currently be playing.
    pub fn sound_active(&self) -> bool {
        self.state.timers.sound_active()
    }

    /// The current frame, whether or not it has changed.
    pub fn frame(&self) -> &Frame {
        self.state.frame_buffer.pixels()
    }

    /// Returns the Frame if the display should be redrawn
    pub fn pending_frame(&self) -> Option<&Frame> {
        if self.state.frame_buffer.is_dirty() {
            Some(self.state.frame_buffer.pixels())
        } else {
            None
        }
    }

    /// Tells the machine the host has painted the current frame.
    pub fn frame_presented(&mut self) {
        self.state.frame_buffer.mark_clean();
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EdgePolicy;
    use crate::constants::{PROGRAM_CAPACITY, SPRITE_SHEET};
    use crate::error::StackFault;

    fn chip8(rom: &[u8]) -> Chip8 {
        let mut chip8 = Chip8::new().with_seed(0xC8);
        chip8.load_rom(rom).unwrap();
        chip8
    }

    fn run(chip8: &mut Chip8, steps: usize) {
        for _ in 0..steps {
            chip8.step().unwrap();
        }
    }

    /// Whether `op` is one of the 34 instructions, worked out independently of the decoder.
    fn is_instruction(op: u16) -> bool {
        let (family, n, nn) = (op >> 12, op & 0xF, op & 0xFF);
        match family {
            0x0 => op == 0x00E0 || op == 0x00EE,
            0x5 | 0x9 => n == 0,
            0x8 => n <= 0x7 || n == 0xE,
            0xE => nn == 0x9E || nn == 0xA1,
            0xF => [0x07, 0x0A, 0x15, 0x18, 0x1E, 0x29, 0x33, 0x55, 0x65].contains(&nn),
            _ => true,
        }
    }

    #[test]
    fn test_chip8_gets_op() {
        let chip8 = chip8(&[0xAA, 0xBB]);
        assert_eq!(chip8.get_op(), Ok(0xAABB));
    }

    #[test]
    fn test_load_places_rom_at_program_start() {
        let rom: Vec<u8> = (0..=255).collect();
        let chip8 = chip8(&rom);
        let memory = chip8.memory().bytes();
        assert_eq!(memory[0x200..0x300], rom[..]);
        assert_eq!(memory[..80], SPRITE_SHEET[..]);
        assert!(memory[80..0x200].iter().all(|&b| b == 0));
        assert!(memory[0x300..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_load_fills_program_region() {
        let chip8 = chip8(&[0xAB; PROGRAM_CAPACITY]);
        let memory = chip8.memory().bytes();
        assert!(memory[0x200..=0xE9F].iter().all(|&b| b == 0xAB));
        assert!(memory[0xEA0..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_load_rejects_oversized_rom() {
        let mut chip8 = chip8(&[0x12, 0x00]);
        let before = *chip8.memory();
        assert_eq!(
            chip8.load_rom(&[0; PROGRAM_CAPACITY + 1]),
            Err(Error::RomTooLarge {
                length: PROGRAM_CAPACITY + 1,
                capacity: PROGRAM_CAPACITY
            })
        );
        assert!(*chip8.memory() == before);
        // the machine is still usable
        assert_eq!(chip8.step(), Ok(Status::Running));
    }

    #[test]
    fn test_cycles_advance_pc() {
        let mut chip8 = chip8(&[0x00, 0xE0]);
        chip8.step().unwrap();
        assert_eq!(chip8.registers().pc, 0x202);
    }

    #[test]
    fn test_cls_clears_and_marks_frame() {
        // draw the 0 glyph, present it, then clear
        let mut chip8 = chip8(&[0xD0, 0x05, 0x00, 0xE0]);
        chip8.step().unwrap();
        assert!(chip8.pending_frame().is_some());
        chip8.frame_presented();
        assert!(chip8.pending_frame().is_none());
        chip8.step().unwrap();
        let frame = chip8.pending_frame().expect("clearing should mark the frame");
        assert!(frame.iter().flatten().all(|&p| p == 0));
    }

    #[test]
    fn test_call_and_return() {
        let mut rom = vec![0; 0x102];
        rom[0x000..0x002].copy_from_slice(&[0x23, 0x00]);
        rom[0x100..0x102].copy_from_slice(&[0x00, 0xEE]);
        let mut chip8 = chip8(&rom);
        chip8.step().unwrap();
        assert_eq!(chip8.registers().pc, 0x300);
        assert_eq!(chip8.stack().frames(), &[0x202]);
        chip8.step().unwrap();
        assert_eq!(chip8.registers().pc, 0x202);
        assert_eq!(chip8.stack().sp(), 0);
    }

    #[test]
    fn test_add_with_carry() {
        let mut chip8 = chip8(&[0x60, 0xFF, 0x61, 0x01, 0x80, 0x14]);
        run(&mut chip8, 3);
        assert_eq!(chip8.registers().v[0x0], 0x00);
        assert_eq!(chip8.registers().v[0xF], 0x1);
    }

    #[test]
    fn test_sub_with_borrow() {
        let mut chip8 = chip8(&[0x60, 0x05, 0x61, 0x0A, 0x80, 0x15]);
        run(&mut chip8, 3);
        assert_eq!(chip8.registers().v[0x0], 0xFB);
        assert_eq!(chip8.registers().v[0xF], 0x0);
    }

    #[test]
    fn test_drawing_twice_erases_and_collides() {
        // I = glyph 8, V0 = 60, V1 = 29 so the sprite wraps both ways, draw it twice
        let mut chip8 = chip8(&[0x60, 0x3C, 0x61, 0x1D, 0xF2, 0x29, 0xD0, 0x15, 0xD0, 0x15]);
        chip8.state.registers.v[0x2] = 0x8;
        run(&mut chip8, 4);
        assert_eq!(chip8.registers().v[0xF], 0x0);
        assert!(chip8.frame().iter().flatten().any(|&p| p == 1));
        run(&mut chip8, 1);
        assert_eq!(chip8.registers().v[0xF], 0x1);
        assert!(chip8.frame().iter().flatten().all(|&p| p == 0));
    }

    #[test]
    fn test_clipping_config() {
        let mut chip8 = Chip8::with_config(Config {
            edges: EdgePolicy::Clip,
        })
        .with_seed(1);
        // V0 = 62, I = glyph 0, draw
        chip8.load_rom(&[0x60, 0x3E, 0xD0, 0x15]).unwrap();
        run(&mut chip8, 2);
        let lit = chip8.frame().iter().flatten().filter(|&&p| p == 1).count();
        // only the left two columns of the 0 glyph fit: 2 + 1 + 1 + 1 + 2
        assert_eq!(lit, 7);
    }

    #[test]
    fn test_every_unknown_opcode_faults_without_side_effects() {
        let mut chip8 = Chip8::new().with_seed(0);
        let mut unknown = 0;
        for op in 0..=u16::MAX {
            let decoded = Instruction::decode(op);
            assert_eq!(decoded.is_some(), is_instruction(op), "{:04X}", op);
            if decoded.is_some() {
                continue;
            }
            unknown += 1;
            chip8.reset();
            chip8.load_rom(&op.to_be_bytes()).unwrap();
            let before = chip8.state;
            assert_eq!(
                chip8.step(),
                Err(Error::UnknownOpcode { opcode: op, pc: 0x200 })
            );
            assert!(chip8.state == before, "{:04X} changed state", op);
        }
        assert!(unknown > 0);
    }

    #[test]
    fn test_faults_are_sticky_until_reset() {
        let mut chip8 = chip8(&[0x00, 0xEE]);
        let fault = chip8.step().unwrap_err();
        assert!(matches!(
            fault,
            Error::StackFault {
                kind: StackFault::Underflow,
                opcode: 0x00EE,
                pc: 0x200
            }
        ));
        assert_eq!(chip8.step(), Err(fault));
        assert_eq!(chip8.fault(), Some(fault));
        chip8.reset();
        assert_eq!(chip8.fault(), None);
    }

    #[test]
    fn test_jumping_out_of_program_region_faults() {
        let mut chip8 = chip8(&[0x11, 0x00]);
        chip8.step().unwrap();
        assert_eq!(
            chip8.step(),
            Err(Error::ProgramCounterOutOfRange { pc: 0x100 })
        );
    }

    #[test]
    fn test_running_off_the_end_faults() {
        let mut chip8 = chip8(&[0x1E, 0x9E]);
        chip8.step().unwrap();
        // 0xE9E holds 0x0000 which isn't an instruction
        assert_eq!(
            chip8.step(),
            Err(Error::UnknownOpcode {
                opcode: 0x0000,
                pc: 0xE9E
            })
        );
    }

    #[test]
    fn test_recursion_overflows_stack() {
        let mut chip8 = chip8(&[0x22, 0x00]);
        run(&mut chip8, 16);
        assert!(matches!(
            chip8.step(),
            Err(Error::StackFault {
                kind: StackFault::Overflow,
                ..
            })
        ));
    }

    #[test]
    fn test_doesnt_cycle_while_awaiting_key() {
        let mut chip8 = chip8(&[0xF3, 0x0A, 0x00, 0xE0]);
        assert_eq!(chip8.step(), Ok(Status::AwaitingKey(0x3)));
        let pc = chip8.registers().pc;
        for _ in 0..10 {
            assert_eq!(chip8.step(), Ok(Status::AwaitingKey(0x3)));
        }
        assert_eq!(chip8.registers().pc, pc);
        assert!(chip8.pending_frame().is_none());
    }

    #[test]
    fn test_captures_key_presses() {
        let mut chip8 = chip8(&[0xF3, 0x0A, 0x00, 0xE0]);
        chip8.step().unwrap();
        chip8.key_press(0xE);
        assert_eq!(chip8.status(), Status::Running);
        assert_eq!(chip8.registers().v[0x3], 0xE);
        chip8.step().unwrap();
        assert_eq!(chip8.registers().pc, 0x204);
    }

    #[test]
    fn test_held_key_doesnt_satisfy_wait() {
        let mut chip8 = chip8(&[0xF3, 0x0A]);
        chip8.key_press(0x5);
        chip8.step().unwrap();
        // key repeat while still held
        chip8.key_press(0x5);
        assert_eq!(chip8.status(), Status::AwaitingKey(0x3));
        chip8.key_release(0x5);
        chip8.key_press(0x5);
        assert_eq!(chip8.status(), Status::Running);
        assert_eq!(chip8.registers().v[0x3], 0x5);
    }

    #[test]
    fn test_delay_timer_decays_independently_of_cycles() {
        // V0 = 5, DT = V0, then spin on a jump to self
        let mut chip8 = chip8(&[0x60, 0x05, 0xF0, 0x15, 0x12, 0x04]);
        run(&mut chip8, 2);
        assert_eq!(chip8.timers().delay, 5);
        run(&mut chip8, 100);
        assert_eq!(chip8.timers().delay, 5);
        for _ in 0..5 {
            chip8.tick_timers();
        }
        assert_eq!(chip8.timers().delay, 0);
        chip8.tick_timers();
        assert_eq!(chip8.timers().delay, 0);
    }

    #[test]
    fn test_sound_timer_edge() {
        let mut chip8 = chip8(&[0x60, 0x02, 0xF0, 0x18]);
        run(&mut chip8, 2);
        assert!(chip8.sound_active());
        assert_eq!(chip8.tick_timers(), None);
        assert_eq!(chip8.tick_timers(), Some(TimerEvent::SoundStopped));
        assert!(!chip8.sound_active());
    }

    #[test]
    fn test_seeded_machines_agree() {
        let rom = [0xC0, 0xFF, 0xC1, 0xFF, 0xC2, 0xFF];
        let mut a = chip8(&rom);
        let mut b = chip8(&rom);
        run(&mut a, 3);
        run(&mut b, 3);
        assert_eq!(a.registers().v, b.registers().v);
    }

    #[test]
    fn test_machines_are_independent() {
        let mut a = chip8(&[0x60, 0x11]);
        let b = chip8(&[0x60, 0x22]);
        run(&mut a, 1);
        assert_eq!(a.registers().v[0x0], 0x11);
        assert_eq!(b.registers().v[0x0], 0x00);
        assert_eq!(b.registers().pc, 0x200);
    }

    #[test]
    fn test_keeps_its_config() {
        let clip = Config {
            edges: EdgePolicy::Clip,
        };
        assert_eq!(Chip8::with_config(clip).config(), &clip);
        assert_eq!(Chip8::new().config().edges, EdgePolicy::Wrap);
    }

    #[test]
    fn test_keypad_tracks_presses_and_releases() {
        let mut chip8 = chip8(&[0x00, 0xE0]);
        chip8.key_press(0xA);
        assert!(chip8.keypad().is_pressed(0xA));
        assert!(!chip8.keypad().is_pressed(0xB));
        chip8.key_release(0xA);
        assert!(!chip8.keypad().is_pressed(0xA));
    }

    #[test]
    fn test_host_can_set_timers() {
        let mut chip8 = chip8(&[0xF4, 0x07]);
        chip8.timers_mut().delay = 0x30;
        chip8.timers_mut().sound = 1;
        assert!(chip8.sound_active());
        chip8.step().unwrap();
        assert_eq!(chip8.registers().v[0x4], 0x30);
        assert_eq!(chip8.tick_timers(), Some(TimerEvent::SoundStopped));
        assert_eq!(chip8.timers().delay, 0x2F);
    }
}
