use std::path::Path;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chip8_core::constants::MAX_CATCH_UP_PERIODS;
use chip8_core::{Chip8, Clock, Config, TimerEvent, TIMER_HZ};
use chip8_display::Display;

use crate::keymap::keypad_key;

pub fn run(rom: &Path, config: Config, hz: u32, scale: u32) -> Result<()> {
    let program = std::fs::read(rom).with_context(|| format!("reading {}", rom.display()))?;
    let mut chip8 = Chip8::with_config(config);
    chip8
        .load_rom(&program)
        .with_context(|| format!("loading {}", rom.display()))?;
    info!("loaded {} ({} bytes)", rom.display(), program.len());

    // Get SDL2 context
    let sdl = sdl2::init().map_err(|e| anyhow!(e))?;
    let title = rom
        .file_name()
        .map_or_else(|| "chip8".to_string(), |name| name.to_string_lossy().into_owned());
    let mut display = Display::new(&sdl, &title, scale)?;
    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;

    // The CPU and the timers keep separate clocks so the timers stay at 60Hz whatever `hz` is.
    // Only the CPU drops its backlog after a stall; the timers make up every missed tick.
    let mut cpu_clock = Clock::new(hz).capped(MAX_CATCH_UP_PERIODS);
    let mut timer_clock = Clock::new(TIMER_HZ);
    let mut last_cycle = Instant::now();

    // Whether or not the clock speed should be respected
    let mut fast_forward = false;
    // Whether the sound timer was running at the end of the last cycle
    let mut beeping = false;

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key),
                    ..
                } => {
                    if let Some(k) = keypad_key(key) {
                        chip8.key_press(k);
                    } else if key == Keycode::Space {
                        fast_forward = true;
                    } else if key == Keycode::Escape {
                        break 'event;
                    }
                }
                Event::KeyUp {
                    keycode: Some(key),
                    ..
                } => {
                    if let Some(k) = keypad_key(key) {
                        chip8.key_release(k);
                    } else if key == Keycode::Space {
                        fast_forward = false;
                    }
                }
                _ => continue,
            }
        }

        // Update state
        let now = Instant::now();
        let elapsed = now - last_cycle;
        last_cycle = now;

        let mut cycles = cpu_clock.advance(elapsed);
        if fast_forward {
            cycles = cycles.max(1) * 8;
        }
        for _ in 0..cycles {
            chip8.step()?;
        }
        for _ in 0..timer_clock.advance(elapsed) {
            if let Some(TimerEvent::SoundStopped) = chip8.tick_timers() {
                debug!("sound off");
            }
        }
        if chip8.sound_active() && !beeping {
            debug!("sound on");
        }
        beeping = chip8.sound_active();

        // If the frame is dirty, render it and mark it clean
        if let Some(frame) = chip8.pending_frame() {
            display.render(frame)?;
            chip8.frame_presented();
        }

        // Handle timing
        if !fast_forward {
            std::thread::sleep(cpu_clock.until_next().min(timer_clock.until_next()));
        }
    }

    info!("exiting");
    Ok(())
}
