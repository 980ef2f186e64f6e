use crate::constants::KEY_COUNT;

/// # Keypad
/// The pressed status of the 16 hexadecimal keys 0..F.
///
/// Only the host writes to the keypad; instructions just look at it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Keypad {
    pressed: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Keypad {
            pressed: [false; KEY_COUNT],
        }
    }

    /// Marks `key` as held down.
    /// Returns true only if the key wasn't already down, so repeated presses aren't edges.
    pub fn press(&mut self, key: u8) -> bool {
        match self.pressed.get_mut(key as usize) {
            Some(held) => !std::mem::replace(held, true),
            None => false,
        }
    }

    pub fn release(&mut self, key: u8) {
        if let Some(held) = self.pressed.get_mut(key as usize) {
            *held = false;
        }
    }

    /// Keys outside 0..F are never pressed.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed.get(key as usize).copied().unwrap_or(false)
    }
}
