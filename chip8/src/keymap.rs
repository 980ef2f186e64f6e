use sdl2::keyboard::Keycode;

/// # Keymap
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// The keypad is laid onto the left four alphanumeric columns of a QWERTY keyboard.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
const LAYOUT: [(Keycode, u8); 16] = [
    (Keycode::Num1, 0x1),
    (Keycode::Num2, 0x2),
    (Keycode::Num3, 0x3),
    (Keycode::Num4, 0xC),
    (Keycode::Q, 0x4),
    (Keycode::W, 0x5),
    (Keycode::E, 0x6),
    (Keycode::R, 0xD),
    (Keycode::A, 0x7),
    (Keycode::S, 0x8),
    (Keycode::D, 0x9),
    (Keycode::F, 0xE),
    (Keycode::Z, 0xA),
    (Keycode::X, 0x0),
    (Keycode::C, 0xB),
    (Keycode::V, 0xF),
];

/// Looks up the keypad key bound to a keyboard key.
pub fn keypad_key(keycode: Keycode) -> Option<u8> {
    LAYOUT
        .iter()
        .find(|(bound, _)| *bound == keycode)
        .map(|&(_, key)| key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners() {
        assert_eq!(keypad_key(Keycode::Num1), Some(0x1));
        assert_eq!(keypad_key(Keycode::Num4), Some(0xC));
        assert_eq!(keypad_key(Keycode::Z), Some(0xA));
        assert_eq!(keypad_key(Keycode::V), Some(0xF));
    }

    #[test]
    fn test_every_key_bound_once() {
        let mut seen = [false; 16];
        for &(_, key) in LAYOUT.iter() {
            assert!(!seen[key as usize], "key {:X} bound twice", key);
            seen[key as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(keypad_key(Keycode::Space), None);
        assert_eq!(keypad_key(Keycode::Escape), None);
        assert_eq!(keypad_key(Keycode::Num5), None);
    }
}
