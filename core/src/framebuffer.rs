use crate::config::EdgePolicy;
use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// The on/off state of every pixel, indexed as `[y][x]` and encoded as 1/0.
pub type Frame = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # Frame Buffer
/// Stores the contents of the next frame to be drawn along with a dirty flag.
///
/// The flag is raised whenever the frame is cleared or drawn to and is only lowered by the host
/// once it has repainted.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pixels: Frame,
    dirty: bool,
}

impl Framebuffer {
    pub fn new() -> Self {
        Framebuffer {
            pixels: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            dirty: false,
        }
    }

    pub fn pixels(&self) -> &Frame {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH]
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn clear(&mut self) {
        self.pixels = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        self.dirty = true;
    }

    /// XORs an 8 pixel wide sprite onto the frame with its top left corner at `(x, y)`.
    ///
    /// Each byte of `sprite` is a row, most significant bit leftmost.
    /// Returns whether any pixel was switched off.
    pub fn draw(&mut self, x: u8, y: u8, sprite: &[u8], edges: EdgePolicy) -> bool {
        let origin_x = x as usize % DISPLAY_WIDTH;
        let origin_y = y as usize % DISPLAY_HEIGHT;
        let mut collision = false;

        for (row, byte) in sprite.iter().enumerate() {
            let y = origin_y + row;
            if edges == EdgePolicy::Clip && y >= DISPLAY_HEIGHT {
                break;
            }
            let y = y % DISPLAY_HEIGHT;
            for bit in 0..8 {
                let x = origin_x + bit;
                if edges == EdgePolicy::Clip && x >= DISPLAY_WIDTH {
                    break;
                }
                let x = x % DISPLAY_WIDTH;
                let pixel = (byte >> (7 - bit)) & 0x1;
                collision |= (pixel & self.pixels[y][x]) == 0x1;
                self.pixels[y][x] ^= pixel;
            }
        }

        self.dirty = true;
        collision
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}
