use anyhow::{anyhow, Context, Result};
use sdl2::pixels::PixelFormatEnum;

use chip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8_core::Frame;

/// Bytes per pixel in an RGB24 texture.
const BYTES_PER_PIXEL: usize = 3;

/// # Display
/// The Chip-8 display is composed of 64x32 pixels black/white pixels.
/// The on/off state of these pixels is encoded as 1/0 respectively in a 2d array of 64x32 bits.
/// The display only gets a call to `render` when the Chip-8 frame is dirty.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `title` the window title
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, title: &str, scale: u32) -> Result<Self> {
        let video_subsystem = sdl.video().map_err(|e| anyhow!(e))?;
        let window = video_subsystem
            .window(
                title,
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()
            .context("creating window")?;
        let canvas = window
            .into_canvas()
            .build()
            .context("creating canvas")?;

        let mut display = Display { canvas };
        display.render(&[[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT])?;
        Ok(display)
    }

    /// Writes a Chip-8 frame into the rows of an SDL2 RGB24 texture.
    ///
    /// Every pixel is triplicated into its RGB values and scaled from 0/1 to 0/255.
    /// Rows in the texture are `pitch` bytes apart, which may be more than the row itself.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 frame
    /// * `buffer` the locked texture
    /// * `pitch` the length of one texture row in bytes
    fn frame_to_sdl_texture(frame: &Frame, buffer: &mut [u8], pitch: usize) {
        for (row, pixels) in buffer.chunks_mut(pitch).zip(frame.iter()) {
            for (rgb, pixel) in row.chunks_mut(BYTES_PER_PIXEL).zip(pixels.iter()) {
                rgb.fill(pixel * 255);
            }
        }
    }

    /// Formats the Chip-8 frame as an SDL2 RGB24 texture and renders it.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 frame
    pub fn render(&mut self, frame: &Frame) -> Result<()> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .context("creating texture")?;

        texture
            .with_lock(None, |buffer: &mut [u8], pitch: usize| {
                Display::frame_to_sdl_texture(frame, buffer, pitch);
            })
            .map_err(|e| anyhow!(e))?;

        self.canvas.copy(&texture, None, None).map_err(|e| anyhow!(e))?;
        self.canvas.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PITCH: usize = DISPLAY_WIDTH * BYTES_PER_PIXEL;

    #[test]
    fn test_frame_to_sdl_texture() {
        let mut frame: Frame = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        frame[0][0..2].copy_from_slice(&[0, 1]);
        frame[1][0..2].copy_from_slice(&[1, 0]);
        let mut texture = vec![0x7F; PITCH * DISPLAY_HEIGHT];
        Display::frame_to_sdl_texture(&frame, &mut texture, PITCH);

        let mut expected: Vec<u8> = vec![0; 6144];
        expected[0..6].copy_from_slice(&[0, 0, 0, 255, 255, 255]);
        expected[192..198].copy_from_slice(&[255, 255, 255, 0, 0, 0]);

        assert_eq!(texture, expected);
    }

    #[test]
    fn test_frame_to_padded_texture() {
        let mut frame: Frame = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        frame[1][0] = 1;
        let pitch = PITCH + 8;
        let mut texture = vec![0; pitch * DISPLAY_HEIGHT];
        Display::frame_to_sdl_texture(&frame, &mut texture, pitch);

        assert_eq!(texture[pitch..pitch + 3], [255, 255, 255]);
        assert_eq!(texture.iter().filter(|&&b| b == 255).count(), 3);
    }
}
