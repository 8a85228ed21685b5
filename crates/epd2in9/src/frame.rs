//! Packed 1bpp framebuffer
//!
//! The controller RAM holds one bit per pixel, `WIDTH / 8` bytes per row,
//! MSB first. A set bit is white, a cleared bit is black.
//!
//! Two source orientations are accepted by [`Frame::pack`]:
//!
//! - **landscape**: the image is `WIDTH x HEIGHT` (128x296) and maps 1:1 onto RAM
//! - **portrait**: the image is `HEIGHT x WIDTH` (296x128) and is rotated 90
//!   degrees into RAM, source `(x, y)` landing on RAM `(y, HEIGHT - 1 - x)`
//!
//! Anything else is rejected with [`UnsupportedImage`].

use crate::error::UnsupportedImage;
use crate::{BUFFER_SIZE, HEIGHT, WIDTH, WIDTH_BYTES};

/// Read access to a rendered monochrome bitmap
///
/// Implementers own the black/white decision (thresholding, dithering, ...).
pub trait MonoImage {
    /// `(width, height)` in pixels
    fn size(&self) -> (u32, u32);

    /// Whether the pixel at `(x, y)` is black
    ///
    /// Only called with `x < width` and `y < height`.
    fn is_black(&self, x: u32, y: u32) -> bool;
}

impl<T: MonoImage + ?Sized> MonoImage for &T {
    fn size(&self) -> (u32, u32) {
        (**self).size()
    }

    fn is_black(&self, x: u32, y: u32) -> bool {
        (**self).is_black(x, y)
    }
}

/// Which portrait pixels clear a bit in the packed frame
///
/// The vendor packer tests portrait pixels for "not black" while landscape
/// pixels are tested for "black". On a canvas whose background is the
/// zero pixel this draws the foreground, on an opaque white canvas it
/// produces a negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PortraitPolarity {
    /// Clear bits for non-black portrait pixels, as the vendor packer does
    #[default]
    Legacy,
    /// Clear bits for black portrait pixels, same as landscape
    Black,
}

/// Packed frame in controller RAM layout
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    buffer: [u8; BUFFER_SIZE],
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame {
    /// All-white frame
    pub const fn new() -> Self {
        Self::filled(0xFF)
    }

    /// Frame with every byte set to `byte`
    pub const fn filled(byte: u8) -> Self {
        Self {
            buffer: [byte; BUFFER_SIZE],
        }
    }

    /// Wrap raw bytes already in RAM layout
    pub const fn from_bytes(buffer: [u8; BUFFER_SIZE]) -> Self {
        Self { buffer }
    }

    /// Pack a rendered image
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedImage`] unless the image is `WIDTH x HEIGHT` or
    /// `HEIGHT x WIDTH`.
    pub fn pack<M>(image: &M, polarity: PortraitPolarity) -> Result<Self, UnsupportedImage>
    where
        M: MonoImage + ?Sized,
    {
        let (width, height) = image.size();
        let panel_w = WIDTH as u32;
        let panel_h = HEIGHT as u32;
        let mut frame = Self::new();

        if (width, height) == (panel_w, panel_h) {
            for y in 0..height {
                for x in 0..width {
                    if image.is_black(x, y) {
                        frame.clear_bit(x, y);
                    }
                }
            }
        } else if (width, height) == (panel_h, panel_w) {
            for y in 0..height {
                for x in 0..width {
                    let set = match polarity {
                        PortraitPolarity::Legacy => !image.is_black(x, y),
                        PortraitPolarity::Black => image.is_black(x, y),
                    };
                    if set {
                        frame.clear_bit(y, panel_h - x - 1);
                    }
                }
            }
        } else {
            log::debug!("rejecting {width}x{height} image");
            return Err(UnsupportedImage { width, height });
        }

        Ok(frame)
    }

    /// Packed bytes, row after row
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Packed bytes of row `y`
    ///
    /// # Panics
    ///
    /// Panics if `y >= HEIGHT`.
    pub fn row(&self, y: usize) -> &[u8] {
        &self.buffer[y * WIDTH_BYTES..(y + 1) * WIDTH_BYTES]
    }

    /// Number of black pixels in the frame
    pub fn black_pixels(&self) -> u32 {
        self.buffer.iter().map(|b| b.count_zeros()).sum()
    }

    fn clear_bit(&mut self, x: u32, y: u32) {
        let (index, mask) = locate(x, y);
        self.buffer[index] &= !mask;
    }
}

impl MonoImage for Frame {
    fn size(&self) -> (u32, u32) {
        (WIDTH as u32, HEIGHT as u32)
    }

    fn is_black(&self, x: u32, y: u32) -> bool {
        let (index, mask) = locate(x, y);
        self.buffer[index] & mask == 0
    }
}

/// Byte index and bit mask of RAM pixel `(x, y)`
fn locate(x: u32, y: u32) -> (usize, u8) {
    let index = (x + y * WIDTH as u32) / 8;
    (index as usize, 0x80 >> (x % 8))
}
