//! Graphics support via embedded-graphics
//!
//! This module provides the [`Canvas`] struct, an off-screen bitmap that
//! implements the [`DrawTarget`] trait from the embedded-graphics ecosystem
//! and the [`MonoImage`] trait consumed by the packer.
//!
//! [`BinaryColor::On`] is black, [`BinaryColor::Off`] is white.
//!
//! ## Example
//!
//! ```rust,ignore
//! use epd2in9::{Builder, Canvas, Display, Orientation, PortraitPolarity};
//! use embedded_graphics::{
//!     mono_font::{ascii::FONT_6X10, MonoTextStyle},
//!     pixelcolor::BinaryColor,
//!     prelude::*,
//!     text::Text,
//! };
//!
//! let config = Builder::new()
//!     .portrait_polarity(PortraitPolarity::Black)
//!     .build()?;
//! let mut display = Display::new(interface, config);
//! display.init(&mut delay)?;
//!
//! let mut canvas = Canvas::new(Orientation::Portrait);
//! Text::new("2.9inch e-Paper", Point::new(10, 20),
//!     MonoTextStyle::new(&FONT_6X10, BinaryColor::On))
//!     .draw(&mut canvas)?;
//!
//! display.display(&canvas, &mut delay)?;
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::BinaryColor,
    prelude::Pixel,
};

use crate::frame::MonoImage;
use crate::{BUFFER_SIZE, HEIGHT, WIDTH};

/// Canvas orientation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    /// 128 wide, 296 tall, same layout as controller RAM
    #[default]
    Landscape,
    /// 296 wide, 128 tall, rotated into RAM when packed
    ///
    /// Pack with [`PortraitPolarity::Black`](crate::frame::PortraitPolarity::Black)
    /// to keep black drawing black.
    Portrait,
}

impl Orientation {
    /// `(width, height)` in pixels
    pub fn size(self) -> (u32, u32) {
        match self {
            Orientation::Landscape => (WIDTH as u32, HEIGHT as u32),
            Orientation::Portrait => (HEIGHT as u32, WIDTH as u32),
        }
    }
}

/// Off-screen monochrome bitmap
///
/// One bit per pixel, row-major in the canvas' own orientation, a set bit
/// is black. Starts white.
#[derive(Clone)]
pub struct Canvas {
    orientation: Orientation,
    pixels: [u8; BUFFER_SIZE],
}

impl Canvas {
    /// White canvas in the given orientation
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            pixels: [0x00; BUFFER_SIZE],
        }
    }

    /// Orientation chosen at construction
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Set a single pixel, ignoring coordinates outside the canvas
    pub fn set_pixel(&mut self, x: u32, y: u32, color: BinaryColor) {
        let Some((index, mask)) = self.locate(x, y) else {
            return;
        };

        match color {
            BinaryColor::On => self.pixels[index] |= mask,
            BinaryColor::Off => self.pixels[index] &= !mask,
        }
    }

    fn locate(&self, x: u32, y: u32) -> Option<(usize, u8)> {
        let (width, height) = self.orientation.size();
        if x >= width || y >= height {
            return None;
        }
        let bit = y * width + x;
        Some(((bit / 8) as usize, 0x80 >> (bit % 8)))
    }
}

impl MonoImage for Canvas {
    fn size(&self) -> (u32, u32) {
        self.orientation.size()
    }

    fn is_black(&self, x: u32, y: u32) -> bool {
        self.locate(x, y)
            .is_some_and(|(index, mask)| self.pixels[index] & mask != 0)
    }
}

impl DrawTarget for Canvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            if x >= 0 && y >= 0 {
                self.set_pixel(x as u32, y as u32, color);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let fill = if color == BinaryColor::On { 0xFF } else { 0x00 };
        self.pixels.fill(fill);
        Ok(())
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        let (width, height) = self.orientation.size();
        Size::new(width, height)
    }
}
