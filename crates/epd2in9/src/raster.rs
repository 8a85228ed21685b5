//! [`MonoImage`] for bitmaps from the `image` crate
//!
//! A pixel is black when its luma is below [`LUMA_THRESHOLD`]; transparency
//! is ignored.

use ::image::{DynamicImage, GenericImageView, GrayImage, Pixel};

use crate::frame::MonoImage;

/// Luma values below this are black
pub const LUMA_THRESHOLD: u8 = 128;

impl MonoImage for GrayImage {
    fn size(&self) -> (u32, u32) {
        self.dimensions()
    }

    fn is_black(&self, x: u32, y: u32) -> bool {
        self.get_pixel(x, y).0[0] < LUMA_THRESHOLD
    }
}

impl MonoImage for DynamicImage {
    fn size(&self) -> (u32, u32) {
        self.dimensions()
    }

    fn is_black(&self, x: u32, y: u32) -> bool {
        self.get_pixel(x, y).to_luma().0[0] < LUMA_THRESHOLD
    }
}
