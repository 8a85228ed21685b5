//! Driver for the 2.9" 128x296 black/white e-Paper panel
//!
//! The panel is driven over SPI plus four control lines (RST, DC, CS, BUSY),
//! all taken as [embedded-hal] v1.0 traits.
//!
//! ## Architecture
//!
//! - [`Interface`] frames single command/data bytes with DC and CS, pulses
//!   reset and polls BUSY. Anything implementing [`DisplayInterface`] can
//!   stand in for it.
//! - [`Display`] sequences the controller: init and waveform load, RAM
//!   addressing, frame writes, refresh and deep sleep. It tracks a
//!   [`State`] and rejects operations that are invalid in it.
//! - [`Frame`] packs any [`MonoImage`] into the 1bpp RAM layout.
//! - [`Canvas`] (feature `graphics`) is an embedded-graphics draw target to
//!   render into.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use epd2in9::{Builder, Canvas, Display, Interface, Orientation};
//!
//! let interface = Interface::new(spi_bus, cs, dc, rst, busy);
//! let mut display = Display::new(interface, Builder::new().build()?);
//!
//! display.init(&mut delay)?;
//! display.clear(0xFF, &mut delay)?;
//!
//! let mut canvas = Canvas::new(Orientation::Landscape);
//! // draw with embedded-graphics...
//! display.display(&canvas, &mut delay)?;
//!
//! display.sleep(&mut delay)?;
//! let (spi_bus, cs, dc, rst, busy) = display.release().release();
//! ```
//!
//! Refreshes block the calling thread until BUSY drops, by default with no
//! upper bound; see [`Builder::busy_timeout_ms`].
//!
//! [embedded-hal]: https://docs.rs/embedded-hal/1.0.0

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod frame;
#[cfg(feature = "graphics")]
pub mod graphics;
pub mod interface;
pub mod lut;
#[cfg(feature = "image")]
pub mod raster;

/// Panel width in pixels, also the width of controller RAM
pub const WIDTH: u16 = 128;
/// Panel height in pixels (gate lines)
pub const HEIGHT: u16 = 296;
/// Bytes per RAM row
pub const WIDTH_BYTES: usize = WIDTH as usize / 8;
/// Size of a packed frame in bytes
pub const BUFFER_SIZE: usize = WIDTH_BYTES * HEIGHT as usize;

const _: () = assert!(WIDTH % 8 == 0, "RAM is addressed in byte columns");

pub use config::{Builder, Config};
pub use display::{Display, State};
pub use error::{BuilderError, Error, UnsupportedImage};
pub use frame::{Frame, MonoImage, PortraitPolarity};
#[cfg(feature = "graphics")]
pub use graphics::{Canvas, Orientation};
pub use interface::{DisplayInterface, Interface, InterfaceError};
pub use lut::Waveform;
