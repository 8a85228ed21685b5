//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`]),
//! framebuffer packing ([`UnsupportedImage`]) and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`UnsupportedImage`] - Image dimensions match neither panel orientation
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level hardware communication errors
//!
//! Hardware errors are never retried by the driver. After any error the caller
//! decides whether to run [`Display::init`](crate::display::Display::init) again.
//!
//! ## Example
//!
//! ```
//! use epd2in9::{Builder, BuilderError};
//!
//! let result = Builder::new().busy_timeout_ms(0).build();
//! assert!(matches!(result, Err(BuilderError::InvalidTimeout)));
//! ```

use crate::display::State;
use crate::interface::DisplayInterface;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/GPIO, or busy timeout)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    Interface(I::Error),
    /// Operation is not valid in the current lifecycle state
    InvalidState {
        /// Name of the rejected operation
        operation: &'static str,
        /// State the driver was in
        state: State,
    },
    /// Addressing window outside the panel or with end before start
    InvalidWindow {
        /// First pixel column
        x_start: u16,
        /// First row
        y_start: u16,
        /// Last pixel column
        x_end: u16,
        /// Last row
        y_end: u16,
    },
    /// RAM cursor outside the panel
    InvalidCursor {
        /// Pixel column
        x: u16,
        /// Row
        y: u16,
    },
    /// Image could not be packed
    UnsupportedImage(UnsupportedImage),
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Interface(_) => write!(f, "Interface error"),
            Error::InvalidState { operation, state } => {
                write!(f, "Cannot {operation} while {state:?}")
            }
            Error::InvalidWindow {
                x_start,
                y_start,
                x_end,
                y_end,
            } => write!(
                f,
                "Invalid window ({x_start}, {y_start})..=({x_end}, {y_end})"
            ),
            Error::InvalidCursor { x, y } => write!(f, "Invalid cursor ({x}, {y})"),
            Error::UnsupportedImage(e) => write!(f, "{e}"),
        }
    }
}

// Manual impl so that `I` itself does not need to be `Debug`
impl<I: DisplayInterface> core::fmt::Debug for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Interface(e) => f.debug_tuple("Interface").field(e).finish(),
            Error::InvalidState { operation, state } => f
                .debug_struct("InvalidState")
                .field("operation", operation)
                .field("state", state)
                .finish(),
            Error::InvalidWindow {
                x_start,
                y_start,
                x_end,
                y_end,
            } => f
                .debug_struct("InvalidWindow")
                .field("x_start", x_start)
                .field("y_start", y_start)
                .field("x_end", x_end)
                .field("y_end", y_end)
                .finish(),
            Error::InvalidCursor { x, y } => f
                .debug_struct("InvalidCursor")
                .field("x", x)
                .field("y", y)
                .finish(),
            Error::UnsupportedImage(e) => f.debug_tuple("UnsupportedImage").field(e).finish(),
        }
    }
}

impl<I: DisplayInterface> core::error::Error for Error<I> {}

impl<I: DisplayInterface> From<UnsupportedImage> for Error<I> {
    fn from(e: UnsupportedImage) -> Self {
        Error::UnsupportedImage(e)
    }
}

/// Image dimensions match neither `WIDTH x HEIGHT` nor `HEIGHT x WIDTH`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnsupportedImage {
    /// Width of the rejected image
    pub width: u32,
    /// Height of the rejected image
    pub height: u32,
}

impl core::fmt::Display for UnsupportedImage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Unsupported image size {}x{} (expected {}x{} or {}x{})",
            self.width,
            self.height,
            crate::WIDTH,
            crate::HEIGHT,
            crate::HEIGHT,
            crate::WIDTH
        )
    }
}

impl core::error::Error for UnsupportedImage {}

/// Errors that can occur when building configuration
#[derive(Debug)]
pub enum BuilderError {
    /// Busy timeout of zero milliseconds
    ///
    /// Leave the timeout unset to wait indefinitely.
    InvalidTimeout,
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BuilderError::InvalidTimeout => write!(f, "Busy timeout must be at least 1 ms"),
        }
    }
}

impl core::error::Error for BuilderError {}
