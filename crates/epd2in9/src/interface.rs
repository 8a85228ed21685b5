//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`Interface`] struct
//! for talking to the panel controller over a 4-wire SPI link.
//!
//! ## Hardware Requirements
//!
//! The panel requires:
//! - SPI bus (MOSI + SCK), mode 0, around 4 MHz
//! - 4 GPIO pins:
//!   - **CS**: Chip select (output, active low)
//!   - **DC**: Data/Command select (output)
//!   - **RST**: Reset (output, active low)
//!   - **BUSY**: Busy status (input, active high)
//!
//! Chip select is framed by the interface around every single byte, so the
//! SPI peripheral is taken as a bare [`SpiBus`] rather than a `SpiDevice`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use epd2in9::{DisplayInterface, Interface};
//!
//! let mut interface = Interface::new(spi_bus, cs_pin, dc_pin, rst_pin, busy_pin);
//!
//! interface.reset(&mut delay)?;
//! interface.send_command(0x10)?; // Deep sleep
//! interface.send_data(0x01)?;
//! interface.busy_wait(&mut delay, None)?;
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::{MODE_0, Mode, SpiBus};

/// Interval between two reads of the BUSY pin
pub const BUSY_POLL_MS: u32 = 200;

/// Reset pulse train: high, low, high, with the hold time of each level
const RESET_SEQUENCE: [(bool, u32); 3] = [(true, 200), (false, 5), (true, 200)];

/// SPI mode expected by the controller (clock idle low, sample on leading edge)
pub const SPI_MODE: Mode = MODE_0;

/// SPI clock rate used by the Raspberry Pi HAT wiring
pub const SPI_FREQUENCY_HZ: u32 = 4_000_000;

/// Pin assignment of the Raspberry Pi e-Paper HAT (BCM numbering)
pub mod pins {
    /// Reset
    pub const RST: u8 = 17;
    /// Data/Command select
    pub const DC: u8 = 25;
    /// Chip select (CE0)
    pub const CS: u8 = 8;
    /// Busy
    pub const BUSY: u8 = 24;
}

/// Trait for hardware interface to the panel controller
///
/// This trait abstracts over different hardware implementations,
/// allowing the [`Display`](crate::display::Display) to work with any
/// SPI + GPIO implementation, or with a recording fake in tests.
pub trait DisplayInterface {
    /// Error type for interface operations
    type Error: Debug;

    /// Send a command byte to the controller
    ///
    /// The implementation must:
    /// 1. Set DC low (command mode)
    /// 2. Assert CS (drive low)
    /// 3. Send the byte over SPI
    /// 4. Deassert CS (drive high)
    fn send_command(&mut self, command: u8) -> Result<(), Self::Error>;

    /// Send a data byte to the controller
    ///
    /// Same framing as [`send_command`](Self::send_command) with DC high.
    fn send_data(&mut self, data: u8) -> Result<(), Self::Error>;

    /// Perform the hardware reset pulse train
    ///
    /// RST high for 200 ms, low for 5 ms, high for 200 ms. The panel does not
    /// respond reliably with shorter holds.
    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error>;

    /// Wait for the BUSY pin to go low
    ///
    /// Polls BUSY every [`BUSY_POLL_MS`]. With `timeout_ms` set to `None` this
    /// blocks until the controller reports idle, however long that takes.
    ///
    /// # Errors
    ///
    /// Returns [`InterfaceError::Timeout`] once the time spent sleeping between
    /// polls reaches `timeout_ms` while BUSY is still high.
    fn busy_wait<D: DelayNs>(
        &mut self,
        delay: &mut D,
        timeout_ms: Option<u32>,
    ) -> Result<(), Self::Error>;

    /// Drive RST and DC to a safe low level before the pins are released
    fn park(&mut self) -> Result<(), Self::Error>;
}

/// Errors that can occur at the interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
    /// Timeout waiting for busy pin
    Timeout,
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InterfaceError::Spi(e) => write!(f, "SPI error: {e:?}"),
            InterfaceError::Pin(e) => write!(f, "Pin error: {e:?}"),
            InterfaceError::Timeout => write!(f, "Timeout waiting for display"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// Hardware interface implementation
///
/// Implements [`DisplayInterface`] for embedded-hal v1.0 SPI and GPIO traits.
///
/// ## Type Parameters
///
/// * `SPI` - SPI bus implementing [`SpiBus`]
/// * `CS` - Chip select pin implementing [`OutputPin`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
/// * `BUSY` - Busy pin implementing [`InputPin`]
pub struct Interface<SPI, CS, DC, RST, BUSY> {
    /// SPI bus for communication
    spi: SPI,
    /// Chip select pin (active low)
    cs: CS,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: RST,
    /// Busy pin (active high)
    busy: BUSY,
}

impl<SPI, CS, DC, RST, BUSY> Interface<SPI, CS, DC, RST, BUSY>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
{
    /// Create a new Interface
    ///
    /// The interface takes exclusive ownership of the bus and the pins until
    /// [`release`](Self::release) hands them back.
    pub fn new(spi: SPI, cs: CS, dc: DC, rst: RST, busy: BUSY) -> Self {
        Self {
            spi,
            cs,
            dc,
            rst,
            busy,
        }
    }

    /// Give back the bus and the pins
    pub fn release(self) -> (SPI, CS, DC, RST, BUSY) {
        (self.spi, self.cs, self.dc, self.rst, self.busy)
    }
}

impl<SPI, CS, DC, RST, BUSY, PinErr> Interface<SPI, CS, DC, RST, BUSY>
where
    SPI: SpiBus,
    CS: OutputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    BUSY: InputPin<Error = PinErr>,
{
    fn write_framed(&mut self, byte: u8) -> Result<(), InterfaceError<SPI::Error, PinErr>> {
        self.cs.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(&[byte]).map_err(InterfaceError::Spi)?;
        // CS must not rise before the byte has left the shift register
        self.spi.flush().map_err(InterfaceError::Spi)?;
        self.cs.set_high().map_err(InterfaceError::Pin)?;
        Ok(())
    }
}

impl<SPI, CS, DC, RST, BUSY, PinErr> DisplayInterface for Interface<SPI, CS, DC, RST, BUSY>
where
    SPI: SpiBus,
    SPI::Error: Debug,
    CS: OutputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    BUSY: InputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.write_framed(command)
    }

    fn send_data(&mut self, data: u8) -> Result<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.write_framed(data)
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error> {
        for (high, hold_ms) in RESET_SEQUENCE {
            if high {
                self.rst.set_high().map_err(InterfaceError::Pin)?;
            } else {
                self.rst.set_low().map_err(InterfaceError::Pin)?;
            }
            delay.delay_ms(hold_ms);
        }
        Ok(())
    }

    fn busy_wait<D: DelayNs>(
        &mut self,
        delay: &mut D,
        timeout_ms: Option<u32>,
    ) -> Result<(), Self::Error> {
        let mut waited_ms = 0u32;

        loop {
            match self.busy.is_high() {
                Ok(true) => {
                    if let Some(limit) = timeout_ms {
                        if waited_ms >= limit {
                            log::warn!("BUSY still high after {waited_ms} ms");
                            return Err(InterfaceError::Timeout);
                        }
                    }
                    delay.delay_ms(BUSY_POLL_MS);
                    waited_ms = waited_ms.saturating_add(BUSY_POLL_MS);
                }
                Ok(false) => return Ok(()),
                Err(e) => return Err(InterfaceError::Pin(e)),
            }
        }
    }

    fn park(&mut self) -> Result<(), Self::Error> {
        self.rst.set_low().map_err(InterfaceError::Pin)?;
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        Ok(())
    }
}
