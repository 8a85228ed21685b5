//! Core display operations

use embedded_hal::delay::DelayNs;

use crate::command::*;
use crate::config::Config;
use crate::error::Error;
use crate::frame::{Frame, MonoImage};
use crate::interface::DisplayInterface;
use crate::{HEIGHT, WIDTH, WIDTH_BYTES};

/// Time the panel needs after entering deep sleep before its pins may be released
const SLEEP_SETTLE_MS: u32 = 2000;

/// Lifecycle of the controller as seen by the driver
///
/// ```text
/// Uninitialized -> Reset -> WaveformLoaded -> Ready <-> Busy
///                                             Ready  -> Sleeping
/// ```
///
/// `init` may be run again from any state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Constructed, nothing sent yet
    Uninitialized,
    /// Reset pulse done
    Reset,
    /// Init sequence and LUT written
    WaveformLoaded,
    /// Accepting frames
    Ready,
    /// Waiting for the controller, or a wait failed
    Busy,
    /// Deep sleep entered
    Sleeping,
}

/// Core display driver
///
/// Owns the hardware interface for its whole lifetime. Call
/// [`init`](Self::init), then [`clear`](Self::clear) and
/// [`display`](Self::display) as often as needed, then
/// [`sleep`](Self::sleep) and finally [`release`](Self::release).
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Lifecycle state
    state: State,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            config,
            state: State::Uninitialized,
        }
    }

    /// Perform hardware reset and load the init sequence and waveform
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<I>> {
        log::debug!("init from {:?}", self.state);
        // A cut-short reset leaves the controller in an unknown state
        self.transition(State::Uninitialized);
        self.interface.reset(delay).map_err(Error::Interface)?;
        self.transition(State::Reset);

        // Driver output control
        let last_row = HEIGHT - 1;
        self.send_command(DRIVER_OUTPUT_CONTROL)?;
        self.send_data(&[
            (last_row & 0xFF) as u8,
            (last_row >> 8) as u8,
            self.config.scan_direction,
        ])?;

        self.send_command(BOOSTER_SOFT_START)?;
        let booster_data = self.config.booster_soft_start;
        self.send_data(&booster_data)?;

        self.send_command(WRITE_VCOM)?;
        self.send_data(&[self.config.vcom])?;

        self.send_command(SET_DUMMY_LINE_PERIOD)?;
        self.send_data(&[self.config.dummy_line_period])?;

        self.send_command(SET_GATE_TIME)?;
        self.send_data(&[self.config.gate_time])?;

        self.send_command(DATA_ENTRY_MODE)?;
        self.send_data(&[self.config.data_entry_mode])?;

        self.send_command(WRITE_LUT)?;
        self.send_data(self.config.waveform.table())?;
        self.transition(State::WaveformLoaded);

        self.transition(State::Ready);
        Ok(())
    }

    /// Bound subsequent RAM writes to a rectangle
    ///
    /// `x_start` and `x_end` are pixel columns; the controller only keeps the
    /// byte column, so the low 3 bits are ignored.
    pub fn set_window(
        &mut self,
        x_start: u16,
        y_start: u16,
        x_end: u16,
        y_end: u16,
    ) -> Result<(), Error<I>> {
        self.require_ready("set window")?;
        if x_end < x_start || y_end < y_start || x_end >= WIDTH || y_end >= HEIGHT {
            return Err(Error::InvalidWindow {
                x_start,
                y_start,
                x_end,
                y_end,
            });
        }

        self.send_command(SET_RAM_X_RANGE)?;
        self.send_data(&[((x_start >> 3) & 0xFF) as u8, ((x_end >> 3) & 0xFF) as u8])?;

        self.send_command(SET_RAM_Y_RANGE)?;
        self.send_data(&[
            (y_start & 0xFF) as u8,
            (y_start >> 8) as u8,
            (y_end & 0xFF) as u8,
            (y_end >> 8) as u8,
        ])?;

        Ok(())
    }

    /// Move the RAM write position, then wait for the controller
    pub fn set_cursor<D: DelayNs>(
        &mut self,
        x: u16,
        y: u16,
        delay: &mut D,
    ) -> Result<(), Error<I>> {
        self.require_ready("set cursor")?;
        if x >= WIDTH || y >= HEIGHT {
            return Err(Error::InvalidCursor { x, y });
        }

        self.send_command(SET_RAM_X_COUNTER)?;
        self.send_data(&[((x >> 3) & 0xFF) as u8])?;

        self.send_command(SET_RAM_Y_COUNTER)?;
        self.send_data(&[(y & 0xFF) as u8, (y >> 8) as u8])?;

        self.wait_idle(delay)
    }

    /// Refresh the panel from controller RAM
    ///
    /// This is the only operation that changes what the panel shows. Blocks
    /// for the whole refresh.
    pub fn turn_on_display<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<I>> {
        self.require_ready("turn on display")?;
        log::debug!("refreshing panel");

        self.send_command(DISPLAY_UPDATE_CTRL2)?;
        self.send_data(&[UPDATE_SEQUENCE_FULL])?;
        self.send_command(MASTER_ACTIVATION)?;
        self.send_command(TERMINATE_FRAME_READ_WRITE)?;

        self.wait_idle(delay)
    }

    /// Write a packed frame to RAM and refresh
    pub fn write_frame<D: DelayNs>(
        &mut self,
        frame: &Frame,
        delay: &mut D,
    ) -> Result<(), Error<I>> {
        self.require_ready("write frame")?;
        log::debug!("writing frame ({} black pixels)", frame.black_pixels());

        self.write_rows(delay, move |y| frame.row(y))?;
        self.turn_on_display(delay)
    }

    /// Pack a rendered image and show it
    ///
    /// Portrait images are packed with the configured
    /// [`PortraitPolarity`](crate::frame::PortraitPolarity).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedImage`] before touching the panel if the
    /// image matches neither orientation.
    pub fn display<M, D>(&mut self, image: &M, delay: &mut D) -> Result<(), Error<I>>
    where
        M: MonoImage + ?Sized,
        D: DelayNs,
    {
        self.require_ready("display")?;
        let frame = Frame::pack(image, self.config.portrait_polarity)?;
        self.write_frame(&frame, delay)
    }

    /// Fill RAM with `color` and refresh
    ///
    /// `0xFF` is all white, `0x00` all black.
    pub fn clear<D: DelayNs>(&mut self, color: u8, delay: &mut D) -> Result<(), Error<I>> {
        self.require_ready("clear")?;
        log::debug!("clearing with {color:#04x}");

        let row = [color; WIDTH_BYTES];
        self.write_rows(delay, |_| &row)?;
        self.turn_on_display(delay)
    }

    /// Enter deep sleep
    ///
    /// No command is valid afterwards until [`init`](Self::init) runs again.
    pub fn sleep<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<I>> {
        self.require_ready("sleep")?;

        self.send_command(DEEP_SLEEP)?;
        self.send_data(&[DEEP_SLEEP_ENTER])?;
        delay.delay_ms(SLEEP_SETTLE_MS);

        self.transition(State::Sleeping);
        Ok(())
    }

    /// Park RST and DC low and give back the interface
    ///
    /// Runs on every exit path, including after errors. A failure to park the
    /// pins is logged, the interface is returned regardless.
    pub fn release(mut self) -> I {
        if self.state != State::Sleeping {
            log::warn!("releasing display while {:?}", self.state);
        }
        if let Err(e) = self.interface.park() {
            log::warn!("failed to park control pins: {e:?}");
        }
        self.interface
    }

    /// Current lifecycle state
    pub fn state(&self) -> State {
        self.state
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Full-panel window, then one cursor move and RAM write per row
    fn write_rows<'a, D, F>(&mut self, delay: &mut D, mut row: F) -> Result<(), Error<I>>
    where
        D: DelayNs,
        F: FnMut(usize) -> &'a [u8],
    {
        self.set_window(0, 0, WIDTH - 1, HEIGHT - 1)?;
        for y in 0..HEIGHT {
            log::trace!("writing row {y}");
            self.set_cursor(0, y, delay)?;
            self.send_command(WRITE_RAM)?;
            self.send_data(row(y as usize))?;
        }
        Ok(())
    }

    /// Leaves the driver `Busy` if the wait fails
    fn wait_idle<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<I>> {
        self.state = State::Busy;
        self.interface
            .busy_wait(delay, self.config.busy_timeout_ms)
            .map_err(Error::Interface)?;
        self.state = State::Ready;
        Ok(())
    }

    fn require_ready(&self, operation: &'static str) -> Result<(), Error<I>> {
        if self.state == State::Ready {
            Ok(())
        } else {
            Err(Error::InvalidState {
                operation,
                state: self.state,
            })
        }
    }

    fn transition(&mut self, state: State) {
        if self.state != state {
            log::debug!("{:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }

    /// Send a command to the display controller
    fn send_command(&mut self, cmd: u8) -> Result<(), Error<I>> {
        self.interface.send_command(cmd).map_err(Error::Interface)
    }

    /// Send data to the display controller, one framed byte at a time
    fn send_data(&mut self, data: &[u8]) -> Result<(), Error<I>> {
        for &byte in data {
            self.interface.send_data(byte).map_err(Error::Interface)?;
        }
        Ok(())
    }
}
