//! Display configuration types and builder

pub use crate::error::BuilderError;
use crate::frame::PortraitPolarity;
use crate::lut::Waveform;

/// Display configuration
///
/// This struct holds the tunable bytes of the initialization sequence plus
/// driver-side policies. Every default reproduces the vendor init sequence
/// exactly; changing the electrical values risks over-driving the panel.
/// Use [`Builder`] to create a Config.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Booster soft-start settings (3 bytes for command 0x0C)
    pub booster_soft_start: [u8; 3],
    /// VCOM register value
    pub vcom: u8,
    /// Dummy line period
    pub dummy_line_period: u8,
    /// Gate line width
    pub gate_time: u8,
    /// Data entry mode byte
    pub data_entry_mode: u8,
    /// Gate scanning direction byte (third byte of driver output control)
    pub scan_direction: u8,
    /// Waveform loaded at initialization
    pub waveform: Waveform,
    /// Upper bound on a single busy wait, `None` waits forever
    pub busy_timeout_ms: Option<u32>,
    /// Pixel test used for portrait images
    pub portrait_polarity: PortraitPolarity,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            booster_soft_start: [0xD7, 0xD6, 0x9D],
            // VCOM 7C
            vcom: 0xA8,
            // 4 dummy lines per gate
            dummy_line_period: 0x1A,
            // 2us per line
            gate_time: 0x08,
            // X increment, Y increment
            data_entry_mode: 0x03,
            // GD = 0, SM = 0, TB = 0
            scan_direction: 0x00,
            waveform: Waveform::Full,
            busy_timeout_ms: None,
            portrait_polarity: PortraitPolarity::Legacy,
        }
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use epd2in9::{Builder, PortraitPolarity};
///
/// let config = Builder::new()
///     .busy_timeout_ms(5_000)
///     .portrait_polarity(PortraitPolarity::Black)
///     .build()
///     .expect("valid configuration");
/// assert_eq!(config.busy_timeout_ms, Some(5_000));
/// ```
#[derive(Default)]
pub struct Builder {
    config: Config,
    timeout: Option<u32>,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set booster soft-start parameters
    pub fn booster_soft_start(mut self, values: [u8; 3]) -> Self {
        self.config.booster_soft_start = values;
        self
    }

    /// Set VCOM value
    pub fn vcom(mut self, value: u8) -> Self {
        self.config.vcom = value;
        self
    }

    /// Set dummy line period
    pub fn dummy_line_period(mut self, value: u8) -> Self {
        self.config.dummy_line_period = value;
        self
    }

    /// Set gate line width
    pub fn gate_time(mut self, value: u8) -> Self {
        self.config.gate_time = value;
        self
    }

    /// Set data entry mode
    pub fn data_entry_mode(mut self, value: u8) -> Self {
        self.config.data_entry_mode = value;
        self
    }

    /// Set gate scanning direction
    pub fn scan_direction(mut self, value: u8) -> Self {
        self.config.scan_direction = value;
        self
    }

    /// Select the waveform written to the LUT register
    pub fn waveform(mut self, waveform: Waveform) -> Self {
        self.config.waveform = waveform;
        self
    }

    /// Bound every busy wait to `ms` milliseconds
    pub fn busy_timeout_ms(mut self, ms: u32) -> Self {
        self.timeout = Some(ms);
        self
    }

    /// Select how portrait images are tested for set pixels
    pub fn portrait_polarity(mut self, polarity: PortraitPolarity) -> Self {
        self.config.portrait_polarity = polarity;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidTimeout` if a zero busy timeout was set
    pub fn build(self) -> Result<Config, BuilderError> {
        let mut config = self.config;
        if let Some(ms) = self.timeout {
            if ms == 0 {
                return Err(BuilderError::InvalidTimeout);
            }
            config.busy_timeout_ms = Some(ms);
        }
        Ok(config)
    }
}
