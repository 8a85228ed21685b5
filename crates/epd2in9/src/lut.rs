//! Waveform lookup tables
//!
//! Each table programs the voltage/timing waveform the controller applies per
//! refresh phase. Both are 30 bytes and are sent verbatim after
//! [`WRITE_LUT`](crate::command::WRITE_LUT).

/// Number of bytes in a waveform table
pub const LUT_SIZE: usize = 30;

/// Full update waveform: complete refresh, no ghosting, slow
#[rustfmt::skip]
pub const LUT_FULL_UPDATE: [u8; LUT_SIZE] = [
    0x50, 0xAA, 0x55, 0xAA, 0x11, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0xFF, 0xFF, 0x1F, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Partial update waveform: faster, leaves ghosting behind
#[rustfmt::skip]
pub const LUT_PARTIAL_UPDATE: [u8; LUT_SIZE] = [
    0x10, 0x18, 0x18, 0x08, 0x18, 0x18,
    0x08, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x13, 0x14, 0x44, 0x12,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Waveform loaded into the LUT register during initialization
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Waveform {
    /// [`LUT_FULL_UPDATE`]
    #[default]
    Full,
    /// [`LUT_PARTIAL_UPDATE`]
    ///
    /// Not verified against hardware.
    Partial,
}

impl Waveform {
    /// The table bytes for this waveform
    pub fn table(self) -> &'static [u8; LUT_SIZE] {
        match self {
            Waveform::Full => &LUT_FULL_UPDATE,
            Waveform::Partial => &LUT_PARTIAL_UPDATE,
        }
    }
}
