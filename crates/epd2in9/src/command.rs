// Controller command definitions

// Initialization
pub const DRIVER_OUTPUT_CONTROL: u8 = 0x01; // Driver output control
pub const BOOSTER_SOFT_START: u8 = 0x0C; // Booster soft-start control
pub const WRITE_VCOM: u8 = 0x2C; // Write VCOM register
pub const SET_DUMMY_LINE_PERIOD: u8 = 0x3A; // Set dummy line period
pub const SET_GATE_TIME: u8 = 0x3B; // Set gate line width
pub const DATA_ENTRY_MODE: u8 = 0x11; // Data entry mode
pub const WRITE_LUT: u8 = 0x32; // Write LUT register

// RAM addressing
pub const SET_RAM_X_RANGE: u8 = 0x44; // Set RAM X address start/end (byte columns)
pub const SET_RAM_Y_RANGE: u8 = 0x45; // Set RAM Y address start/end (rows)
pub const SET_RAM_X_COUNTER: u8 = 0x4E; // Set RAM X address counter
pub const SET_RAM_Y_COUNTER: u8 = 0x4F; // Set RAM Y address counter
pub const WRITE_RAM: u8 = 0x24; // Write RAM

// Display update and refresh
pub const DISPLAY_UPDATE_CTRL2: u8 = 0x22; // Display update control 2
pub const MASTER_ACTIVATION: u8 = 0x20; // Master activation
pub const TERMINATE_FRAME_READ_WRITE: u8 = 0xFF; // Terminate frame read/write (NOP)

// Enable clock and analog, display, then disable analog and clock
pub const UPDATE_SEQUENCE_FULL: u8 = 0xC4;

// Power management
pub const DEEP_SLEEP: u8 = 0x10; // Deep sleep mode
pub const DEEP_SLEEP_ENTER: u8 = 0x01; // Deep sleep mode 1, RAM retained
