//! MPL3115A2 register map and control bits.

/// Fixed 7-bit I²C address of the MPL3115A2.
pub const DEVICE_ADDRESS: u8 = 0x60;

/// Pressure output, 3 bytes (`OUT_P_MSB`, `OUT_P_CSB`, `OUT_P_LSB`).
pub const PRESSURE_DATA: u8 = 0x01;
/// Altitude output. Same registers as pressure, selected by [`CTRL_REG1_ALT`].
pub const ALTITUDE_DATA: u8 = 0x01;
/// Temperature output, 2 bytes (`OUT_T_MSB`, `OUT_T_LSB`).
pub const TEMPERATURE_DATA: u8 = 0x04;
/// Device identification register.
pub const WHO_AM_I: u8 = 0x0C;
/// Barometric input for altitude calculation, 2 bytes, big-endian, 2 Pa per LSB.
pub const BAR_IN_MSB: u8 = 0x14;
pub const CTRL_REG1: u8 = 0x26;
/// Not touched by the driver.
pub const CTRL_REG2: u8 = 0x27;

/// One-shot trigger.
pub const CTRL_REG1_OST: u8 = 0x02;
/// Altimeter mode. Pressure mode when clear.
pub const CTRL_REG1_ALT: u8 = 0x80;

/// Value of [`WHO_AM_I`] on a genuine part.
pub const DEVICE_ID: u8 = 0xC4;
