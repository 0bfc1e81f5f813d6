#![cfg_attr(not(feature = "async"), doc = include_str!("../README.md"))]
#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

mod fmt;

pub mod decode;
pub mod reg;

use core::fmt::{Debug, Display, Formatter};

/// Sea-level reference pressure used when none is given, in pascals.
pub const DEFAULT_SEA_LEVEL_PRESSURE: u32 = 101_326;

#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// I²C bus error
    I2c(E),
    /// The I²C bus could not be opened
    BusOpen(E),
    /// The sea-level reference pressure can't be encoded for the device.
    ///
    /// `BAR_IN` holds the reference in units of 2 Pa in 16 bits, so anything
    /// above 131 071 Pa is refused before any bus traffic rather than being
    /// truncated to its low 16 bits.
    InvalidData,
    /// Chip ID doesn't match the expected value
    UnsupportedChip,
}

impl<E: Debug> Display for Error<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "I2C transaction failed: {:?}", e),
            Error::BusOpen(e) => write!(f, "could not open I2C bus: {:?}", e),
            Error::InvalidData => f.write_str("sea-level pressure out of range for BAR_IN"),
            Error::UnsupportedChip => f.write_str("device is not an MPL3115A2"),
        }
    }
}

pub mod device_impl;

/// Quantity to measure with a one-shot conversion
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Measurement {
    Altitude,
    Pressure,
    Temperature,
}

/// A decoded one-shot conversion
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reading {
    /// Metres relative to the sea-level reference pressure
    Altitude(f32),
    /// Whole pascals
    Pressure(u32),
    /// Degrees Celsius
    Temperature(f32),
}

impl Reading {
    pub fn kind(&self) -> Measurement {
        match self {
            Reading::Altitude(_) => Measurement::Altitude,
            Reading::Pressure(_) => Measurement::Pressure,
            Reading::Temperature(_) => Measurement::Temperature,
        }
    }
}

pub use device_impl::MPL3115A2;
#[cfg(feature = "linux")]
pub use device_impl::DEFAULT_BUS;

#[cfg(all(feature = "blocking", feature = "async"))]
compile_error!("Cannot enable both blocking and async features");
