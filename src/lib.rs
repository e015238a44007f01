//! Blocking driver for the MAX31856 thermocouple-to-digital converter.
//!
//! The chip is reached through a [`spi::Bus`]: either a hardware SPI peripheral
//! ([`spi::HardwareSpi`]) or bit-banged GPIO lines ([`spi::SoftwareSpi`]). The bus kind is fixed
//! when the driver is built.
//!
//! ```ignore
//! let bus = HardwareSpi::new(spi, cs);
//! let mut max = Max31856::new(bus, delay, ThermocoupleType::K);
//! max.begin()?;
//! max.set_averaging_mode(AveragingMode::Samples4)?;
//!
//! let celsius = max.read_thermocouple_temperature()?;
//! let faults = max.read_fault_status()?;
//! ```

#![no_std]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod log;

pub mod delay;
#[cfg(any(test, feature = "fake"))]
pub mod fake;
pub mod max31856;
pub mod spi;
pub mod thermometer;

pub use crate::{
    max31856::{
        AveragingMode, Config, ConversionMode, Fault, FaultMode, Max31856, NoiseFilter,
        OpenCircuitDetection, Register, ThermocoupleType,
    },
    spi::{Bus, HardwareSpi, SoftwareSpi},
    thermometer::{Temperature, Thermometer},
};
