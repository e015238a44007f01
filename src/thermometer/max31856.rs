use embedded_hal::blocking::delay::DelayMs;

use crate::{
    max31856::Max31856,
    spi::Bus,
    thermometer::{Temperature, Thermometer},
};

impl<B: Bus, D: DelayMs<u32>> Thermometer for Max31856<B, D> {
    type Error = B::Error;

    fn read(&mut self) -> Result<Temperature, Self::Error> {
        self.read_thermocouple()
    }
}
