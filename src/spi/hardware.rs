use embedded_hal::{blocking::spi::Transfer, digital::v2::OutputPin};

use super::{Bus, Error};

/// MAX31856 on a hardware SPI peripheral.
///
/// The peripheral must be configured with [`MODE`](super::MODE) at
/// [`FREQUENCY`](super::FREQUENCY). When several devices share it, pass a bus proxy that
/// serializes access; each transaction only holds the peripheral between `begin` and `end`.
pub struct HardwareSpi<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS> HardwareSpi<SPI, CS> {
    pub const fn new(spi: SPI, cs: CS) -> Self {
        Self { spi, cs }
    }

    /// Release the peripheral and chip select pin
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}

impl<SPI, CS> Bus for HardwareSpi<SPI, CS>
where
    SPI: Transfer<u8>,
    CS: OutputPin,
{
    type Error = Error<SPI::Error, CS::Error>;

    fn begin(&mut self) -> Result<(), Self::Error> {
        self.cs.set_low().map_err(Error::Pin)
    }

    fn end(&mut self) -> Result<(), Self::Error> {
        self.cs.set_high().map_err(Error::Pin)
    }

    fn transfer_byte(&mut self, byte: u8) -> Result<u8, Self::Error> {
        let mut buf = [byte];
        self.spi.transfer(&mut buf).map_err(Error::Spi)?;
        Ok(buf[0])
    }

    fn transfer(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.spi.transfer(words).map_err(Error::Spi)?;
        Ok(())
    }
}
