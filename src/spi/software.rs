use core::convert::Infallible;

use embedded_hal::digital::v2::{InputPin, OutputPin};

use super::{Bus, Error};

/// MAX31856 on bit-banged GPIO lines.
///
/// The clock idles high. For each bit the data-out line is driven on the falling edge and the
/// data-in line is sampled after the rising edge. Bits leave least significant first and are
/// shifted in from the top, so a data-out to data-in loopback returns the byte sent.
pub struct SoftwareSpi<CS, SCK, MOSI, MISO> {
    cs: CS,
    sck: SCK,
    mosi: MOSI,
    miso: MISO,
}

impl<CS, SCK, MOSI, MISO> SoftwareSpi<CS, SCK, MOSI, MISO> {
    pub const fn new(cs: CS, sck: SCK, mosi: MOSI, miso: MISO) -> Self {
        Self {
            cs,
            sck,
            mosi,
            miso,
        }
    }

    /// Release the pins
    pub fn release(self) -> (CS, SCK, MOSI, MISO) {
        (self.cs, self.sck, self.mosi, self.miso)
    }
}

impl<CS, SCK, MOSI, MISO, E> Bus for SoftwareSpi<CS, SCK, MOSI, MISO>
where
    CS: OutputPin<Error = E>,
    SCK: OutputPin<Error = E>,
    MOSI: OutputPin<Error = E>,
    MISO: InputPin<Error = E>,
{
    type Error = Error<Infallible, E>;

    fn init(&mut self) -> Result<(), Self::Error> {
        self.cs.set_high().map_err(Error::Pin)?;
        self.sck.set_high().map_err(Error::Pin)
    }

    fn begin(&mut self) -> Result<(), Self::Error> {
        self.sck.set_high().map_err(Error::Pin)?;
        self.cs.set_low().map_err(Error::Pin)
    }

    fn end(&mut self) -> Result<(), Self::Error> {
        self.cs.set_high().map_err(Error::Pin)
    }

    fn transfer_byte(&mut self, byte: u8) -> Result<u8, Self::Error> {
        let mut out = 0u8;
        for bit in 0..8 {
            self.sck.set_low().map_err(Error::Pin)?;
            if byte & (1 << bit) == 0 {
                self.mosi.set_low().map_err(Error::Pin)?;
            } else {
                self.mosi.set_high().map_err(Error::Pin)?;
            }
            self.sck.set_high().map_err(Error::Pin)?;

            let sample = self.miso.is_high().map_err(Error::Pin)?;
            out >>= 1;
            out |= u8::from(sample) << 7;
        }
        Ok(out)
    }
}
