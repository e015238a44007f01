//! SPI transport for the MAX31856 register map.
//!
//! Every register access is a single chip-select window: one address byte, then the payload.
//! Bit 7 of the address byte selects a write; reads clock out [`DUMMY`] bytes while capturing the
//! chip's response. Register addresses auto-increment inside a window, so burst reads and writes
//! cover consecutive registers.

mod error;
mod hardware;
mod software;

use embedded_hal::spi::{Mode, MODE_3};
use fugit::HertzU32;

pub use self::{error::*, hardware::HardwareSpi, software::SoftwareSpi};

/// SPI mode of the MAX31856: clock idles high, data sampled on the rising edge.
pub const MODE: Mode = MODE_3;

/// Nominal bus clock.
pub const FREQUENCY: HertzU32 = HertzU32::kHz(500);

/// Address bit selecting a register write.
pub const WRITE_BIT: u8 = 0x80;

/// Byte clocked out while reading.
pub const DUMMY: u8 = 0xFF;

/// A byte-oriented SPI transport with an explicit transaction window.
///
/// Implementors only provide the window (`begin`/`end`) and the single byte exchange; register
/// framing is provided on top of that.
pub trait Bus {
    type Error;

    /// Put the bus in its idle state with the chip deselected.
    fn init(&mut self) -> Result<(), Self::Error> {
        self.end()
    }

    /// Open a transaction: select the chip.
    fn begin(&mut self) -> Result<(), Self::Error>;

    /// Close a transaction: deselect the chip.
    fn end(&mut self) -> Result<(), Self::Error>;

    /// Exchange a single byte, returning the byte shifted in.
    fn transfer_byte(&mut self, byte: u8) -> Result<u8, Self::Error>;

    /// Exchange `words` in place.
    fn transfer(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        for word in words {
            *word = self.transfer_byte(*word)?;
        }
        Ok(())
    }

    /// Read a single register
    fn read_register(&mut self, address: u8) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.read_registers(address, &mut buf)?;
        Ok(buf[0])
    }

    /// Read `buf.len()` consecutive registers starting at `address`
    fn read_registers(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        transaction(self, |bus| {
            bus.transfer_byte(address & !WRITE_BIT)?;
            buf.fill(DUMMY);
            bus.transfer(buf)
        })
    }

    /// Write a single register
    fn write_register(&mut self, address: u8, value: u8) -> Result<(), Self::Error> {
        self.write_registers(address, &[value])
    }

    /// Write `data` to consecutive registers starting at `address`
    fn write_registers(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        transaction(self, |bus| {
            bus.transfer_byte(address | WRITE_BIT)?;
            for &byte in data {
                bus.transfer_byte(byte)?;
            }
            Ok(())
        })
    }
}

/// Run `f` inside a chip-select window.
///
/// The window is always closed, even when opening it or `f` failed. The first error wins.
fn transaction<B, T>(
    bus: &mut B,
    f: impl FnOnce(&mut B) -> Result<T, B::Error>,
) -> Result<T, B::Error>
where
    B: Bus + ?Sized,
{
    let result = bus.begin().and_then(|()| f(bus));
    let released = bus.end();
    let value = result?;
    released?;
    Ok(value)
}
