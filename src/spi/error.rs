#[cfg(feature = "defmt")]
use defmt::Format;

/// Error raised by a [`Bus`](super::Bus) transport.
///
/// The MAX31856 itself never reports bus errors, so the only failures are the ones raised by the
/// SPI peripheral or the GPIO pins driving the bus.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(Format))]
pub enum Error<S, P> {
    /// SPI peripheral error
    Spi(S),

    /// Pin Error, either chip select or one of the bit-banged lines
    Pin(P),
}

impl<S, P> Error<S, P> {
    pub fn as_str(&self) -> &'static str {
        match self {
            Error::Spi(_) => "SPI error",
            Error::Pin(_) => "Pin error",
        }
    }
}
