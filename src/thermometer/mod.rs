//! Temperature sensor interface

mod max31856;

use fixed::types::I25F7;

/// I25F7 is a fixed point number with 7 fractional bits and 25 integer bits.
/// This gives us a precision of 0.0078125 degrees Celsius, the resolution of the linearized
/// thermocouple register.
pub type Temperature = I25F7;

pub trait Thermometer {
    type Error;

    /// Read the temperature in degrees Celsius
    ///
    /// Blocks until the measurement is complete.
    fn read(&mut self) -> Result<Temperature, Self::Error>;
}

/// Fake thermometer for testing
#[cfg(any(test, feature = "fake"))]
pub mod fake {
    use core::convert::Infallible;

    use crate::thermometer::{Temperature, Thermometer};

    /// A fake thermometer that always returns the same temperature
    pub struct FakeThermometer {
        temp: Temperature,
    }

    impl FakeThermometer {
        pub fn new(temp: impl Into<Temperature>) -> Self {
            Self { temp: temp.into() }
        }

        /// Get the current temperature
        pub fn temp(&self) -> Temperature {
            self.temp
        }
        /// Get a mutable reference to the current temperature
        pub fn temp_mut(&mut self) -> &mut Temperature {
            &mut self.temp
        }
    }

    impl Thermometer for FakeThermometer {
        type Error = Infallible;

        fn read(&mut self) -> Result<Temperature, Self::Error> {
            Ok(self.temp)
        }
    }
}
