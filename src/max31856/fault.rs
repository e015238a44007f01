use bitflags::bitflags;
use static_assertions::assert_eq_size;

bitflags! {
    /// Fault bits, as found in the fault status (0x0F) and fault mask (0x02) registers.
    ///
    /// The driver never interprets these; a set bit in the status register means the condition
    /// is present (or latched, in interrupt mode), a set bit in the mask register keeps it off
    /// the FAULT pin.
    #[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
    pub struct Fault: u8 {
        /// Cold-junction out of range
        const CJ_RANGE = 1 << 7;
        /// Thermocouple out of range
        const TC_RANGE = 1 << 6;
        /// Cold-junction above the high threshold
        const CJ_HIGH = 1 << 5;
        /// Cold-junction below the low threshold
        const CJ_LOW = 1 << 4;
        /// Thermocouple above the high threshold
        const TC_HIGH = 1 << 3;
        /// Thermocouple below the low threshold
        const TC_LOW = 1 << 2;
        /// Input over- or under-voltage
        const OVUV = 1 << 1;
        /// Thermocouple open circuit
        const OPEN = 1 << 0;
    }
}

assert_eq_size!(Fault, u8);

#[cfg(feature = "defmt")]
impl defmt::Format for Fault {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(f, "Fault({=u8:08b})", self.bits());
    }
}
