//! Register map and bit definitions.

#[cfg(feature = "defmt")]
use defmt::Format;

/// Number of registers in the memory map.
pub const REGISTER_COUNT: usize = 16;

/// Register addresses (read form).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(Format))]
#[repr(u8)]
pub enum Register {
    /// Configuration 0
    Cr0 = 0x00,
    /// Configuration 1
    Cr1 = 0x01,
    /// Fault Mask
    Mask = 0x02,
    /// Cold-Junction High Fault Threshold
    Cjhf = 0x03,
    /// Cold-Junction Low Fault Threshold
    Cjlf = 0x04,
    /// Linearized Temperature High Fault Threshold MSB
    Lthfth = 0x05,
    /// Linearized Temperature High Fault Threshold LSB
    Lthftl = 0x06,
    /// Linearized Temperature Low Fault Threshold MSB
    Ltlfth = 0x07,
    /// Linearized Temperature Low Fault Threshold LSB
    Ltlftl = 0x08,
    /// Cold-Junction Temperature Offset
    Cjto = 0x09,
    /// Cold-Junction Temperature MSB
    Cjth = 0x0A,
    /// Cold-Junction Temperature LSB
    Cjtl = 0x0B,
    /// Linearized TC Temperature, Byte 2
    Ltcbh = 0x0C,
    /// Linearized TC Temperature, Byte 1
    Ltcbm = 0x0D,
    /// Linearized TC Temperature, Byte 0
    Ltcbl = 0x0E,
    /// Fault Status
    Sr = 0x0F,
}

impl Register {
    #[inline]
    pub const fn addr(self) -> u8 {
        self as u8
    }

    /// Registers the host can not write
    pub const fn is_read_only(self) -> bool {
        matches!(
            self,
            Register::Ltcbh | Register::Ltcbm | Register::Ltcbl | Register::Sr
        )
    }

    pub const fn from_addr(addr: u8) -> Self {
        match addr & 0x0F {
            0x00 => Register::Cr0,
            0x01 => Register::Cr1,
            0x02 => Register::Mask,
            0x03 => Register::Cjhf,
            0x04 => Register::Cjlf,
            0x05 => Register::Lthfth,
            0x06 => Register::Lthftl,
            0x07 => Register::Ltlfth,
            0x08 => Register::Ltlftl,
            0x09 => Register::Cjto,
            0x0A => Register::Cjth,
            0x0B => Register::Cjtl,
            0x0C => Register::Ltcbh,
            0x0D => Register::Ltcbm,
            0x0E => Register::Ltcbl,
            _ => Register::Sr,
        }
    }
}

// Configuration 0 Register (0x00)
pub const CR0_AUTOCONVERT: u8 = 1 << 7; // Continuous conversion mode
pub const CR0_1SHOT: u8 = 1 << 6; // One-shot conversion
pub const CR0_OCFAULT_MASK: u8 = 0b11 << 4; // Open-circuit fault detection
pub const CR0_OCFAULT_SHIFT: u8 = 4;
pub const CR0_CJ_DISABLE: u8 = 1 << 3; // Cold-junction sensor disable
pub const CR0_FAULT_INTERRUPT: u8 = 1 << 2; // Fault mode (0 = comparator)
pub const CR0_FAULTCLR: u8 = 1 << 1; // Fault status clear
pub const CR0_FILTER_50HZ: u8 = 1 << 0; // 50Hz rejection (0 = 60Hz)

// Configuration 1 Register (0x01)
pub const CR1_AVGSEL_MASK: u8 = 0b111 << 4;
pub const CR1_AVGSEL_SHIFT: u8 = 4;
pub const CR1_TC_TYPE_MASK: u8 = 0x0F;

// Linearized temperature byte 0, low bits are unused
pub const LTCBL_RESERVED: u8 = 0b1_1111;
