//! In-memory stand-ins for the chip and the delay, for testing code built on this driver.

use core::convert::Infallible;

use embedded_hal::blocking::delay::DelayMs;

use crate::{
    max31856::{Register, CR0_1SHOT, CR0_FAULTCLR, REGISTER_COUNT},
    spi::{Bus, WRITE_BIT},
};

/// Power-on register values
const RESET: [u8; REGISTER_COUNT] = [
    0x00, 0x03, 0xFF, 0x7F, 0xC0, 0x7F, 0xFF, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00,
];

/// A MAX31856 register file behind a [`Bus`].
///
/// Follows the chip's framing: the first byte of a transaction is the address, bit 7 selects a
/// write, and the address auto-increments for every following byte. Writes to read-only
/// registers are ignored. A one-shot request completes instantly, and a fault clear empties
/// the status register.
#[derive(Debug, Clone)]
pub struct FakeChip {
    registers: [u8; REGISTER_COUNT],
    selected: bool,
    pointer: Option<(u8, bool)>,
    transactions: usize,
    conversions: usize,
}

impl FakeChip {
    pub const fn new() -> Self {
        Self {
            registers: RESET,
            selected: false,
            pointer: None,
            transactions: 0,
            conversions: 0,
        }
    }

    pub const fn register(&self, reg: Register) -> u8 {
        self.registers[reg as usize]
    }

    /// Set a register as the chip would, read-only registers included
    pub fn set_register(&mut self, reg: Register, value: u8) {
        self.registers[reg as usize] = value;
    }

    pub const fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.registers
    }

    /// Number of completed chip-select windows
    pub const fn transactions(&self) -> usize {
        self.transactions
    }

    /// Number of one-shot conversions requested
    pub const fn conversions(&self) -> usize {
        self.conversions
    }

    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    fn write(&mut self, reg: Register, mut value: u8) {
        if reg.is_read_only() {
            return;
        }

        if reg == Register::Cr0 {
            if value & CR0_1SHOT != 0 {
                self.conversions += 1;
                value &= !CR0_1SHOT;
            }
            if value & CR0_FAULTCLR != 0 {
                self.registers[Register::Sr as usize] = 0;
                value &= !CR0_FAULTCLR;
            }
        }

        self.registers[reg as usize] = value;
    }
}

impl Default for FakeChip {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for FakeChip {
    type Error = Infallible;

    fn begin(&mut self) -> Result<(), Infallible> {
        self.selected = true;
        self.pointer = None;
        Ok(())
    }

    fn end(&mut self) -> Result<(), Infallible> {
        if self.selected {
            self.transactions += 1;
        }
        self.selected = false;
        self.pointer = None;
        Ok(())
    }

    fn transfer_byte(&mut self, byte: u8) -> Result<u8, Infallible> {
        if !self.selected {
            // Nobody drives the data line
            return Ok(0xFF);
        }

        let Some((addr, write)) = self.pointer else {
            self.pointer = Some((byte & 0x0F, byte & WRITE_BIT != 0));
            return Ok(0x00);
        };

        let reg = Register::from_addr(addr);
        let out = if write {
            self.write(reg, byte);
            0x00
        } else {
            self.registers[reg as usize]
        };
        self.pointer = Some(((addr + 1) & 0x0F, write));

        Ok(out)
    }
}

/// Delay that returns immediately and remembers what was asked of it.
#[derive(Debug, Clone, Default)]
pub struct FakeDelay {
    last: Option<u32>,
    total: u32,
    calls: usize,
}

impl FakeDelay {
    pub const fn new() -> Self {
        Self {
            last: None,
            total: 0,
            calls: 0,
        }
    }

    /// The most recent delay in milliseconds
    pub const fn last(&self) -> Option<u32> {
        self.last
    }

    /// Sum of all delays in milliseconds
    pub const fn total(&self) -> u32 {
        self.total
    }

    pub const fn calls(&self) -> usize {
        self.calls
    }
}

impl DelayMs<u32> for FakeDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.last = Some(ms);
        self.total = self.total.saturating_add(ms);
        self.calls += 1;
    }
}
