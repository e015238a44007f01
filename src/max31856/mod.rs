//! Driver for the MAX31856 thermocouple-to-digital converter.
//!
//! Conversions are single-shot: [`Max31856::trigger_conversion`] requests one, then blocks for
//! the datasheet conversion time before the result registers are read. No state is cached on
//! the host side, every getter reads the chip.

mod config;
mod fault;
mod registers;
mod temperature;

use embedded_hal::blocking::delay::DelayMs;

pub use self::{config::*, fault::Fault, registers::*, temperature::*};
use crate::{
    log::{debug, trace},
    spi::Bus,
};

pub struct Max31856<B, D> {
    bus: B,
    delay: D,
    thermocouple: ThermocoupleType,
}

impl<B, D> Max31856<B, D> {
    /// Create a driver. `thermocouple` is written to the chip by [`Max31856::begin`].
    #[inline]
    pub const fn new(bus: B, delay: D, thermocouple: ThermocoupleType) -> Self {
        Self {
            bus,
            delay,
            thermocouple,
        }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Release the bus and the delay
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }
}

impl<B: Bus, D> Max31856<B, D> {
    fn read_reg(&mut self, reg: Register) -> Result<u8, B::Error> {
        self.bus.read_register(reg.addr())
    }

    fn write_reg(&mut self, reg: Register, value: u8) -> Result<(), B::Error> {
        self.bus.write_register(reg.addr(), value)
    }

    /// Read-modify-write of the bits of `reg` selected by `mask`
    fn modify(&mut self, reg: Register, mask: u8, value: u8) -> Result<(), B::Error> {
        let current = self.read_reg(reg)?;
        self.write_reg(reg, (current & !mask) | (value & mask))
    }

    /// Idle the bus and write the default thermocouple type
    pub fn begin(&mut self) -> Result<(), B::Error> {
        self.bus.init()?;
        self.set_thermocouple_type(self.thermocouple)
    }

    /// Write a complete configuration.
    ///
    /// Replaces the default thermocouple type with the configured one.
    pub fn configure(&mut self, config: &Config) -> Result<(), B::Error> {
        debug!("configure: cr0={=u8:#x} cr1={=u8:#x}", config.cr0(), config.cr1());

        self.bus
            .write_registers(Register::Cr0.addr(), &[config.cr0(), config.cr1()])?;
        self.set_fault_mask(config.fault_mask)?;
        self.thermocouple = config.thermocouple;
        Ok(())
    }

    /// Sets the thermocouple type, leaving the averaging mode untouched
    pub fn set_thermocouple_type(&mut self, tc: ThermocoupleType) -> Result<(), B::Error> {
        self.modify(Register::Cr1, CR1_TC_TYPE_MASK, tc.bits())
    }

    pub fn thermocouple_type(&mut self) -> Result<ThermocoupleType, B::Error> {
        Ok(ThermocoupleType::from_bits(self.read_reg(Register::Cr1)?))
    }

    /// Sets the averaging mode, leaving the thermocouple type untouched
    pub fn set_averaging_mode(&mut self, mode: AveragingMode) -> Result<(), B::Error> {
        self.modify(
            Register::Cr1,
            CR1_AVGSEL_MASK,
            mode.bits() << CR1_AVGSEL_SHIFT,
        )
    }

    pub fn averaging_mode(&mut self) -> Result<AveragingMode, B::Error> {
        let cr1 = self.read_reg(Register::Cr1)?;
        Ok(AveragingMode::from_bits(
            (cr1 & CR1_AVGSEL_MASK) >> CR1_AVGSEL_SHIFT,
        ))
    }

    pub fn set_noise_filter(&mut self, filter: NoiseFilter) -> Result<(), B::Error> {
        let value = match filter {
            NoiseFilter::Hz60 => 0,
            NoiseFilter::Hz50 => CR0_FILTER_50HZ,
        };
        self.modify(Register::Cr0, CR0_FILTER_50HZ, value)
    }

    pub fn noise_filter(&mut self) -> Result<NoiseFilter, B::Error> {
        Ok(NoiseFilter::from_cr0(self.read_reg(Register::Cr0)?))
    }

    pub fn set_conversion_mode(&mut self, mode: ConversionMode) -> Result<(), B::Error> {
        let value = match mode {
            ConversionMode::NormallyOff => 0,
            ConversionMode::Automatic => CR0_AUTOCONVERT,
        };
        self.modify(Register::Cr0, CR0_AUTOCONVERT, value)
    }

    pub fn conversion_mode(&mut self) -> Result<ConversionMode, B::Error> {
        if self.read_reg(Register::Cr0)? & CR0_AUTOCONVERT == 0 {
            Ok(ConversionMode::NormallyOff)
        } else {
            Ok(ConversionMode::Automatic)
        }
    }

    pub fn set_open_circuit_detection(
        &mut self,
        detection: OpenCircuitDetection,
    ) -> Result<(), B::Error> {
        self.modify(
            Register::Cr0,
            CR0_OCFAULT_MASK,
            detection.bits() << CR0_OCFAULT_SHIFT,
        )
    }

    pub fn open_circuit_detection(&mut self) -> Result<OpenCircuitDetection, B::Error> {
        let cr0 = self.read_reg(Register::Cr0)?;
        Ok(OpenCircuitDetection::from_bits(
            (cr0 & CR0_OCFAULT_MASK) >> CR0_OCFAULT_SHIFT,
        ))
    }

    /// Enables or disables the internal cold-junction sensor
    pub fn set_cold_junction_enabled(&mut self, enabled: bool) -> Result<(), B::Error> {
        let value = if enabled { 0 } else { CR0_CJ_DISABLE };
        self.modify(Register::Cr0, CR0_CJ_DISABLE, value)
    }

    pub fn set_fault_mode(&mut self, mode: FaultMode) -> Result<(), B::Error> {
        let value = match mode {
            FaultMode::Comparator => 0,
            FaultMode::Interrupt => CR0_FAULT_INTERRUPT,
        };
        self.modify(Register::Cr0, CR0_FAULT_INTERRUPT, value)
    }

    /// Clears latched faults (interrupt fault mode)
    pub fn clear_faults(&mut self) -> Result<(), B::Error> {
        self.modify(Register::Cr0, CR0_FAULTCLR, CR0_FAULTCLR)
    }

    /// Sets which faults are kept off the FAULT pin
    pub fn set_fault_mask(&mut self, mask: Fault) -> Result<(), B::Error> {
        self.write_reg(Register::Mask, mask.bits())
    }

    pub fn fault_mask(&mut self) -> Result<Fault, B::Error> {
        Ok(Fault::from_bits_retain(self.read_reg(Register::Mask)?))
    }

    /// Cold-junction fault thresholds, 1 °C resolution
    pub fn set_cold_junction_fault_thresholds(
        &mut self,
        low: i8,
        high: i8,
    ) -> Result<(), B::Error> {
        let [high] = high.to_be_bytes();
        let [low] = low.to_be_bytes();
        self.bus.write_registers(Register::Cjhf.addr(), &[high, low])
    }

    /// Linearized temperature fault thresholds, 0.0625 °C resolution
    pub fn set_thermocouple_fault_thresholds(
        &mut self,
        low: f32,
        high: f32,
    ) -> Result<(), B::Error> {
        let [high_msb, high_lsb] = encode_thermocouple_threshold(high);
        let [low_msb, low_lsb] = encode_thermocouple_threshold(low);
        self.bus.write_registers(
            Register::Lthfth.addr(),
            &[high_msb, high_lsb, low_msb, low_lsb],
        )
    }

    /// Offset added to the cold-junction reading, -8 °C to +7.9375 °C
    pub fn set_cold_junction_offset(&mut self, offset: f32) -> Result<(), B::Error> {
        self.write_reg(Register::Cjto, encode_cold_junction_offset(offset))
    }

    /// Reads the fault status register. Bits are returned as read, see [`Fault`].
    pub fn read_fault_status(&mut self) -> Result<Fault, B::Error> {
        Ok(Fault::from_bits_retain(self.read_reg(Register::Sr)?))
    }

    /// Reads the whole register map in one transaction
    pub fn read_all_registers(&mut self) -> Result<[u8; REGISTER_COUNT], B::Error> {
        let mut buf = [0u8; REGISTER_COUNT];
        self.bus.read_registers(Register::Cr0.addr(), &mut buf)?;
        Ok(buf)
    }
}

impl<B: Bus, D: DelayMs<u32>> Max31856<B, D> {
    /// Starts a one-shot conversion and blocks until it is done.
    ///
    /// The wait depends on the noise filter and averaging mode currently configured. Returns the
    /// time waited in milliseconds.
    pub fn trigger_conversion(&mut self) -> Result<u32, B::Error> {
        let mut cr = [0u8; 2];
        self.bus.read_registers(Register::Cr0.addr(), &mut cr)?;
        let [cr0, cr1] = cr;

        let filter = NoiseFilter::from_cr0(cr0);
        let averaging = AveragingMode::from_bits((cr1 & CR1_AVGSEL_MASK) >> CR1_AVGSEL_SHIFT);
        let wait = conversion_time(filter, averaging);

        self.write_reg(Register::Cr0, (cr0 & !CR0_AUTOCONVERT) | CR0_1SHOT)?;

        trace!("conversion started, waiting {=u32} ms", wait);
        self.delay.delay_ms(wait);

        Ok(wait)
    }

    /// Converts and returns the linearized thermocouple temperature
    pub fn read_thermocouple(&mut self) -> Result<LinearizedTemperature, B::Error> {
        self.trigger_conversion()?;

        let mut raw = [0u8; 3];
        self.bus.read_registers(Register::Ltcbh.addr(), &mut raw)?;
        Ok(decode_thermocouple(raw))
    }

    /// Converts and returns the cold-junction temperature
    pub fn read_cold_junction(&mut self) -> Result<ColdJunctionTemperature, B::Error> {
        self.trigger_conversion()?;

        let mut raw = [0u8; 2];
        self.bus.read_registers(Register::Cjth.addr(), &mut raw)?;
        Ok(decode_cold_junction(raw))
    }

    /// Thermocouple temperature in °C
    pub fn read_thermocouple_temperature(&mut self) -> Result<f32, B::Error> {
        Ok(self.read_thermocouple()?.to_num())
    }

    /// Cold-junction temperature in °C
    pub fn read_cold_junction_temperature(&mut self) -> Result<f32, B::Error> {
        Ok(self.read_cold_junction()?.to_num())
    }

    /// Converts once and returns both temperatures in °C as `(cold junction, thermocouple)`
    pub fn read_temperatures(&mut self) -> Result<(f32, f32), B::Error> {
        self.trigger_conversion()?;

        // CJTH through LTCBL are consecutive
        let mut raw = [0u8; 5];
        self.bus.read_registers(Register::Cjth.addr(), &mut raw)?;

        let cold_junction = decode_cold_junction([raw[0], raw[1]]);
        let thermocouple = decode_thermocouple([raw[2], raw[3], raw[4]]);
        Ok((cold_junction.to_num(), thermocouple.to_num()))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::fake::{FakeChip, FakeDelay};

    fn driver() -> Max31856<FakeChip, FakeDelay> {
        Max31856::new(FakeChip::new(), FakeDelay::new(), ThermocoupleType::T)
    }

    #[test]
    fn begin_writes_default_type() {
        let mut max = driver();
        max.bus_mut().set_register(Register::Cr1, 0x40);

        max.begin().unwrap();

        assert_eq!(max.bus().register(Register::Cr1), 0x47);
        assert!(!max.bus().is_selected());
    }

    #[test]
    fn thermocouple_type_keeps_averaging() {
        let mut max = driver();
        max.set_averaging_mode(AveragingMode::Samples8).unwrap();

        for tc in ThermocoupleType::ALL {
            max.set_thermocouple_type(tc).unwrap();
            assert_eq!(max.thermocouple_type().unwrap(), tc);
            assert_eq!(max.averaging_mode().unwrap(), AveragingMode::Samples8);
        }
    }

    #[test]
    fn averaging_keeps_type_and_reserved_bit() {
        let mut max = driver();
        max.bus_mut().set_register(Register::Cr1, 0x85);

        let modes = [
            AveragingMode::Samples1,
            AveragingMode::Samples2,
            AveragingMode::Samples4,
            AveragingMode::Samples8,
            AveragingMode::Samples16,
        ];
        for (mode, samples) in modes.into_iter().zip([1, 2, 4, 8, 16]) {
            max.set_averaging_mode(mode).unwrap();
            assert_eq!(max.averaging_mode().unwrap().samples(), samples);

            let cr1 = max.bus().register(Register::Cr1);
            assert_eq!(cr1 & 0x8F, 0x85);
        }
    }

    #[test]
    fn averaging_saturates_above_16() {
        let mut max = driver();
        for sel in 5..8 {
            max.bus_mut().set_register(Register::Cr1, (sel << 4) | 0x03);
            assert_eq!(max.averaging_mode().unwrap(), AveragingMode::Samples16);
        }
    }

    #[test]
    fn noise_filter_keeps_other_bits() {
        let mut max = driver();
        max.bus_mut().set_register(Register::Cr0, 0b1011_1100);

        max.set_noise_filter(NoiseFilter::Hz50).unwrap();
        assert_eq!(max.noise_filter().unwrap(), NoiseFilter::Hz50);
        assert_eq!(max.bus().register(Register::Cr0), 0b1011_1101);

        max.set_noise_filter(NoiseFilter::Hz60).unwrap();
        assert_eq!(max.noise_filter().unwrap(), NoiseFilter::Hz60);
        assert_eq!(max.bus().register(Register::Cr0), 0b1011_1100);
    }

    #[test]
    fn cr0_fields() {
        let mut max = driver();

        max.set_conversion_mode(ConversionMode::Automatic).unwrap();
        max.set_open_circuit_detection(OpenCircuitDetection::HighResistanceSlow)
            .unwrap();
        max.set_cold_junction_enabled(false).unwrap();
        max.set_fault_mode(FaultMode::Interrupt).unwrap();
        assert_eq!(max.bus().register(Register::Cr0), 0b1011_1100);
        assert_eq!(max.conversion_mode().unwrap(), ConversionMode::Automatic);
        assert_eq!(
            max.open_circuit_detection().unwrap(),
            OpenCircuitDetection::HighResistanceSlow
        );

        max.set_open_circuit_detection(OpenCircuitDetection::LowResistance)
            .unwrap();
        max.set_cold_junction_enabled(true).unwrap();
        assert_eq!(max.bus().register(Register::Cr0), 0b1001_0100);
    }

    #[test]
    fn configure_writes_everything() {
        let mut max = driver();
        let config = Config::new()
            .thermocouple(ThermocoupleType::J)
            .averaging(AveragingMode::Samples2)
            .filter(NoiseFilter::Hz50)
            .fault_mask(Fault::CJ_HIGH | Fault::CJ_LOW);

        max.configure(&config).unwrap();

        assert_eq!(max.bus().register(Register::Cr0), 0x01);
        assert_eq!(max.bus().register(Register::Cr1), 0x12);
        assert_eq!(max.fault_mask().unwrap(), Fault::from_bits_retain(0x30));
        assert_eq!(max.thermocouple_type().unwrap(), ThermocoupleType::J);
    }

    #[test]
    fn conversion_waits_for_config() {
        let mut max = driver();
        max.bus_mut().set_register(Register::Cr0, CR0_AUTOCONVERT);

        assert_eq!(max.trigger_conversion().unwrap(), 155);
        assert_eq!(max.delay().last(), Some(155));
        assert_eq!(max.bus().conversions(), 1);
        // Auto-convert is dropped for the one-shot
        assert_eq!(max.bus().register(Register::Cr0) & CR0_AUTOCONVERT, 0);

        max.set_noise_filter(NoiseFilter::Hz50).unwrap();
        max.set_averaging_mode(AveragingMode::Samples16).unwrap();
        assert_eq!(max.trigger_conversion().unwrap(), 785);
        assert_eq!(max.delay().last(), Some(785));

        max.set_noise_filter(NoiseFilter::Hz60).unwrap();
        max.set_averaging_mode(AveragingMode::Samples4).unwrap();
        assert_eq!(max.trigger_conversion().unwrap(), 155 + 3 * 34);
        assert_eq!(max.delay().calls(), 3);
    }

    #[test]
    fn thermocouple_temperature() {
        let mut max = driver();
        max.bus_mut().set_register(Register::Ltcbh, 0x19);

        assert_eq!(max.read_thermocouple_temperature().unwrap(), 400.0);
        assert_eq!(max.bus().conversions(), 1);
        assert_eq!(max.delay().calls(), 1);

        max.bus_mut().set_register(Register::Ltcbh, 0xFF);
        max.bus_mut().set_register(Register::Ltcbm, 0xF0);
        assert_eq!(max.read_thermocouple_temperature().unwrap(), -1.0);
    }

    #[test]
    fn cold_junction_temperature() {
        let mut max = driver();
        max.bus_mut().set_register(Register::Cjth, 0x19);
        max.bus_mut().set_register(Register::Cjtl, 0x00);
        assert_eq!(max.read_cold_junction_temperature().unwrap(), 25.0);

        max.bus_mut().set_register(Register::Cjth, 0xE7);
        assert_eq!(max.read_cold_junction_temperature().unwrap(), -25.0);
        assert_eq!(max.bus().conversions(), 2);
    }

    #[test]
    fn both_temperatures_from_one_conversion() {
        let mut max = driver();
        max.bus_mut().set_register(Register::Cjth, 0x19);
        max.bus_mut().set_register(Register::Cjtl, 0x40);
        max.bus_mut().set_register(Register::Ltcbh, 0x01);
        max.bus_mut().set_register(Register::Ltcbm, 0x90);

        assert_eq!(max.read_temperatures().unwrap(), (25.25, 25.0));
        assert_eq!(max.bus().conversions(), 1);
    }

    #[test]
    fn fault_status_is_raw() {
        let mut max = driver();
        max.bus_mut().set_register(Register::Sr, 0x41);

        let fault = max.read_fault_status().unwrap();
        assert_eq!(fault.bits(), 0x41);
        assert!(fault.contains(Fault::TC_RANGE | Fault::OPEN));

        max.clear_faults().unwrap();
        assert!(max.read_fault_status().unwrap().is_empty());
    }

    #[test]
    fn thresholds_and_offset() {
        let mut max = driver();

        max.set_cold_junction_fault_thresholds(-55, 85).unwrap();
        max.set_thermocouple_fault_thresholds(-1.0, 1000.5).unwrap();
        max.set_cold_junction_offset(-0.0625).unwrap();

        let regs = max.read_all_registers().unwrap();
        assert_eq!(
            regs[Register::Cjhf as usize..=Register::Cjto as usize],
            [0x55, 0xC9, 0x3E, 0x88, 0xFF, 0xF0, 0xFF]
        );
    }

    #[test]
    fn read_all_registers_defaults() {
        let mut max = driver();
        let regs = max.read_all_registers().unwrap();

        assert_eq!(regs, *max.bus().registers());
        assert_eq!(regs[Register::Cr1 as usize], 0x03);
        assert_eq!(max.bus().transactions(), 1);
    }

    #[test]
    fn release() {
        let max = driver();
        let (chip, delay) = max.release();
        assert_eq!(chip.transactions(), 0);
        assert_eq!(delay.calls(), 0);
    }

    #[test]
    fn one_shot_on_the_wire() {
        use std::vec;

        use embedded_hal_mock::{
            pin::{Mock as PinMock, State as PinState, Transaction as PinTransaction},
            spi::{Mock as SpiMock, Transaction as SpiTransaction},
        };

        use crate::spi::HardwareSpi;

        let mut spi = SpiMock::new(&[
            // CR0 and CR1 in one burst: auto-convert, 60 Hz, type K, no averaging
            SpiTransaction::transfer(vec![0x00], vec![0x00]),
            SpiTransaction::transfer(vec![0xFF, 0xFF], vec![0x80, 0x03]),
            // CR0 back with auto-convert off and one-shot set
            SpiTransaction::transfer(vec![0x80], vec![0x00]),
            SpiTransaction::transfer(vec![0x40], vec![0x00]),
        ]);
        let mut cs = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ]);

        let bus = HardwareSpi::new(spi.clone(), cs.clone());
        let mut max = Max31856::new(bus, FakeDelay::new(), ThermocoupleType::K);

        assert_eq!(max.trigger_conversion().unwrap(), 155);
        assert_eq!(max.delay().last(), Some(155));
        assert_eq!(max.delay().calls(), 1);

        spi.done();
        cs.done();
    }
}
