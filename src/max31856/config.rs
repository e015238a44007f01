//! Configuration register fields.

#[cfg(feature = "defmt")]
use defmt::Format;

use super::{fault::Fault, registers::*};

/// Thermocouple type, or one of the raw voltage modes (CR1 bits 3:0)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(Format))]
pub enum ThermocoupleType {
    B,
    E,
    J,
    #[default]
    K,
    N,
    R,
    S,
    T,
    /// Voltage mode, gain 8. Code = 8 x 1.6 x 2^17 x Vin
    VoltageGain8,
    /// Voltage mode, gain 32. Code = 32 x 1.6 x 2^17 x Vin
    VoltageGain32,
}

impl ThermocoupleType {
    pub const ALL: [ThermocoupleType; 10] = [
        ThermocoupleType::B,
        ThermocoupleType::E,
        ThermocoupleType::J,
        ThermocoupleType::K,
        ThermocoupleType::N,
        ThermocoupleType::R,
        ThermocoupleType::S,
        ThermocoupleType::T,
        ThermocoupleType::VoltageGain8,
        ThermocoupleType::VoltageGain32,
    ];

    /// Decodes the low nibble of CR1.
    ///
    /// The chip treats `10xx` as gain 8 and `11xx` as gain 32.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & CR1_TC_TYPE_MASK {
            0b0000 => ThermocoupleType::B,
            0b0001 => ThermocoupleType::E,
            0b0010 => ThermocoupleType::J,
            0b0011 => ThermocoupleType::K,
            0b0100 => ThermocoupleType::N,
            0b0101 => ThermocoupleType::R,
            0b0110 => ThermocoupleType::S,
            0b0111 => ThermocoupleType::T,
            0b1000..=0b1011 => ThermocoupleType::VoltageGain8,
            _ => ThermocoupleType::VoltageGain32,
        }
    }

    pub const fn bits(self) -> u8 {
        match self {
            ThermocoupleType::B => 0b0000,
            ThermocoupleType::E => 0b0001,
            ThermocoupleType::J => 0b0010,
            ThermocoupleType::K => 0b0011,
            ThermocoupleType::N => 0b0100,
            ThermocoupleType::R => 0b0101,
            ThermocoupleType::S => 0b0110,
            ThermocoupleType::T => 0b0111,
            ThermocoupleType::VoltageGain8 => 0b1000,
            ThermocoupleType::VoltageGain32 => 0b1100,
        }
    }

    pub const fn is_voltage_mode(self) -> bool {
        matches!(
            self,
            ThermocoupleType::VoltageGain8 | ThermocoupleType::VoltageGain32
        )
    }
}

/// Number of samples averaged per conversion (CR1 bits 6:4)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(Format))]
pub enum AveragingMode {
    #[default]
    Samples1,
    Samples2,
    Samples4,
    Samples8,
    Samples16,
}

impl AveragingMode {
    /// Decodes the averaging selector. Selectors above 16 samples saturate.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0 => AveragingMode::Samples1,
            1 => AveragingMode::Samples2,
            2 => AveragingMode::Samples4,
            3 => AveragingMode::Samples8,
            _ => AveragingMode::Samples16,
        }
    }

    pub const fn bits(self) -> u8 {
        match self {
            AveragingMode::Samples1 => 0,
            AveragingMode::Samples2 => 1,
            AveragingMode::Samples4 => 2,
            AveragingMode::Samples8 => 3,
            AveragingMode::Samples16 => 4,
        }
    }

    pub const fn samples(self) -> u32 {
        1 << self.bits()
    }
}

/// Mains rejection filter (CR0 bit 0)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(Format))]
pub enum NoiseFilter {
    #[default]
    Hz60,
    Hz50,
}

impl NoiseFilter {
    pub const fn from_cr0(cr0: u8) -> Self {
        if cr0 & CR0_FILTER_50HZ == 0 {
            NoiseFilter::Hz60
        } else {
            NoiseFilter::Hz50
        }
    }

    /// Conversion time of a single sample in milliseconds
    pub const fn base_conversion_time(self) -> u32 {
        match self {
            NoiseFilter::Hz60 => 155,
            NoiseFilter::Hz50 => 185,
        }
    }

    /// Time added by each additional averaged sample in milliseconds
    pub const fn sample_conversion_time(self) -> u32 {
        match self {
            NoiseFilter::Hz60 => 34,
            NoiseFilter::Hz50 => 40,
        }
    }
}

/// Maximum one-shot conversion time in milliseconds
pub const fn conversion_time(filter: NoiseFilter, averaging: AveragingMode) -> u32 {
    filter.base_conversion_time() + (averaging.samples() - 1) * filter.sample_conversion_time()
}

/// Conversion mode (CR0 bit 7)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(Format))]
pub enum ConversionMode {
    /// Idle until a one-shot conversion is requested
    #[default]
    NormallyOff,
    /// Continuous conversion every ~100ms
    Automatic,
}

/// Open-circuit fault detection (CR0 bits 5:4)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(Format))]
pub enum OpenCircuitDetection {
    #[default]
    Disabled,
    /// Source resistance below 5k
    LowResistance,
    /// Source resistance above 5k, time constant below 2ms
    HighResistanceFast,
    /// Source resistance above 5k, time constant above 2ms
    HighResistanceSlow,
}

impl OpenCircuitDetection {
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => OpenCircuitDetection::Disabled,
            1 => OpenCircuitDetection::LowResistance,
            2 => OpenCircuitDetection::HighResistanceFast,
            _ => OpenCircuitDetection::HighResistanceSlow,
        }
    }

    pub const fn bits(self) -> u8 {
        match self {
            OpenCircuitDetection::Disabled => 0,
            OpenCircuitDetection::LowResistance => 1,
            OpenCircuitDetection::HighResistanceFast => 2,
            OpenCircuitDetection::HighResistanceSlow => 3,
        }
    }
}

/// How the FAULT pin and status register latch (CR0 bit 2)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(Format))]
pub enum FaultMode {
    /// Faults clear when the condition goes away
    #[default]
    Comparator,
    /// Faults latch until cleared
    Interrupt,
}

/// Full chip configuration, written by [`Max31856::configure`](super::Max31856::configure).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(Format))]
pub struct Config {
    pub thermocouple: ThermocoupleType,
    pub averaging: AveragingMode,
    pub filter: NoiseFilter,
    pub conversion: ConversionMode,
    pub open_circuit: OpenCircuitDetection,
    pub cold_junction: bool,
    pub fault_mode: FaultMode,
    /// Faults kept off the FAULT pin
    pub fault_mask: Fault,
}

impl Config {
    pub const fn new() -> Self {
        Self {
            thermocouple: ThermocoupleType::K,
            averaging: AveragingMode::Samples1,
            filter: NoiseFilter::Hz60,
            conversion: ConversionMode::NormallyOff,
            open_circuit: OpenCircuitDetection::Disabled,
            cold_junction: true,
            fault_mode: FaultMode::Comparator,
            fault_mask: Fault::empty(),
        }
    }

    #[must_use]
    pub const fn thermocouple(mut self, thermocouple: ThermocoupleType) -> Self {
        self.thermocouple = thermocouple;
        self
    }

    #[must_use]
    pub const fn averaging(mut self, averaging: AveragingMode) -> Self {
        self.averaging = averaging;
        self
    }

    #[must_use]
    pub const fn filter(mut self, filter: NoiseFilter) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub const fn conversion(mut self, conversion: ConversionMode) -> Self {
        self.conversion = conversion;
        self
    }

    #[must_use]
    pub const fn open_circuit(mut self, open_circuit: OpenCircuitDetection) -> Self {
        self.open_circuit = open_circuit;
        self
    }

    #[must_use]
    pub const fn cold_junction(mut self, enabled: bool) -> Self {
        self.cold_junction = enabled;
        self
    }

    #[must_use]
    pub const fn fault_mode(mut self, fault_mode: FaultMode) -> Self {
        self.fault_mode = fault_mode;
        self
    }

    #[must_use]
    pub const fn fault_mask(mut self, fault_mask: Fault) -> Self {
        self.fault_mask = fault_mask;
        self
    }

    /// Configuration 0 register value. Never requests a one-shot or a fault clear.
    pub const fn cr0(&self) -> u8 {
        let mut cr0 = self.open_circuit.bits() << CR0_OCFAULT_SHIFT;
        if matches!(self.conversion, ConversionMode::Automatic) {
            cr0 |= CR0_AUTOCONVERT;
        }
        if !self.cold_junction {
            cr0 |= CR0_CJ_DISABLE;
        }
        if matches!(self.fault_mode, FaultMode::Interrupt) {
            cr0 |= CR0_FAULT_INTERRUPT;
        }
        if matches!(self.filter, NoiseFilter::Hz50) {
            cr0 |= CR0_FILTER_50HZ;
        }
        cr0
    }

    /// Configuration 1 register value
    pub const fn cr1(&self) -> u8 {
        (self.averaging.bits() << CR1_AVGSEL_SHIFT) | self.thermocouple.bits()
    }

    /// Conversion time of a one-shot conversion under this configuration
    pub const fn conversion_time(&self) -> u32 {
        conversion_time(self.filter, self.averaging)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
