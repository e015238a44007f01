//! Temperature register encodings.

use fixed::types::{I12F4, I4F4, I8F8};

use super::registers::LTCBL_RESERVED;

/// Linearized thermocouple temperature, 1/128 °C resolution.
pub type LinearizedTemperature = crate::thermometer::Temperature;

/// Cold-junction temperature, as laid out in CJTH:CJTL.
pub type ColdJunctionTemperature = I8F8;

/// Decodes LTCBH, LTCBM, LTCBL.
///
/// The 24-bit group is two's complement with the value in the top 19 bits; the low 5 bits of
/// LTCBL are unused.
pub fn decode_thermocouple(raw: [u8; 3]) -> LinearizedTemperature {
    // Left-align in an i32 so the arithmetic shift sign-extends from bit 23
    let bits = i32::from_be_bytes([raw[0], raw[1], raw[2] & !LTCBL_RESERVED, 0]) >> 13;
    LinearizedTemperature::from_bits(bits)
}

/// Decodes CJTH, CJTL.
pub fn decode_cold_junction(raw: [u8; 2]) -> ColdJunctionTemperature {
    ColdJunctionTemperature::from_bits(i16::from_be_bytes(raw))
}

/// Encodes a linearized temperature fault threshold (MSB, LSB), 0.0625 °C resolution.
///
/// Out of range values saturate, NaN encodes as 0 °C.
pub fn encode_thermocouple_threshold(celsius: f32) -> [u8; 2] {
    let value = if celsius.is_nan() {
        I12F4::ZERO
    } else {
        I12F4::saturating_from_num(celsius)
    };
    value.to_bits().to_be_bytes()
}

/// Encodes the cold-junction offset, 0.0625 °C resolution, -8 °C to +7.9375 °C.
///
/// Out of range values saturate, NaN encodes as 0 °C.
pub fn encode_cold_junction_offset(celsius: f32) -> u8 {
    let value = if celsius.is_nan() {
        I4F4::ZERO
    } else {
        I4F4::saturating_from_num(celsius)
    };
    value.to_bits().to_be_bytes()[0]
}
