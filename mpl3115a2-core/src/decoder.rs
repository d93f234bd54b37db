//! Fixed-Point Output Decoding
//!
//! ## Output Formats
//!
//! The chip reports every measurement as a left-justified fixed-point number
//! spread across big-endian output registers. The fraction always sits in the
//! high bits of the last byte; the low nibble is unused.
//!
//! ```text
//! Altitude (signed Q16.4, meters)
//!   OUT_P_MSB        OUT_P_CSB        OUT_P_LSB
//!   iiiiiiii         iiiiiiii         ffff----
//!
//! Pressure (unsigned Q18.2, pascals)
//!   OUT_P_MSB        OUT_P_CSB        OUT_P_LSB
//!   iiiiiiii         iiiiiiii         iiff----
//!
//! Temperature (signed Q8.4, degrees Celsius)
//!   OUT_T_MSB        OUT_T_LSB
//!   iiiiiiii         ffff----
//! ```
//!
//! Each format is loaded into the matching `fixed` type by shifting out the
//! unused nibble, so sign extension and fraction weighting come from the type
//! rather than hand-written masks. Conversion to `f64` is exact for all three.
//!
//! ## Worked Examples
//!
//! ```rust
//! use mpl3115a2_core::decoder::{decode_altitude, decode_pressure, decode_temperature};
//!
//! // 0x0100 m + 1/16 m
//! assert_eq!(decode_altitude([0x01, 0x00, 0x10]), 256.0625);
//! // (1 << 10) | (0 << 2) | (0xC0 >> 6) = 1027 Pa, fraction bits 5:4 = 0
//! assert_eq!(decode_pressure([0x01, 0x00, 0xC0]), 1027.0);
//! // 22 °C + 8/16 °C
//! assert_eq!(decode_temperature([0x16, 0x80]), 22.5);
//! ```

use core::fmt;

use fixed::types::{I12F4, I28F4, U30F2};

use crate::constants::units::*;
use crate::trigger::MeasurementMode;

/// Physical unit of a decoded value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Unit {
    /// Altitude, meters
    Meters,
    /// Altitude, feet
    Feet,
    /// Temperature, degrees Celsius
    Celsius,
    /// Temperature, degrees Fahrenheit
    Fahrenheit,
    /// Pressure, pascals
    Pascals,
    /// Pressure, millibars (hPa)
    Millibars,
}

impl Unit {
    /// Short symbol for display
    pub const fn symbol(&self) -> &'static str {
        match self {
            Unit::Meters => "m",
            Unit::Feet => "ft",
            Unit::Celsius => "°C",
            Unit::Fahrenheit => "°F",
            Unit::Pascals => "Pa",
            Unit::Millibars => "mbar",
        }
    }
}

/// A decoded measurement with its unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalValue {
    /// Magnitude
    pub value: f64,
    /// Unit of `value`
    pub unit: Unit,
}

impl PhysicalValue {
    /// Value in `unit`, or `None` when the units measure different quantities
    pub fn convert(self, unit: Unit) -> Option<f64> {
        use Unit::*;

        let v = self.value;
        match (self.unit, unit) {
            (a, b) if a == b => Some(v),
            (Meters, Feet) => Some(meters_to_feet(v)),
            (Feet, Meters) => Some(v * INCHES_PER_FOOT / INCHES_PER_METER),
            (Celsius, Fahrenheit) => Some(celsius_to_fahrenheit(v)),
            (Fahrenheit, Celsius) => Some((v - FAHRENHEIT_OFFSET) / FAHRENHEIT_PER_CELSIUS),
            (Pascals, Millibars) => Some(pascals_to_millibars(v)),
            (Millibars, Pascals) => Some(v * PASCALS_PER_MILLIBAR),
            _ => None,
        }
    }
}

impl fmt::Display for PhysicalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.symbol())
    }
}

/// Raw output register bytes, as read after a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawSample {
    /// OUT_P_MSB, OUT_P_CSB, OUT_P_LSB (pressure or altitude)
    Barometric([u8; 3]),
    /// OUT_T_MSB, OUT_T_LSB
    Thermal([u8; 2]),
}

/// Altitude output as signed Q16.4 meters
pub fn altitude_fixed(raw: [u8; 3]) -> I28F4 {
    let [msb, csb, lsb] = raw;
    let bits = (i32::from(msb as i8) << 12) | (i32::from(csb) << 4) | i32::from(lsb >> 4);
    I28F4::from_bits(bits)
}

/// Pressure output as unsigned Q18.2 pascals
pub fn pressure_fixed(raw: [u8; 3]) -> U30F2 {
    let [msb, csb, lsb] = raw;
    let bits = (u32::from(msb) << 12) | (u32::from(csb) << 4) | u32::from(lsb >> 4);
    U30F2::from_bits(bits)
}

/// Temperature output as signed Q8.4 degrees Celsius
pub fn temperature_fixed(raw: [u8; 2]) -> I12F4 {
    let [msb, lsb] = raw;
    let bits = (i16::from(msb as i8) << 4) | i16::from(lsb >> 4);
    I12F4::from_bits(bits)
}

/// Altitude in meters
pub fn decode_altitude(raw: [u8; 3]) -> f64 {
    altitude_fixed(raw).to_num()
}

/// Pressure in pascals
pub fn decode_pressure(raw: [u8; 3]) -> f64 {
    pressure_fixed(raw).to_num()
}

/// Temperature in degrees Celsius
pub fn decode_temperature(raw: [u8; 2]) -> f64 {
    temperature_fixed(raw).to_num()
}

/// Decode a raw sample in the native unit of `mode`
///
/// Returns `None` when the sample shape does not match the mode
/// (temperature bytes for a barometric mode or vice versa).
pub fn decode(mode: MeasurementMode, raw: RawSample) -> Option<PhysicalValue> {
    let value = match (mode, raw) {
        (MeasurementMode::Altitude, RawSample::Barometric(b)) => decode_altitude(b),
        (MeasurementMode::Pressure, RawSample::Barometric(b)) => decode_pressure(b),
        (MeasurementMode::Temperature, RawSample::Thermal(b)) => decode_temperature(b),
        _ => return None,
    };
    Some(PhysicalValue { value, unit: mode.native_unit() })
}

/// feet = meters × 39.37 / 12
pub fn meters_to_feet(meters: f64) -> f64 {
    meters * INCHES_PER_METER / INCHES_PER_FOOT
}

/// °F = °C × 1.8 + 32
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * FAHRENHEIT_PER_CELSIUS + FAHRENHEIT_OFFSET
}

/// mbar = Pa / 100
pub fn pascals_to_millibars(pascals: f64) -> f64 {
    pascals / PASCALS_PER_MILLIBAR
}
