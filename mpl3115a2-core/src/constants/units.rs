//! Unit Conversion Factors
//!
//! Conversions are applied to already-decoded values in `f64`. The factors
//! reproduce the exact arithmetic callers have historically seen, so
//! `feet = meters * 39.37 / 12` rather than a rounded `3.28084`.

/// Inches per meter (US survey approximation).
pub const INCHES_PER_METER: f64 = 39.37;

/// Inches per foot.
pub const INCHES_PER_FOOT: f64 = 12.0;

/// Fahrenheit degrees per Celsius degree.
pub const FAHRENHEIT_PER_CELSIUS: f64 = 1.8;

/// Fahrenheit offset at 0 °C.
pub const FAHRENHEIT_OFFSET: f64 = 32.0;

/// Pascals per millibar (hPa).
pub const PASCALS_PER_MILLIBAR: f64 = 100.0;

/// Sea-level reference pressure the chip assumes for altitude (Pa).
///
/// Power-on value of BAR_IN is 0xC5E7, i.e. 50 663 × 2 Pa.
pub const DEFAULT_SEA_LEVEL_PA: u32 = 101_326;
