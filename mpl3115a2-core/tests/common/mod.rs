//! Shared fixtures for the integration tests
//!
//! - `chip`: a simulated MPL3115A2 register file behind a cloneable bus
//! - `lines`: scripted interrupt lines and a recording delay
//!
//! Output register fixtures decode to round numbers so assertions can compare
//! exactly.

#![allow(dead_code)]

pub mod chip;
pub mod lines;

use mpl3115a2_core::{DeviceConfig, EdgeQueue, Mpl3115a2, Timing};

use chip::SimulatedChip;
use lines::{RecordingDelay, ScriptedLine};

/// OUT_P in altimeter mode: 256.0625 m
pub const ALTITUDE_OUT: [u8; 3] = [0x01, 0x00, 0x10];
/// Expected altitude, meters
pub const ALTITUDE_M: f64 = 256.0625;

/// OUT_P in barometer mode: 101 288.75 Pa
pub const PRESSURE_OUT: [u8; 3] = [0x62, 0xEA, 0x30];
/// Expected pressure, pascals
pub const PRESSURE_PA: f64 = 101_288.75;

/// OUT_T: 22.5 °C
pub const TEMPERATURE_OUT: [u8; 2] = [0x16, 0x80];
/// Expected temperature, °C
pub const TEMPERATURE_C: f64 = 22.5;

/// Device type every test builds
pub type TestSensor = Mpl3115a2<SimulatedChip, ScriptedLine, ScriptedLine, RecordingDelay>;

/// Config with no sleeps
pub fn fast_config() -> DeviceConfig {
    DeviceConfig::default().with_timing(Timing::immediate())
}

/// A chip that converts on activation, with all three fixtures loaded
pub fn converting_chip() -> SimulatedChip {
    let chip = SimulatedChip::new();
    chip.load_outputs(ALTITUDE_OUT, PRESSURE_OUT, TEMPERATURE_OUT);
    chip
}

/// Initialize a device over `chip` with idle lines and no sleeps
pub fn sensor(chip: &SimulatedChip, edges: &'static EdgeQueue) -> TestSensor {
    Mpl3115a2::initialize(
        fast_config(),
        chip.clone(),
        ScriptedLine::idle(),
        ScriptedLine::data_ready(),
        RecordingDelay::default(),
        edges,
    )
    .expect("simulated chip initializes")
}

/// Float comparison for derived units
pub fn assert_close(actual: f64, expected: f64) {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}
