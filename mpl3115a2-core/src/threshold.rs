//! Threshold, Window and Correction Programming
//!
//! ## Comparators
//!
//! The chip compares every conversion against a target and a window per axis
//! and can raise an interrupt when a reading crosses the target (PTH/TTH) or
//! leaves the window around it (PW/TW). Pressure and altitude share one axis;
//! which one the comparator sees depends on CTRL1.ALT at conversion time.
//!
//! ```text
//! Setting               Registers            Width   Axis
//! -------------------------------------------------------------
//! Pressure target       P_TGT_MSB/LSB        16      barometric
//! Pressure window       P_WND_MSB/LSB        16      barometric
//! Temperature target    T_TGT                8       temperature
//! Temperature window    T_WND                8       temperature
//! Local pressure        BAR_IN_MSB/LSB       16      (none)
//! ```
//!
//! ## Sequence
//!
//! For comparator settings:
//! 1. Write the value, MSB first
//! 2. PT_DATA_CFG |= DREM | axis event bit
//! 3. CTRL_REG4 |= axis threshold + window enables
//! 4. CTRL_REG5 |= same bits (route both to INT1)
//!
//! Steps 2-4 are independent read-modify-writes; nothing else in those
//! registers changes. The local pressure correction only writes its data
//! registers.
//!
//! ## Local Pressure Correction
//!
//! The chip computes altitude against a sea-level reference of 101 326 Pa.
//! BAR_IN holds that reference at 2 Pa per LSB, so the caller's pascal value
//! is halved before it is split. Anything above 131 071 Pa saturates at
//! 0xFFFF.

use heapless::Vec;

use crate::constants::registers::*;
use crate::registers::{ControlRegister, Ctrl4, Ctrl5, PtDataCfg, Sources};
use crate::traits::RegisterBus;

/// Comparator axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// Pressure or altitude, depending on CTRL1.ALT
    Barometric,
    /// Temperature
    Temperature,
}

impl Axis {
    /// Threshold and window sources of this axis
    pub const fn sources(self) -> Sources {
        match self {
            Axis::Barometric => Sources::PRESSURE_AXIS,
            Axis::Temperature => Sources::TEMPERATURE_AXIS,
        }
    }

    const fn apply_events(self, cfg: PtDataCfg) -> PtDataCfg {
        match self {
            Axis::Barometric => cfg.enable_pressure_events(),
            Axis::Temperature => cfg.enable_temperature_events(),
        }
    }
}

/// One programmable comparator or reference value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdSetting {
    /// Pressure (Pa) or altitude (m) target, unscaled
    PressureTarget(u16),
    /// Pressure (Pa) or altitude (m) window, unscaled
    PressureWindow(u16),
    /// Temperature target, °C (two's complement on the chip)
    TemperatureTarget(i8),
    /// Temperature window, °C (two's complement on the chip)
    TemperatureWindow(i8),
    /// Local sea-level pressure, Pa
    LocalPressureCorrection(u32),
}

/// Bytes a setting writes, starting at `register`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedSetting {
    /// First register written
    pub register: u8,
    bytes: Vec<u8, 2>,
}

impl EncodedSetting {
    fn wide(register: u8, value: u16) -> Self {
        Self { register, bytes: value.to_be_bytes().into_iter().collect() }
    }

    fn narrow(register: u8, value: i8) -> Self {
        Self { register, bytes: value.to_be_bytes().into_iter().collect() }
    }

    /// Data bytes in write order
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl ThresholdSetting {
    /// Comparator axis whose interrupt path this setting enables
    pub const fn axis(&self) -> Option<Axis> {
        match self {
            Self::PressureTarget(_) | Self::PressureWindow(_) => Some(Axis::Barometric),
            Self::TemperatureTarget(_) | Self::TemperatureWindow(_) => Some(Axis::Temperature),
            Self::LocalPressureCorrection(_) => None,
        }
    }

    /// Register image of the value
    pub fn encode(&self) -> EncodedSetting {
        match *self {
            Self::PressureTarget(v) => EncodedSetting::wide(REG_P_TGT_MSB, v),
            Self::PressureWindow(v) => EncodedSetting::wide(REG_P_WND_MSB, v),
            Self::TemperatureTarget(v) => EncodedSetting::narrow(REG_T_TGT, v),
            Self::TemperatureWindow(v) => EncodedSetting::narrow(REG_T_WND, v),
            // 2 Pa per LSB
            Self::LocalPressureCorrection(pa) => {
                EncodedSetting::wide(REG_BAR_IN_MSB, u16::try_from(pa >> 1).unwrap_or(u16::MAX))
            }
        }
    }

    /// Write the value and enable its interrupt path
    pub fn apply<B: RegisterBus>(&self, bus: &mut B) -> Result<(), B::Error> {
        drv_trace!(">>> apply {:?}", self);
        let encoded = self.encode();
        bus.write_registers(encoded.register, encoded.bytes())?;

        if let Some(axis) = self.axis() {
            PtDataCfg::modify(bus, |r| axis.apply_events(r))?;
            Ctrl4::modify(bus, |r| r.enable(axis.sources()))?;
            Ctrl5::modify(bus, |r| r.route_to_int1(axis.sources()))?;
        }

        drv_trace!("<<< apply {:?}", self);
        Ok(())
    }
}
