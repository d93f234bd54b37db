//! MPL3115A2 Register Map
//!
//! Addresses and bit positions from the NXP MPL3115A2 datasheet (Rev. 7.0,
//! section 14). Only the registers this driver touches are listed; the FIFO
//! and min/max history registers are intentionally absent.

// ===== BUS DEFAULTS =====

/// Default I²C bus number on a Raspberry Pi class host.
pub const DEFAULT_BUS: u8 = 1;

/// Fixed 7-bit I²C address of the MPL3115A2.
pub const DEFAULT_ADDRESS: u8 = 0x60;

// ===== IDENTITY =====

/// Device identification register.
pub const REG_WHO_AM_I: u8 = 0x0C;

/// Factory-programmed WHO_AM_I value for the MPL3115A2.
pub const WHO_AM_I: u8 = 0xC4;

// ===== OUTPUT DATA =====

/// Pressure/altitude output, bits 19:12.
pub const REG_OUT_P_MSB: u8 = 0x01;
/// Pressure/altitude output, bits 11:4.
pub const REG_OUT_P_CSB: u8 = 0x02;
/// Pressure/altitude output, bits 3:0 in the upper nibble.
pub const REG_OUT_P_LSB: u8 = 0x03;
/// Temperature output, integer degrees.
pub const REG_OUT_T_MSB: u8 = 0x04;
/// Temperature output, fraction in the upper nibble.
pub const REG_OUT_T_LSB: u8 = 0x05;

// ===== INTERRUPT / EVENT CONFIGURATION =====

/// Interrupt source register. Flags clear when the corresponding data or
/// status register is read.
pub const REG_INT_SOURCE: u8 = 0x12;

/// Data event flag configuration.
pub const REG_PT_DATA_CFG: u8 = 0x13;

// ===== THRESHOLDS =====

/// Barometric input for altitude calculation, MSB (2 Pa per LSB).
pub const REG_BAR_IN_MSB: u8 = 0x14;
/// Barometric input for altitude calculation, LSB.
pub const REG_BAR_IN_LSB: u8 = 0x15;
/// Pressure/altitude target, MSB.
pub const REG_P_TGT_MSB: u8 = 0x16;
/// Pressure/altitude target, LSB.
pub const REG_P_TGT_LSB: u8 = 0x17;
/// Temperature target.
pub const REG_T_TGT: u8 = 0x18;
/// Pressure/altitude window, MSB.
pub const REG_P_WND_MSB: u8 = 0x19;
/// Pressure/altitude window, LSB.
pub const REG_P_WND_LSB: u8 = 0x1A;
/// Temperature window.
pub const REG_T_WND: u8 = 0x1B;

// ===== CONTROL =====

/// Control register 1: mode, oversampling, reset, standby/active.
pub const REG_CTRL1: u8 = 0x26;
/// Control register 4: interrupt enables.
pub const REG_CTRL4: u8 = 0x29;
/// Control register 5: interrupt pin routing.
pub const REG_CTRL5: u8 = 0x2A;

// ===== CTRL_REG1 BITS =====

/// SBYB: 1 = active, 0 = standby.
pub const CTRL1_SBYB: u8 = 1 << 0;
/// OST: one-shot measurement trigger.
pub const CTRL1_OST: u8 = 1 << 1;
/// RST: software reset.
pub const CTRL1_RST: u8 = 1 << 2;
/// Position of the 3-bit oversample ratio field.
pub const CTRL1_OS_SHIFT: u8 = 3;
/// Mask of the oversample ratio field.
pub const CTRL1_OS_MASK: u8 = 0b111 << CTRL1_OS_SHIFT;
/// RAW: raw ADC output mode.
pub const CTRL1_RAW: u8 = 1 << 6;
/// ALT: 1 = altimeter mode, 0 = barometer mode.
pub const CTRL1_ALT: u8 = 1 << 7;

// ===== INTERRUPT SOURCE LAYOUT =====
//
// INT_SOURCE, CTRL_REG4 (enables) and CTRL_REG5 (routing) share one layout.

/// Data ready.
pub const INT_DRDY: u8 = 1 << 7;
/// FIFO event.
pub const INT_FIFO: u8 = 1 << 6;
/// Pressure/altitude window exceeded.
pub const INT_PW: u8 = 1 << 5;
/// Temperature window exceeded.
pub const INT_TW: u8 = 1 << 4;
/// Pressure/altitude threshold crossed.
pub const INT_PTH: u8 = 1 << 3;
/// Temperature threshold crossed.
pub const INT_TTH: u8 = 1 << 2;
/// Pressure/altitude change.
pub const INT_PCHG: u8 = 1 << 1;
/// Temperature change.
pub const INT_TCHG: u8 = 1 << 0;

// ===== PT_DATA_CFG BITS =====

/// DREM: data ready event mode (master event enable).
pub const PT_DATA_CFG_DREM: u8 = 1 << 2;
/// PDEFE: event on new pressure/altitude data.
pub const PT_DATA_CFG_PDEFE: u8 = 1 << 1;
/// TDEFE: event on new temperature data.
pub const PT_DATA_CFG_TDEFE: u8 = 1 << 0;
