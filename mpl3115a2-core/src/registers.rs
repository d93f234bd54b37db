//! Typed Control Register State
//!
//! ## Overview
//!
//! Several operations touch the same control registers: a conversion sets the
//! data-ready enable in CTRL_REG4, a threshold sets the window enables in the
//! same register, and neither may clobber the other. Every mutation is
//! therefore a read-modify-write over a byte newtype whose methods name the
//! bit field they change and leave every other bit alone.
//!
//! ```text
//! CTRL_REG1 (0x26)
//! ┌─────┬─────┬─────┬─────┬─────┬─────┬─────┬──────┐
//! │ ALT │ RAW │ OS2 │ OS1 │ OS0 │ RST │ OST │ SBYB │
//! └─────┴─────┴─────┴─────┴─────┴─────┴─────┴──────┘
//!
//! INT_SOURCE (0x12) / CTRL_REG4 (0x29) / CTRL_REG5 (0x2A)
//! ┌──────┬──────┬────┬────┬─────┬─────┬──────┬──────┐
//! │ DRDY │ FIFO │ PW │ TW │ PTH │ TTH │ PCHG │ TCHG │
//! └──────┴──────┴────┴────┴─────┴─────┴──────┴──────┘
//!
//! PT_DATA_CFG (0x13)
//! ┌───┬───┬───┬───┬───┬──────┬───────┬───────┐
//! │ - │ - │ - │ - │ - │ DREM │ PDEFE │ TDEFE │
//! └───┴───┴───┴───┴───┴──────┴───────┴───────┘
//! ```
//!
//! ## Standby invariant
//!
//! Mode and oversample bits may only change while SBYB is clear. `Ctrl1`
//! does not enforce ordering on its own; the trigger sequence does, by
//! writing standby first and active last.
//!
//! ## Usage
//!
//! ```rust
//! use mpl3115a2_core::registers::{Ctrl1, Oversample};
//!
//! let ctrl1 = Ctrl1::from(0b0000_0001)
//!     .with_active(false)
//!     .with_altimeter(true)
//!     .with_oversample(Oversample::MAX);
//! assert_eq!(ctrl1.bits(), 0b1011_1000);
//! ```

use core::ops::BitOr;

use crate::constants::registers::*;
use crate::traits::RegisterBus;

/// A control register that can be read and modified as a whole byte
pub trait ControlRegister: Copy + From<u8> + Into<u8> {
    /// Register address
    const ADDRESS: u8;

    /// Read the current register value.
    fn read<B: RegisterBus>(bus: &mut B) -> Result<Self, B::Error> {
        bus.read_register(Self::ADDRESS).map(Self::from)
    }

    /// Read, apply `f`, write back. Returns the value written.
    fn modify<B, F>(bus: &mut B, f: F) -> Result<Self, B::Error>
    where
        B: RegisterBus,
        F: FnOnce(Self) -> Self,
    {
        let updated = f(Self::read(bus)?);
        bus.write_register(Self::ADDRESS, updated.into())?;
        Ok(updated)
    }
}

macro_rules! byte_register {
    ($name:ident, $address:expr) => {
        impl From<u8> for $name {
            fn from(bits: u8) -> Self {
                Self(bits)
            }
        }

        impl From<$name> for u8 {
            fn from(reg: $name) -> u8 {
                reg.0
            }
        }

        impl ControlRegister for $name {
            const ADDRESS: u8 = $address;
        }

        impl $name {
            /// Raw register byte
            pub const fn bits(self) -> u8 {
                self.0
            }
        }
    };
}

/// Oversample ratio (CTRL_REG1 OS field)
///
/// Conversion time roughly doubles per step; 128 samples take ~512 ms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Oversample {
    /// 1 sample
    X1 = 0,
    /// 2 samples
    X2 = 1,
    /// 4 samples
    X4 = 2,
    /// 8 samples
    X8 = 3,
    /// 16 samples
    X16 = 4,
    /// 32 samples
    X32 = 5,
    /// 64 samples
    X64 = 6,
    /// 128 samples
    X128 = 7,
}

impl Oversample {
    /// Highest ratio, used for every conversion this driver triggers
    pub const MAX: Self = Self::X128;

    const fn from_field(field: u8) -> Self {
        match field & 0b111 {
            0 => Self::X1,
            1 => Self::X2,
            2 => Self::X4,
            3 => Self::X8,
            4 => Self::X16,
            5 => Self::X32,
            6 => Self::X64,
            _ => Self::X128,
        }
    }

    /// Number of internal samples averaged per conversion
    pub const fn samples(self) -> u8 {
        1 << (self as u8)
    }
}

/// CTRL_REG1: mode, oversampling, reset, standby/active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ctrl1(u8);

byte_register!(Ctrl1, REG_CTRL1);

impl Ctrl1 {
    /// SBYB set: chip is sampling
    pub const fn is_active(self) -> bool {
        self.0 & CTRL1_SBYB != 0
    }

    /// Set or clear SBYB
    pub const fn with_active(self, active: bool) -> Self {
        Self(set_bits(self.0, CTRL1_SBYB, active))
    }

    /// ALT set: altimeter mode, otherwise barometer
    pub const fn is_altimeter(self) -> bool {
        self.0 & CTRL1_ALT != 0
    }

    /// Set or clear ALT
    pub const fn with_altimeter(self, altimeter: bool) -> Self {
        Self(set_bits(self.0, CTRL1_ALT, altimeter))
    }

    /// Current oversample ratio
    pub const fn oversample(self) -> Oversample {
        Oversample::from_field((self.0 & CTRL1_OS_MASK) >> CTRL1_OS_SHIFT)
    }

    /// Replace the oversample field
    pub const fn with_oversample(self, os: Oversample) -> Self {
        Self((self.0 & !CTRL1_OS_MASK) | ((os as u8) << CTRL1_OS_SHIFT))
    }

    /// RST set
    pub const fn is_reset(self) -> bool {
        self.0 & CTRL1_RST != 0
    }

    /// Set RST; the chip reboots as soon as this is written
    pub const fn with_reset(self) -> Self {
        Self(self.0 | CTRL1_RST)
    }
}

/// Interrupt sources, shared layout of INT_SOURCE, CTRL_REG4 and CTRL_REG5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sources(u8);

impl Sources {
    /// Data ready
    pub const DATA_READY: Self = Self(INT_DRDY);
    /// FIFO event (unused by this driver)
    pub const FIFO: Self = Self(INT_FIFO);
    /// Pressure/altitude window
    pub const PRESSURE_WINDOW: Self = Self(INT_PW);
    /// Temperature window
    pub const TEMPERATURE_WINDOW: Self = Self(INT_TW);
    /// Pressure/altitude threshold
    pub const PRESSURE_THRESHOLD: Self = Self(INT_PTH);
    /// Temperature threshold
    pub const TEMPERATURE_THRESHOLD: Self = Self(INT_TTH);
    /// Pressure/altitude change
    pub const PRESSURE_CHANGE: Self = Self(INT_PCHG);
    /// Temperature change
    pub const TEMPERATURE_CHANGE: Self = Self(INT_TCHG);

    /// Both pressure/altitude comparator sources
    pub const PRESSURE_AXIS: Self = Self(INT_PW | INT_PTH);
    /// Both temperature comparator sources
    pub const TEMPERATURE_AXIS: Self = Self(INT_TW | INT_TTH);

    /// No sources
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Wrap a raw byte
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw byte
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// All of `other` present
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Any of `other` present
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// No bits set
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Sources {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// CTRL_REG4: per-source interrupt enables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ctrl4(u8);

byte_register!(Ctrl4, REG_CTRL4);

impl Ctrl4 {
    /// Sources currently enabled
    pub const fn enabled(self) -> Sources {
        Sources(self.0)
    }

    /// Enable `sources`, keep the rest
    pub const fn enable(self, sources: Sources) -> Self {
        Self(self.0 | sources.0)
    }
}

/// CTRL_REG5: per-source routing, bit set = INT1, clear = INT2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ctrl5(u8);

byte_register!(Ctrl5, REG_CTRL5);

impl Ctrl5 {
    /// Sources routed to INT1
    pub const fn routed_to_int1(self) -> Sources {
        Sources(self.0)
    }

    /// Route `sources` to INT1, keep the rest
    pub const fn route_to_int1(self, sources: Sources) -> Self {
        Self(self.0 | sources.0)
    }
}

/// PT_DATA_CFG: data event flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PtDataCfg(u8);

byte_register!(PtDataCfg, REG_PT_DATA_CFG);

impl PtDataCfg {
    /// DREM set
    pub const fn event_mode(self) -> bool {
        self.0 & PT_DATA_CFG_DREM != 0
    }

    /// PDEFE set
    pub const fn pressure_events(self) -> bool {
        self.0 & PT_DATA_CFG_PDEFE != 0
    }

    /// TDEFE set
    pub const fn temperature_events(self) -> bool {
        self.0 & PT_DATA_CFG_TDEFE != 0
    }

    /// Set DREM plus PDEFE
    pub const fn enable_pressure_events(self) -> Self {
        Self(self.0 | PT_DATA_CFG_DREM | PT_DATA_CFG_PDEFE)
    }

    /// Set DREM plus TDEFE
    pub const fn enable_temperature_events(self) -> Self {
        Self(self.0 | PT_DATA_CFG_DREM | PT_DATA_CFG_TDEFE)
    }
}

/// INT_SOURCE: read-only, clears on read of the flagged data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntSource(u8);

byte_register!(IntSource, REG_INT_SOURCE);

impl IntSource {
    /// Sources that fired
    pub const fn sources(self) -> Sources {
        Sources(self.0)
    }

    /// SRC_DRDY set
    pub const fn data_ready(self) -> bool {
        self.0 & INT_DRDY != 0
    }
}

const fn set_bits(byte: u8, mask: u8, on: bool) -> u8 {
    if on {
        byte | mask
    } else {
        byte & !mask
    }
}
