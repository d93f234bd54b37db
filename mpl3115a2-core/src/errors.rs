//! Driver Error Types
//!
//! ## Error Categories
//!
//! ### Fatal (initialization only)
//! - `LineAttach`: an interrupt line could not be configured
//! - `IdentityMismatch`: the device at the address is not an MPL3115A2
//!
//! No handle is ever constructed after a fatal error, so there is no degraded
//! mode to reason about. The host decides whether to abort, retry on another
//! bus, or carry on without the sensor. `status_code()` gives the process exit
//! status historically used for each cause.
//!
//! ### Transport
//! - `Bus`: the register bus failed
//! - `Line`: sampling a digital line failed
//!
//! ### Conversion
//! - `ConversionFailed`: INT_SOURCE did not report data ready. Only returned
//!   under `FailurePolicy::Error`; the default policy reports 0.0 instead.
//!
//! Unexpected interrupt sources are not errors; they are logged and dropped.
//!
//! ## Handling
//!
//! ```rust
//! use mpl3115a2_core::Error;
//!
//! fn on_init_failure(err: Error<(), ()>) -> i32 {
//!     match err.status_code() {
//!         Some(code) => i32::from(code),
//!         None => 1,
//!     }
//! }
//! # assert_eq!(on_init_failure(Error::IdentityMismatch { found: 0, expected: 0xC4 }), 300);
//! ```

use core::fmt::Debug;

use thiserror_no_std::Error;

use crate::traits::LineRole;
use crate::trigger::MeasurementMode;

/// Result type for driver operations
pub type DriverResult<T, BE, LE> = Result<T, Error<BE, LE>>;

/// Driver errors, generic over the bus error `BE` and line error `LE`
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<BE: Debug, LE: Debug> {
    /// Register bus transfer failed
    #[error("register bus error: {0:?}")]
    Bus(BE),

    /// Sampling a digital line failed
    #[error("digital line error: {0:?}")]
    Line(LE),

    /// An interrupt line could not be attached during initialization
    #[error("failed to attach {line} line: {cause:?}")]
    LineAttach {
        /// Which line failed
        line: LineRole,
        /// Error reported by the line
        cause: LE,
    },

    /// WHO_AM_I did not match the MPL3115A2 signature
    #[error("WHO_AM_I returned {found:#04x}, expected {expected:#04x}")]
    IdentityMismatch {
        /// Value read from the device
        found: u8,
        /// Value the driver expects
        expected: u8,
    },

    /// INT_SOURCE did not report data ready after a conversion
    #[error("{mode:?} conversion did not report data ready")]
    ConversionFailed {
        /// The measurement that was requested
        mode: MeasurementMode,
    },
}

impl<BE: Debug, LE: Debug> Error<BE, LE> {
    /// True for errors that leave the driver unusable
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::LineAttach { .. } | Self::IdentityMismatch { .. })
    }

    /// Process exit status for fatal errors
    ///
    /// 200 = INT1 attach, 201 = INT2 attach, 300 = identity mismatch.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::LineAttach { line: LineRole::Int1, .. } => Some(200),
            Self::LineAttach { line: LineRole::Int2, .. } => Some(201),
            Self::IdentityMismatch { .. } => Some(300),
            _ => None,
        }
    }
}

#[cfg(feature = "defmt")]
impl<BE: Debug, LE: Debug> defmt::Format for Error<BE, LE> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Bus(e) =>
                defmt::write!(fmt, "Bus error: {}", defmt::Debug2Format(e)),
            Self::Line(e) =>
                defmt::write!(fmt, "Line error: {}", defmt::Debug2Format(e)),
            Self::LineAttach { line, cause } =>
                defmt::write!(fmt, "Attach {} failed: {}", line, defmt::Debug2Format(cause)),
            Self::IdentityMismatch { found, expected } =>
                defmt::write!(fmt, "WHO_AM_I {=u8:#x}, expected {=u8:#x}", found, expected),
            Self::ConversionFailed { mode } =>
                defmt::write!(fmt, "{} conversion failed", mode),
        }
    }
}
