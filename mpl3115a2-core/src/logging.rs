//! Optional logging hooks
//!
//! The driver emits records through the `log` facade when the `log` feature
//! is enabled. Without it every macro expands to nothing, so no formatting
//! code ends up in size-constrained builds. Installing a logger is the host's
//! job.

#[cfg(feature = "log")]
macro_rules! drv_trace {
    ($($arg:tt)*) => { log::trace!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! drv_trace {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! drv_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! drv_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! drv_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! drv_warn {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! drv_error {
    ($($arg:tt)*) => { log::error!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! drv_error {
    ($($arg:tt)*) => {};
}
