//! Thread-safe sharing of one device handle
//!
//! Every register sequence on `Mpl3115a2` needs `&mut self`. `SharedSensor`
//! puts the handle behind one mutex so foreground reads, threshold setters and
//! event dispatch from different threads each run as a whole.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use embedded_hal::delay::DelayNs;

use crate::decoder::PhysicalValue;
use crate::device::{DeviceResult, Mpl3115a2};
use crate::interrupt::ThresholdEvent;
use crate::traits::{DigitalLine, EdgeSource, RegisterBus};
use crate::trigger::MeasurementMode;

/// Cloneable handle to a device shared between threads
pub struct SharedSensor<B, L1, L2, D>
where
    B: RegisterBus,
    L1: EdgeSource,
    L2: DigitalLine<Error = L1::Error>,
    D: DelayNs,
{
    inner: Arc<Mutex<Mpl3115a2<B, L1, L2, D>>>,
}

impl<B, L1, L2, D> Clone for SharedSensor<B, L1, L2, D>
where
    B: RegisterBus,
    L1: EdgeSource,
    L2: DigitalLine<Error = L1::Error>,
    D: DelayNs,
{
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<B, L1, L2, D> SharedSensor<B, L1, L2, D>
where
    B: RegisterBus,
    L1: EdgeSource,
    L2: DigitalLine<Error = L1::Error>,
    D: DelayNs,
{
    /// Take ownership of an initialized device
    pub fn new(device: Mpl3115a2<B, L1, L2, D>) -> Self {
        Self { inner: Arc::new(Mutex::new(device)) }
    }

    // A panic mid-sequence leaves the chip in some intermediate register
    // state, which the next trigger sequence overwrites anyway.
    fn lock(&self) -> MutexGuard<'_, Mpl3115a2<B, L1, L2, D>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the device
    pub fn with<R>(&self, f: impl FnOnce(&mut Mpl3115a2<B, L1, L2, D>) -> R) -> R {
        f(&mut self.lock())
    }

    /// `Mpl3115a2::read` under the lock
    pub fn read(&self, mode: MeasurementMode) -> DeviceResult<PhysicalValue, B, L1> {
        self.lock().read(mode)
    }

    /// `Mpl3115a2::dispatch_pending` under the lock
    ///
    /// `on_event` runs while the lock is held; it must not call back into this
    /// handle.
    pub fn dispatch_pending<F>(&self, on_event: F) -> DeviceResult<usize, B, L1>
    where
        F: FnMut(ThresholdEvent),
    {
        self.lock().dispatch_pending(on_event)
    }

    /// Recover the device once every other clone is gone
    pub fn into_inner(self) -> Option<Mpl3115a2<B, L1, L2, D>> {
        Arc::try_unwrap(self.inner)
            .ok()
            .map(|m| m.into_inner().unwrap_or_else(PoisonError::into_inner))
    }
}
