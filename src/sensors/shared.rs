//! Thread-safe numeric sensor handle.
//!
//! Provides shared state for a [`NumericSensor`] that can be read by a
//! control loop on one thread and re-zeroed, paused or rescaled from another.
//!
//! All mutable fields live behind a single lock so `pause()`/`unpause()` are
//! atomic with respect to readers. A version counter lets consumers detect
//! baseline changes without comparing values.

use super::{GettableNumber, NumericSensor, PidSource, PidSourceType, RawReading};
use crate::error::Result;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

/// Thread-safe numeric sensor.
///
/// Wrap it in an `Arc` to share between threads. Every operation that
/// changes the baseline (set, reset, pause, unpause, scale, source type)
/// increments the version; reads never do.
///
/// # Example
/// ```ignore
/// let sensor = Arc::new(SharedNumericSensor::new(encoder));
///
/// // Control thread
/// let feedback = sensor.pid_get();
///
/// // Operator thread
/// sensor.reset();
/// ```
pub struct SharedNumericSensor<S> {
    inner: Mutex<NumericSensor<S>>,
    version: AtomicU32,
}

impl<S: RawReading> SharedNumericSensor<S> {
    /// Create a shared sensor around a raw source with default settings.
    pub fn new(source: S) -> Self {
        Self::from_sensor(NumericSensor::new(source))
    }

    /// Wrap an already configured sensor.
    pub fn from_sensor(sensor: NumericSensor<S>) -> Self {
        Self {
            inner: Mutex::new(sensor),
            version: AtomicU32::new(0),
        }
    }

    /// Get the current version number.
    pub fn version(&self) -> u32 {
        self.version.load(Ordering::SeqCst)
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut NumericSensor<S>) -> R) -> R {
        let result = f(&mut self.inner.lock());
        self.version.fetch_add(1, Ordering::SeqCst);
        result
    }

    pub fn get(&self) -> f64 {
        self.inner.lock().get()
    }

    pub fn checked_get(&self) -> Result<f64> {
        self.inner.lock().checked_get()
    }

    pub fn set(&self, value: f64) {
        self.mutate(|s| s.set(value));
    }

    /// Set the sensor value. Leaves the version untouched on error.
    pub fn checked_set(&self, value: f64) -> Result<()> {
        let mut sensor = self.inner.lock();
        sensor.checked_set(value)?;
        self.version.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    pub fn reset(&self) {
        self.mutate(|s| s.reset());
    }

    pub fn pause(&self) {
        self.mutate(|s| s.pause());
    }

    pub fn unpause(&self) {
        self.mutate(|s| s.unpause());
    }

    pub fn set_scale_factor(&self, scale: f64) {
        self.mutate(|s| s.set_scale_factor(scale));
    }

    pub fn is_paused(&self) -> bool {
        self.inner.lock().is_paused()
    }

    pub fn scale_factor(&self) -> f64 {
        self.inner.lock().scale_factor()
    }

    pub fn offset(&self) -> f64 {
        self.inner.lock().offset()
    }

    pub fn pause_value(&self) -> f64 {
        self.inner.lock().pause_value()
    }

    pub fn set_pid_source_type(&self, kind: PidSourceType) {
        self.mutate(|s| s.set_pid_source_type(kind));
    }

    pub fn pid_source_type(&self) -> PidSourceType {
        self.inner.lock().pid_source_type()
    }

    /// Run a compound update under the lock. Counts as one baseline change.
    pub fn with_sensor<R>(&self, f: impl FnOnce(&mut NumericSensor<S>) -> R) -> R {
        self.mutate(f)
    }

    /// Read several fields under one lock without touching the version.
    pub fn inspect<R>(&self, f: impl FnOnce(&NumericSensor<S>) -> R) -> R {
        f(&self.inner.lock())
    }

    /// Unwrap into the single-threaded sensor.
    pub fn into_inner(self) -> NumericSensor<S> {
        self.inner.into_inner()
    }
}

impl<S: RawReading> GettableNumber for SharedNumericSensor<S> {
    fn get(&self) -> f64 {
        SharedNumericSensor::get(self)
    }
}

impl<S: RawReading> PidSource for SharedNumericSensor<S> {
    fn pid_get(&self) -> f64 {
        self.get()
    }

    fn set_pid_source_type(&mut self, kind: PidSourceType) {
        SharedNumericSensor::set_pid_source_type(self, kind);
    }

    fn pid_source_type(&self) -> PidSourceType {
        SharedNumericSensor::pid_source_type(self)
    }
}
