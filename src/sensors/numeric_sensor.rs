//! Offset, scale and pause normalization over a raw reading source.
//!
//! The value reported by a [`NumericSensor`] is always
//! `(paused ? pause_value : raw + offset) * scale_factor`.
//! The scale factor is applied only at read time, so changing it never
//! rescales the stored offset or frozen value.

use super::{GettableNumber, PidSource, PidSourceType, RawReading};
use crate::error::{Result, SensorError};
use log::{debug, warn};

/// Numeric sensor state wrapped around a raw source.
///
/// Single-threaded: mutation goes through `&mut self`. Use
/// [`SharedNumericSensor`](super::SharedNumericSensor) when the sensor is
/// sampled from more than one thread.
///
/// # Example
/// ```
/// use numeric_sensor::sources::SimulatedSource;
/// use numeric_sensor::NumericSensor;
///
/// let raw = SimulatedSource::new(10.0);
/// let mut sensor = NumericSensor::new(raw.clone());
///
/// sensor.set(5.0);
/// assert_eq!(sensor.get(), 5.0);
///
/// sensor.pause();
/// raw.set_raw(99.0);
/// assert_eq!(sensor.get(), 5.0);
///
/// sensor.unpause();
/// assert_eq!(sensor.get(), 5.0);
/// ```
#[derive(Debug, Clone)]
pub struct NumericSensor<S> {
    source: S,
    offset: f64,
    pause_value: f64,
    scale_factor: f64,
    is_paused: bool,
    pid_source_type: PidSourceType,
}

impl<S: RawReading> NumericSensor<S> {
    /// Create a sensor with zero offset, unit scale, not paused.
    pub fn new(source: S) -> Self {
        Self {
            source,
            offset: 0.0,
            pause_value: 0.0,
            scale_factor: 1.0,
            is_paused: false,
            pid_source_type: PidSourceType::default(),
        }
    }

    /// Set the initial offset.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Set the initial scale factor.
    pub fn with_scale_factor(mut self, scale: f64) -> Self {
        self.scale_factor = scale;
        self
    }

    /// Set the initial PID source type.
    pub fn with_pid_source_type(mut self, kind: PidSourceType) -> Self {
        self.pid_source_type = kind;
        self
    }

    /// Get the unprocessed reading from the underlying source.
    pub fn raw_reading(&self) -> f64 {
        self.source.raw_reading()
    }

    /// Get the normalized, scaled reading.
    pub fn get(&self) -> f64 {
        if self.is_paused {
            return self.pause_value * self.scale_factor;
        }
        (self.source.raw_reading() + self.offset) * self.scale_factor
    }

    /// Like [`get`](Self::get), but rejects a non-finite raw reading.
    ///
    /// A paused sensor returns its frozen value without touching the source.
    pub fn checked_get(&self) -> Result<f64> {
        if self.is_paused {
            return Ok(self.pause_value * self.scale_factor);
        }
        let raw = self.source.raw_reading();
        if !raw.is_finite() {
            warn!("Rejected non-finite raw reading: {}", raw);
            return Err(SensorError::NonFiniteReading(raw));
        }
        Ok((raw + self.offset) * self.scale_factor)
    }

    /// Make the sensor currently read `value` (before scaling).
    ///
    /// Later readings move relative to this new baseline.
    pub fn set(&mut self, value: f64) {
        self.offset = value - self.source.raw_reading();
        debug!("Sensor set to {} (offset {})", value, self.offset);
    }

    /// Like [`set`](Self::set), but rejects a non-finite target.
    pub fn checked_set(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(SensorError::NonFiniteValue(value));
        }
        self.set(value);
        Ok(())
    }

    /// Zero the sensor at its current position.
    pub fn reset(&mut self) {
        self.set(0.0);
    }

    /// Freeze the current unscaled reading.
    ///
    /// Calling this while already paused re-freezes at the latest reading.
    pub fn pause(&mut self) {
        self.pause_value = self.source.raw_reading() + self.offset;
        self.is_paused = true;
        debug!("Sensor paused at {}", self.pause_value);
    }

    /// Resume reading, continuing from the frozen value.
    pub fn unpause(&mut self) {
        self.is_paused = false;
        self.set(self.pause_value);
        debug!("Sensor unpaused from {}", self.pause_value);
    }

    /// Replace the multiplier applied in [`get`](Self::get).
    pub fn set_scale_factor(&mut self, scale: f64) {
        self.scale_factor = scale;
        debug!("Sensor scale factor set to {}", scale);
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn pause_value(&self) -> f64 {
        self.pause_value
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Get the wrapped raw source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get the wrapped raw source mutably.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<S: RawReading> GettableNumber for NumericSensor<S> {
    fn get(&self) -> f64 {
        NumericSensor::get(self)
    }
}

impl<S: RawReading> PidSource for NumericSensor<S> {
    fn pid_get(&self) -> f64 {
        self.get()
    }

    fn set_pid_source_type(&mut self, kind: PidSourceType) {
        self.pid_source_type = kind;
    }

    fn pid_source_type(&self) -> PidSourceType {
        self.pid_source_type
    }
}
