//! Numeric sensor normalization.
//!
//! A [`NumericSensor`] wraps any [`RawReading`] source and applies an offset,
//! a read-time scale factor and a pause/freeze toggle to it. The normalized
//! value is exposed through two small interfaces: [`GettableNumber`] for
//! logic code and [`PidSource`] for closed-loop controllers.
//!
//! [`SharedNumericSensor`] is the thread-safe variant for frameworks that
//! sample the same sensor from more than one control thread.

pub mod numeric_sensor;
pub mod pid_source;
pub mod shared;

use std::sync::Arc;

pub use numeric_sensor::NumericSensor;
pub use pid_source::{PidSource, PidSourceType};
pub use shared::SharedNumericSensor;

/// Trait for anything that produces an unprocessed numeric reading.
///
/// Implemented by concrete sensor sources (encoders, gyros, potentiometers).
/// There is no error path: whatever the hardware reports is returned as-is,
/// including NaN or infinities.
pub trait RawReading {
    /// Get the raw reading, before offset and scale are applied.
    fn raw_reading(&self) -> f64;
}

/// Trait for values that can be read as a number.
pub trait GettableNumber {
    fn get(&self) -> f64;
}

impl<T: RawReading + ?Sized> RawReading for &T {
    fn raw_reading(&self) -> f64 {
        (**self).raw_reading()
    }
}

impl<T: RawReading + ?Sized> RawReading for Box<T> {
    fn raw_reading(&self) -> f64 {
        (**self).raw_reading()
    }
}

impl<T: RawReading + ?Sized> RawReading for Arc<T> {
    fn raw_reading(&self) -> f64 {
        (**self).raw_reading()
    }
}
