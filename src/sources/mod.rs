//! Raw reading sources that are not hardware drivers.
//!
//! Concrete drivers live with the framework that owns the hardware bus.
//! These sources adapt closures and simulated values so sensors can be
//! exercised without hardware.

pub mod simulated;

pub use simulated::{SimulatedSource, run_ramp_simulation};

use crate::sensors::RawReading;

/// Adapts a closure to [`RawReading`].
///
/// # Example
/// ```
/// use numeric_sensor::sources::FnSource;
/// use numeric_sensor::NumericSensor;
///
/// let sensor = NumericSensor::new(FnSource::new(|| 42.0));
/// assert_eq!(sensor.get(), 42.0);
/// ```
pub struct FnSource<F> {
    read: F,
}

impl<F: Fn() -> f64> FnSource<F> {
    pub fn new(read: F) -> Self {
        Self { read }
    }
}

impl<F: Fn() -> f64> RawReading for FnSource<F> {
    fn raw_reading(&self) -> f64 {
        (self.read)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::NumericSensor;
    use std::cell::Cell;

    #[test]
    fn test_fn_source_reads_closure() {
        let ticks = Cell::new(0.0);
        let source = FnSource::new(|| ticks.get());
        let mut sensor = NumericSensor::new(&source);

        ticks.set(100.0);
        sensor.set(0.0);
        ticks.set(130.0);
        assert_eq!(sensor.get(), 30.0);
    }

    #[test]
    fn test_boxed_source() {
        let source: Box<dyn RawReading> = Box::new(FnSource::new(|| -2.5));
        let sensor = NumericSensor::new(source).with_scale_factor(4.0);
        assert_eq!(sensor.get(), -10.0);
    }
}
