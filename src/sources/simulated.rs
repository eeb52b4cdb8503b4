//! Simulated raw source for testing.
//!
//! Provides a settable raw value and a task that ramps it over time, for
//! development without hardware attached.

use crate::sensors::RawReading;
use log::debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::task::JoinHandle;
use tokio::time::{Duration, interval};

/// Settable raw reading shared between a sensor and whatever drives it.
///
/// Cloning returns another handle to the same value, so a test or
/// simulation task can move the "hardware" while the sensor owns a handle.
/// The value is stored as `f64` bits in an atomic.
#[derive(Debug, Clone)]
pub struct SimulatedSource {
    bits: Arc<AtomicU64>,
}

impl SimulatedSource {
    pub fn new(initial: f64) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(initial.to_bits())),
        }
    }

    /// Replace the raw value.
    pub fn set_raw(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::SeqCst);
    }

    /// Add `delta` to the raw value and return the new value.
    pub fn add(&self, delta: f64) -> f64 {
        let mut current = self.bits.load(Ordering::SeqCst);
        loop {
            let next = f64::from_bits(current) + delta;
            match self.bits.compare_exchange_weak(
                current,
                next.to_bits(),
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return next,
                Err(actual) => current = actual,
            }
        }
    }
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl RawReading for SimulatedSource {
    fn raw_reading(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::SeqCst))
    }
}

/// Spawn a task that adds `step` to the source every `period`.
///
/// Mimics an encoder on a shaft turning at constant speed.
///
/// # Returns
///
/// A `JoinHandle` that can be used to abort the simulation task.
pub fn run_ramp_simulation(source: SimulatedSource, step: f64, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = interval(period);
        // First tick completes immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            let raw = source.add(step);
            debug!("[Sim] Raw reading ramped to {}", raw);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_read() {
        let source = SimulatedSource::new(1.5);
        assert_eq!(source.raw_reading(), 1.5);
        source.set_raw(-8.0);
        assert_eq!(source.raw_reading(), -8.0);
    }

    #[test]
    fn test_clones_share_value() {
        let source = SimulatedSource::default();
        let handle = source.clone();
        handle.set_raw(3.0);
        assert_eq!(source.raw_reading(), 3.0);
        assert_eq!(source.add(0.5), 3.5);
        assert_eq!(handle.raw_reading(), 3.5);
    }

    #[test]
    fn test_nan_round_trips() {
        let source = SimulatedSource::new(f64::NAN);
        assert!(source.raw_reading().is_nan());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ramp_simulation_advances() {
        let source = SimulatedSource::new(0.0);
        let task = run_ramp_simulation(source.clone(), 2.0, Duration::from_millis(10));

        tokio::time::sleep(Duration::from_millis(35)).await;
        task.abort();

        assert_eq!(source.raw_reading(), 6.0);
    }
}
