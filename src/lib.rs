//! Numeric sensor library.
//!
//! This library normalizes raw numeric sensor readings through an offset,
//! a scale factor and a pause mechanism, and exposes the result to
//! closed-loop controllers as a feedback source.

pub mod config;
pub mod error;
pub mod sensors;
pub mod sources;

pub use error::{Result, SensorError};
pub use sensors::{
    GettableNumber, NumericSensor, PidSource, PidSourceType, RawReading, SharedNumericSensor,
};
