use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum SensorError {
    #[error("Sensor produced a non-finite raw reading: {0}")]
    NonFiniteReading(f64),

    #[error("Cannot set sensor to a non-finite value: {0}")]
    NonFiniteValue(f64),

    #[error("Unknown PID source type: {0}")]
    UnknownSourceType(String),

    #[error("Invalid sensor configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SensorError>;
