//! Feedback-source contract for closed-loop controllers.
//!
//! A controller samples [`PidSource::pid_get`] every loop iteration and uses
//! [`PidSourceType`] to decide whether the value is a rate or a position.

use crate::error::{Result, SensorError};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// What the feedback value represents.
///
/// The exact interpretation belongs to the controller consuming it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PidSourceType {
    /// Rate of change (e.g. angular velocity).
    Rate,
    /// Absolute displacement (e.g. distance travelled, heading).
    #[default]
    Displacement,
}

impl PidSourceType {
    /// Parse a source type by name, case-insensitively.
    pub fn from_name(name: &str) -> Result<Self> {
        name.trim()
            .parse()
            .map_err(|_| SensorError::UnknownSourceType(name.to_string()))
    }
}

/// Trait for feedback sources sampled by a closed-loop controller.
pub trait PidSource {
    /// Get the value the controller should treat as its process variable.
    fn pid_get(&self) -> f64;

    /// Set what kind of value [`pid_get`](Self::pid_get) reports.
    fn set_pid_source_type(&mut self, kind: PidSourceType);

    /// Get what kind of value [`pid_get`](Self::pid_get) reports.
    fn pid_source_type(&self) -> PidSourceType;
}
