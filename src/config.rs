use crate::error::{Result, SensorError};
use crate::sensors::{NumericSensor, PidSourceType, RawReading};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Parse one `.env` line into a key/value pair.
///
/// Blank lines and `#` comments yield `None`. Values may contain spaces
/// without quoting; surrounding single or double quotes are stripped.
pub fn parse_dotenv_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let mut value = value.trim();
    if key.is_empty() {
        return None;
    }

    if value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
    {
        value = &value[1..value.len() - 1];
    }

    Some((key, value))
}

/// Load environment variables from a `.env` file in the working directory.
///
/// Variables already present in the environment take precedence.
/// Returns the number of variables that were set.
pub fn load_dotenv() -> usize {
    load_dotenv_from(Path::new(".env"))
}

/// Load environment variables from the given dotenv file.
pub fn load_dotenv_from(path: &Path) -> usize {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return 0,
    };

    let mut loaded = 0;
    for (key, value) in content.lines().filter_map(parse_dotenv_line) {
        if std::env::var(key).is_err() {
            // SAFETY: Called at startup before any other thread reads the environment
            unsafe { std::env::set_var(key, value) };
            loaded += 1;
        }
    }
    loaded
}

/// Initial settings for a numeric sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    pub offset: f64,
    pub scale_factor: f64,
    pub pid_source_type: PidSourceType,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            offset: 0.0,
            scale_factor: 1.0,
            pid_source_type: PidSourceType::Displacement,
        }
    }
}

impl SensorConfig {
    /// Read `SENSOR_OFFSET`, `SENSOR_SCALE_FACTOR` and `SENSOR_PID_SOURCE_TYPE`.
    pub fn from_env() -> Self {
        Self::from_env_prefixed("SENSOR")
    }

    /// Read `{PREFIX}_OFFSET`, `{PREFIX}_SCALE_FACTOR` and
    /// `{PREFIX}_PID_SOURCE_TYPE`, one prefix per physical sensor.
    pub fn from_env_prefixed(prefix: &str) -> Self {
        Self::from_lookup(prefix, |key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    ///
    /// Missing or unparseable values keep their defaults.
    pub fn from_lookup(prefix: &str, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        let key = format!("{prefix}_OFFSET");
        if let Some(offset) = lookup(&key) {
            match offset.trim().parse() {
                Ok(o) => config.offset = o,
                Err(_) => warn!("Ignoring unparseable {}: {:?}", key, offset),
            }
        }

        let key = format!("{prefix}_SCALE_FACTOR");
        if let Some(scale) = lookup(&key) {
            match scale.trim().parse() {
                Ok(s) => config.scale_factor = s,
                Err(_) => warn!("Ignoring unparseable {}: {:?}", key, scale),
            }
        }

        let key = format!("{prefix}_PID_SOURCE_TYPE");
        if let Some(kind) = lookup(&key) {
            match PidSourceType::from_name(&kind) {
                Ok(k) => config.pid_source_type = k,
                Err(e) => warn!("Ignoring {}: {}", key, e),
            }
        }

        config
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Reject non-finite offset or scale factor.
    pub fn validate(&self) -> Result<()> {
        if !self.offset.is_finite() {
            return Err(SensorError::InvalidConfig(format!(
                "offset must be finite, got {}",
                self.offset
            )));
        }
        if !self.scale_factor.is_finite() {
            return Err(SensorError::InvalidConfig(format!(
                "scale_factor must be finite, got {}",
                self.scale_factor
            )));
        }
        Ok(())
    }

    /// Create a sensor around `source` with these settings.
    pub fn build<S: RawReading>(&self, source: S) -> NumericSensor<S> {
        NumericSensor::new(source)
            .with_offset(self.offset)
            .with_scale_factor(self.scale_factor)
            .with_pid_source_type(self.pid_source_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::PidSource;
    use crate::sources::SimulatedSource;
    use std::collections::HashMap;
    use tokio_test::{assert_err, assert_ok};

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_parse_dotenv_line() {
        assert_eq!(parse_dotenv_line("A=1"), Some(("A", "1")));
        assert_eq!(parse_dotenv_line("  NAME = left drive  "), Some(("NAME", "left drive")));
        assert_eq!(parse_dotenv_line("Q=\"quoted value\""), Some(("Q", "quoted value")));
        assert_eq!(parse_dotenv_line("S='x'"), Some(("S", "x")));
        assert_eq!(parse_dotenv_line("URL=a=b"), Some(("URL", "a=b")));
        assert_eq!(parse_dotenv_line("# comment"), None);
        assert_eq!(parse_dotenv_line(""), None);
        assert_eq!(parse_dotenv_line("no_equals"), None);
        assert_eq!(parse_dotenv_line("=value"), None);
    }

    #[test]
    fn test_load_dotenv_missing_file() {
        assert_eq!(load_dotenv_from(Path::new("/nonexistent/numeric-sensor/.env")), 0);
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = SensorConfig::from_lookup("SENSOR", |_| None);
        assert_eq!(config, SensorConfig::default());
    }

    #[test]
    fn test_from_lookup_reads_prefixed_keys() {
        let lookup = lookup_from(&[
            ("GYRO_OFFSET", "-90"),
            ("GYRO_SCALE_FACTOR", " 0.5 "),
            ("GYRO_PID_SOURCE_TYPE", "Rate"),
            ("SENSOR_OFFSET", "1"),
        ]);
        let config = SensorConfig::from_lookup("GYRO", lookup);
        assert_eq!(config.offset, -90.0);
        assert_eq!(config.scale_factor, 0.5);
        assert_eq!(config.pid_source_type, PidSourceType::Rate);
    }

    #[test]
    fn test_from_lookup_ignores_unparseable() {
        let lookup = lookup_from(&[
            ("SENSOR_OFFSET", "abc"),
            ("SENSOR_SCALE_FACTOR", "2"),
            ("SENSOR_PID_SOURCE_TYPE", "velocity"),
        ]);
        let config = SensorConfig::from_lookup("SENSOR", lookup);
        assert_eq!(config.offset, 0.0);
        assert_eq!(config.scale_factor, 2.0);
        assert_eq!(config.pid_source_type, PidSourceType::Displacement);
    }

    #[test]
    fn test_from_json_str() {
        let config = assert_ok!(SensorConfig::from_json_str(
            r#"{"scale_factor": 0.01, "pid_source_type": "rate"}"#
        ));
        assert_eq!(config.offset, 0.0);
        assert_eq!(config.scale_factor, 0.01);
        assert_eq!(config.pid_source_type, PidSourceType::Rate);
    }

    #[test]
    fn test_from_json_str_errors() {
        let err = assert_err!(SensorConfig::from_json_str("{not json"));
        assert!(matches!(err, SensorError::SerdeJsonError(_)));

        let err = assert_err!(SensorConfig::from_json_str(
            r#"{"pid_source_type": "velocity"}"#
        ));
        assert!(matches!(err, SensorError::SerdeJsonError(_)));
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let config = SensorConfig {
            scale_factor: f64::INFINITY,
            ..SensorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SensorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_file_missing() {
        let err = assert_err!(SensorConfig::from_file(Path::new(
            "/nonexistent/numeric-sensor/sensor.json"
        )));
        assert!(matches!(err, SensorError::IoError(_)));
    }

    #[test]
    fn test_build_applies_settings() {
        let config = SensorConfig {
            offset: 2.0,
            scale_factor: 3.0,
            pid_source_type: PidSourceType::Rate,
        };
        let sensor = config.build(SimulatedSource::new(1.0));
        assert_eq!(sensor.get(), 9.0);
        assert_eq!(sensor.pid_source_type(), PidSourceType::Rate);
    }
}
