use serde::{Deserialize, Serialize};
use std::path::Path;

use common::types::buffers::rolling_window::DEFAULT_WINDOW_CAPACITY;
use common::types::{SensorType, UpdateInterval};

use crate::models::errors::SensorError;

const DEFAULT_SENSOR: &str = "gyroscope";

/// Settings of one sensor monitor.
///
/// Missing fields take their default value:
///
/// ```
/// use motion_sensors::MonitorConfig;
///
/// let config = MonitorConfig::from_json_str(r#"{ "sensor": "accelerometer", "capacity": 50 }"#).unwrap();
/// assert_eq!(config.capacity, 50);
/// assert_eq!(config.update_interval_millis, 100);
/// assert!(config.seed_with_zero);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Sensor to read, e.g. "gyroscope" or "accelerometer"
    pub sensor: String,
    /// Number of samples kept in the rolling window
    pub capacity: usize,
    /// Requested time between samples
    pub update_interval_millis: u64,
    /// Start the window with one zero sample so the first chart has data
    pub seed_with_zero: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            sensor: DEFAULT_SENSOR.to_string(),
            capacity: DEFAULT_WINDOW_CAPACITY,
            update_interval_millis: UpdateInterval::default().as_millis(),
            seed_with_zero: true,
        }
    }
}

impl MonitorConfig {
    /// Default settings for `sensor_type`.
    pub fn for_sensor(sensor_type: &SensorType) -> Self {
        Self {
            sensor: sensor_type.to_string(),
            ..Self::default()
        }
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, SensorError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SensorError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_file(file_path: impl AsRef<Path>) -> Result<Self, SensorError> {
        let file_path = file_path.as_ref();
        let json = std::fs::read_to_string(file_path)
            .map_err(|e| SensorError::Config(format!("{}: {}", file_path.display(), e)))?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), SensorError> {
        self.sensor_type()?;
        if self.capacity == 0 {
            return Err(SensorError::InvalidCapacity(self.capacity));
        }
        self.update_interval()?;
        Ok(())
    }

    pub fn sensor_type(&self) -> Result<SensorType, SensorError> {
        SensorType::try_from(self.sensor.as_str()).map_err(SensorError::Config)
    }

    pub fn update_interval(&self) -> Result<UpdateInterval, SensorError> {
        UpdateInterval::try_from(self.update_interval_millis)
            .map_err(|_| SensorError::InvalidInterval(self.update_interval_millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = MonitorConfig::default();
        assert_eq!(config.sensor_type().unwrap(), SensorType::Gyroscope);
        assert_eq!(config.capacity, 20);
        assert_eq!(config.update_interval().unwrap(), UpdateInterval::default());
        assert!(config.seed_with_zero);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_for_sensor() {
        let config = MonitorConfig::for_sensor(&SensorType::Accelerometer);
        assert_eq!(config.sensor_type().unwrap(), SensorType::Accelerometer);
    }

    #[test]
    fn test_from_json_str() {
        let config = MonitorConfig::from_json_str(
            r#"{"sensor": "Gyro", "capacity": 5, "update_interval_millis": 16, "seed_with_zero": false}"#,
        )
        .unwrap();
        assert_eq!(config.sensor_type().unwrap(), SensorType::Gyroscope);
        assert_eq!(config.capacity, 5);
        assert_eq!(config.update_interval().unwrap(), UpdateInterval::FAST);
        assert!(!config.seed_with_zero);
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(
            MonitorConfig::from_json_str("{}").unwrap(),
            MonitorConfig::default()
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert_eq!(
            MonitorConfig::from_json_str(r#"{"capacity": 0}"#),
            Err(SensorError::InvalidCapacity(0))
        );
        assert_eq!(
            MonitorConfig::from_json_str(r#"{"update_interval_millis": 0}"#),
            Err(SensorError::InvalidInterval(0))
        );
        assert!(matches!(
            MonitorConfig::from_json_str(r#"{"sensor": ""}"#),
            Err(SensorError::Config(_))
        ));
        assert!(matches!(
            MonitorConfig::from_json_str(r#"{"update_interval_millis": "fast"}"#),
            Err(SensorError::Config(_))
        ));
    }

    #[test]
    fn test_from_missing_file() {
        assert!(matches!(
            MonitorConfig::from_file("./does_not_exist.json"),
            Err(SensorError::Config(_))
        ));
    }
}
