use std::fmt;

/// Represents different types of motion sensors.
///
/// # Variants
///
/// - `Accelerometer`: Represents an accelerometer sensor.
/// - `Gyroscope`: Represents a gyroscope sensor.
/// - `Magnetometer`: Represents a magnetometer sensor.
/// - `Other(String)`: Represents any other type of sensor, with a custom string description.
///
/// # Examples
///
/// ```
/// use common::types::sensors::SensorType;
///
/// let sensor = SensorType::try_from("gyroscope").unwrap();
/// assert_eq!(sensor, SensorType::Gyroscope);
///
/// let sensor = SensorType::try_from("Barometer").unwrap();
/// assert_eq!(sensor, SensorType::Other(String::from("barometer")));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd)]
pub enum SensorType {
    Accelerometer,
    Gyroscope,
    Magnetometer,
    Other(String),
}

impl SensorType {
    /// Heading shown above the live reading of this sensor.
    pub fn caption(&self) -> String {
        match self {
            SensorType::Accelerometer => {
                "Accelerometer: (in Gs where 1 G = 9.81 m s^-2)".to_string()
            }
            SensorType::Gyroscope => "Gyroscope:".to_string(),
            SensorType::Magnetometer => "Magnetometer:".to_string(),
            SensorType::Other(name) => format!("{}:", name),
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorType::Accelerometer => write!(f, "accelerometer"),
            SensorType::Gyroscope => write!(f, "gyroscope"),
            SensorType::Magnetometer => write!(f, "magnetometer"),
            SensorType::Other(name) => write!(f, "{}", name),
        }
    }
}

impl TryFrom<&str> for SensorType {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let sensor_type = value.trim().to_lowercase();
        if sensor_type.is_empty() {
            return Err("Invalid format: empty sensor type".to_string());
        }

        if sensor_type.contains("acc") {
            Ok(Self::Accelerometer)
        } else if sensor_type.contains("gyr") {
            Ok(Self::Gyroscope)
        } else if sensor_type.contains("mag") {
            Ok(Self::Magnetometer)
        } else {
            Ok(Self::Other(sensor_type))
        }
    }
}

impl TryFrom<String> for SensorType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SensorType::try_from(value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(
            SensorType::try_from("accelerometer").unwrap(),
            SensorType::Accelerometer
        );
        assert_eq!(
            SensorType::try_from("gyroscope").unwrap(),
            SensorType::Gyroscope
        );
        assert_eq!(
            SensorType::try_from("magnetometer").unwrap(),
            SensorType::Magnetometer
        );
        assert_eq!(
            SensorType::try_from("other").unwrap(),
            SensorType::Other(String::from("other"))
        );
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!(
            SensorType::try_from("ACCEleroMeter").unwrap(),
            SensorType::Accelerometer
        );
        assert_eq!(
            SensorType::try_from("gyrosCOPE").unwrap(),
            SensorType::Gyroscope
        );
        assert_eq!(
            SensorType::try_from("oThEr").unwrap(),
            SensorType::Other(String::from("other"))
        );
    }

    #[test]
    fn test_from_str_partial_match() {
        assert_eq!(SensorType::try_from("acC").unwrap(), SensorType::Accelerometer);
        assert_eq!(SensorType::try_from("GyR").unwrap(), SensorType::Gyroscope);
        assert_eq!(SensorType::try_from("Mag").unwrap(), SensorType::Magnetometer);
    }

    #[test]
    fn test_from_empty_str() {
        assert!(SensorType::try_from("   ").is_err());
    }

    #[test]
    fn test_display_roundtrips() {
        for sensor in [
            SensorType::Accelerometer,
            SensorType::Gyroscope,
            SensorType::Magnetometer,
        ] {
            assert_eq!(SensorType::try_from(sensor.to_string()).unwrap(), sensor);
        }
    }

    #[test]
    fn test_caption() {
        assert_eq!(SensorType::Gyroscope.caption(), "Gyroscope:");
        assert_eq!(
            SensorType::Accelerometer.caption(),
            "Accelerometer: (in Gs where 1 G = 9.81 m s^-2)"
        );
    }
}
