//! Module errors

use thiserror::Error;
use uuid::Uuid;

use common::types::SensorType;

/// Represents the different types of errors that can occur while reading motion sensors.
///
/// None of them is fatal: callers are expected to log them and keep running
/// with no new data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SensorError {
    /// The platform has no such sensor, or access to it was denied.
    #[error("{0} sensor is not available")]
    SensorUnavailable(SensorType),

    /// Update interval is not a positive number of milliseconds.
    #[error("Invalid update interval: {0} ms")]
    InvalidInterval(u64),

    /// Window capacity must hold at least one sample.
    #[error("Invalid window capacity: {0}")]
    InvalidCapacity(usize),

    /// Subscribe was called from a sensor callback while another thread was
    /// changing the same subscription.
    #[error("{0} subscription is being changed on another thread")]
    SubscriptionBusy(SensorType),

    #[error("Listener {0} not found")]
    ListenerNotFound(Uuid),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Recorded readings could not be loaded.
    #[error("Recorded readings error: {0}")]
    Readings(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SensorError::SensorUnavailable(SensorType::Gyroscope).to_string(),
            "gyroscope sensor is not available"
        );
        assert_eq!(
            SensorError::InvalidInterval(0).to_string(),
            "Invalid update interval: 0 ms"
        );
    }
}
