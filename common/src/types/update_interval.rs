use std::time::Duration;

const DEFAULT_UPDATE_INTERVAL_MILLIS: u64 = 100;

/// Requested time between two consecutive sensor samples, in milliseconds.
///
/// The value is a hint for the sensor: it is always positive, but clamping to
/// whatever minimum the hardware supports is left to the sensor itself.
///
/// # Examples
///
/// ```
/// use common::types::UpdateInterval;
///
/// let interval = UpdateInterval::try_from(16).unwrap();
/// assert_eq!(interval, UpdateInterval::FAST);
/// assert!(UpdateInterval::try_from(0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UpdateInterval(u64);

impl UpdateInterval {
    /// One sample per second.
    pub const SLOW: UpdateInterval = UpdateInterval(1000);
    /// Roughly one sample per display frame.
    pub const FAST: UpdateInterval = UpdateInterval(16);

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for UpdateInterval {
    fn default() -> Self {
        Self(DEFAULT_UPDATE_INTERVAL_MILLIS)
    }
}

impl TryFrom<u64> for UpdateInterval {
    type Error = &'static str;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value == 0 {
            return Err("Update interval must be positive");
        }
        Ok(Self(value))
    }
}

impl From<UpdateInterval> for Duration {
    fn from(value: UpdateInterval) -> Self {
        value.as_duration()
    }
}
