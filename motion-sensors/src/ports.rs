use uuid::Uuid;

use common::traits::Notifiable;
use common::types::{SensorType, UpdateInterval, XYZ};

use crate::models::errors::SensorError;

/// Push-based access to one motion sensor of the platform.
pub trait SensorPort: Send + Sync {
    fn sensor_type(&self) -> &SensorType;

    /// Returns false if the platform has no such sensor or access was denied.
    fn is_available(&self) -> bool;

    /// Registers a listener called once per sample, on whatever thread the sensor
    /// delivers from. Returns the id of the registered listener, or
    /// SensorUnavailable if the sensor is missing.
    fn add_listener(&self, listener: &mut dyn Notifiable<XYZ>) -> Result<Uuid, SensorError>;

    /// Unregisters a listener. Once this returns the listener is never called
    /// again. Returns false if the id was unknown. Called from inside a listener
    /// callback it must not wait for that callback to return.
    fn remove_listener(&self, id: Uuid) -> bool;

    /// Changes delivery cadence starting with the next sample. Values below what
    /// the hardware supports are clamped by the sensor.
    fn set_update_interval(&self, interval: UpdateInterval);

    fn update_interval(&self) -> UpdateInterval;
}
