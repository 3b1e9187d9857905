// Emulates a platform motion sensor: samples are generated from a waveform or
// replayed from recorded readings, and pushed to listeners at the requested rate.

mod gaussian;
mod waveform;

use rand::{rngs::StdRng, SeedableRng};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::Notify;
use uuid::Uuid;

use common::traits::Notifiable;
use common::types::buffers::CircularReader;
use common::types::{SensorType, UpdateInterval, XYZ};
use publisher::{Publishable, Publisher};
use test_utils::csv_loader::{self, CsvColumnMapper};

use crate::models::errors::SensorError;
use crate::ports::SensorPort;
use gaussian::GaussianNoise;
use waveform::Waveform;

const GAUSSIAN_SENSOR_MEAN: f64 = 0f64;

enum SampleSource {
    Waveform(Waveform),
    Replay(CircularReader<XYZ>),
}

impl SampleSource {
    fn next_sample(&mut self) -> XYZ {
        match self {
            SampleSource::Waveform(waveform) => waveform.next_sample(),
            SampleSource::Replay(readings) => readings.next_element(),
        }
    }
}

/// Simulated motion sensor.
pub struct SimulatedSensor {
    sensor_type: SensorType,
    available: bool,
    source: Mutex<SampleSource>,
    sensor_noise: Option<GaussianNoise>,
    rng: Mutex<StdRng>,
    interval: Mutex<UpdateInterval>,
    interval_changed: Notify,
    publisher: Publisher<XYZ>,
}

impl SimulatedSensor {
    /// Creates a sensor producing a synthetic waveform suited to `sensor_type`.
    pub fn new(sensor_type: SensorType) -> Self {
        let source = SampleSource::Waveform(Waveform::for_sensor(&sensor_type));
        Self::build(sensor_type, true, source)
    }

    /// Creates a sensor that cycles through `readings` forever.
    pub fn from_readings(sensor_type: SensorType, readings: Vec<XYZ>) -> Result<Self, SensorError> {
        let readings = CircularReader::try_from(readings).map_err(SensorError::Readings)?;
        Ok(Self::build(sensor_type, true, SampleSource::Replay(readings)))
    }

    /// Creates a sensor replaying the columns of `sensor_type` from a recorded CSV file.
    pub fn from_csv(sensor_type: SensorType, file_path: impl AsRef<Path>) -> Result<Self, SensorError> {
        let mut mapper = CsvColumnMapper::new();
        match sensor_type {
            SensorType::Accelerometer => mapper.add_accel(),
            SensorType::Gyroscope => mapper.add_gyro(),
            SensorType::Magnetometer => mapper.add_mag(),
            SensorType::Other(_) => {
                return Err(SensorError::Readings(format!(
                    "No recorded columns for {} sensor",
                    sensor_type
                )))
            }
        };
        let readings = csv_loader::load_csv_columns::<XYZ>(file_path, &mapper.columns())
            .map_err(|e| SensorError::Readings(e.to_string()))?;
        log::info!("Loaded {} recorded {} samples", readings.len(), sensor_type);
        Self::from_readings(sensor_type, readings)
    }

    /// Creates a sensor the platform does not have: every subscription attempt fails.
    pub fn unavailable(sensor_type: SensorType) -> Self {
        let source = SampleSource::Waveform(Waveform::for_sensor(&sensor_type));
        Self::build(sensor_type, false, source)
    }

    /// Adds zero-mean Gaussian noise with standard deviation `stdev` to every axis.
    pub fn with_noise(mut self, stdev: f64) -> Result<Self, SensorError> {
        let noise = GaussianNoise::new(GAUSSIAN_SENSOR_MEAN, stdev).map_err(SensorError::Config)?;
        self.sensor_noise = Some(noise);
        Ok(self)
    }

    fn build(sensor_type: SensorType, available: bool, source: SampleSource) -> Self {
        Self {
            sensor_type,
            available,
            source: Mutex::new(source),
            sensor_noise: None,
            rng: Mutex::new(StdRng::from_entropy()),
            interval: Mutex::new(UpdateInterval::default()),
            interval_changed: Notify::new(),
            publisher: Publisher::new(),
        }
    }

    /// Delivers samples at the current update interval until `abort_signal` is notified.
    /// An interval change restarts the wait immediately with the new value.
    pub async fn start(&self, abort_signal: Arc<Notify>) -> Result<(), SensorError> {
        if !self.available {
            return Err(SensorError::SensorUnavailable(self.sensor_type.clone()));
        }
        log::info!("Starting simulated {} sensor", self.sensor_type);

        loop {
            let period = self.update_interval().as_duration();
            tokio::select! {
                _ = abort_signal.notified() => {
                    break;
                }
                _ = self.interval_changed.notified() => {
                    log::debug!("{} update interval is now {} ms", self.sensor_type, self.update_interval().as_millis());
                }
                _ = tokio::time::sleep(period) => {
                    let sample = self.next_sample();
                    self.emit(sample);
                }
            }
        }

        log::info!("Simulated {} sensor stopped", self.sensor_type);
        Ok(())
    }

    /// Delivers `sample` to every listener and returns once they have all run.
    pub fn emit(&self, sample: XYZ) {
        if self.available {
            self.publisher.notify_listeners(Arc::new(sample));
        }
    }

    /// Number of listeners currently registered.
    pub fn listener_count(&self) -> usize {
        self.publisher.len()
    }

    fn next_sample(&self) -> XYZ {
        let sample = self
            .source
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next_sample();
        match self.sensor_noise.as_ref() {
            Some(noise) => {
                let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
                noise.add_noise(&mut rng, sample)
            }
            None => sample,
        }
    }
}

impl SensorPort for SimulatedSensor {
    fn sensor_type(&self) -> &SensorType {
        &self.sensor_type
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn add_listener(&self, listener: &mut dyn Notifiable<XYZ>) -> Result<Uuid, SensorError> {
        if !self.available {
            return Err(SensorError::SensorUnavailable(self.sensor_type.clone()));
        }
        Ok(self.publisher.register_listener(listener))
    }

    fn remove_listener(&self, id: Uuid) -> bool {
        self.publisher.unregister_listener(id)
    }

    fn set_update_interval(&self, interval: UpdateInterval) {
        *self.interval.lock().unwrap_or_else(PoisonError::into_inner) = interval;
        self.interval_changed.notify_one();
    }

    fn update_interval(&self) -> UpdateInterval {
        *self.interval.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use publisher::Listener;
    use std::time::Duration;

    fn counting_listener(count: Arc<Mutex<Vec<XYZ>>>) -> Listener<XYZ> {
        Listener::new(move |_id, sample: Arc<XYZ>| {
            count.lock().unwrap().push(*sample);
        })
    }

    #[test]
    fn test_emit_reaches_listener() {
        let sensor = SimulatedSensor::new(SensorType::Gyroscope);
        let received = Arc::new(Mutex::new(Vec::new()));
        let mut listener = counting_listener(received.clone());

        let id = sensor.add_listener(&mut listener).unwrap();
        sensor.emit(XYZ::new([1.0, 2.0, 3.0]));
        assert!(sensor.remove_listener(id));
        sensor.emit(XYZ::new([4.0, 5.0, 6.0]));

        assert_eq!(*received.lock().unwrap(), vec![XYZ::new([1.0, 2.0, 3.0])]);
        assert!(!sensor.remove_listener(id));
    }

    #[test]
    fn test_unavailable_sensor_rejects_listeners() {
        let sensor = SimulatedSensor::unavailable(SensorType::Magnetometer);
        let mut listener = counting_listener(Arc::new(Mutex::new(Vec::new())));

        assert!(!sensor.is_available());
        assert_eq!(
            sensor.add_listener(&mut listener),
            Err(SensorError::SensorUnavailable(SensorType::Magnetometer))
        );
    }

    #[test]
    fn test_from_readings_replays_in_order() {
        let readings = vec![XYZ::new([1.0, 0.0, 0.0]), XYZ::new([2.0, 0.0, 0.0])];
        let sensor = SimulatedSensor::from_readings(SensorType::Accelerometer, readings).unwrap();
        let replayed: Vec<f64> = (0..4).map(|_| sensor.next_sample().x()).collect();
        assert_eq!(replayed, vec![1.0, 2.0, 1.0, 2.0]);

        assert!(SimulatedSensor::from_readings(SensorType::Accelerometer, vec![]).is_err());
    }

    #[test]
    fn test_from_csv() {
        let sensor = SimulatedSensor::from_csv(
            SensorType::Gyroscope,
            "../test-utils/test_data/sensor_readings.csv",
        )
        .unwrap();
        assert!(sensor.next_sample().is_finite());

        assert!(SimulatedSensor::from_csv(
            SensorType::Other("barometer".to_string()),
            "../test-utils/test_data/sensor_readings.csv",
        )
        .is_err());
        assert!(SimulatedSensor::from_csv(SensorType::Gyroscope, "./missing.csv").is_err());
    }

    #[test]
    fn test_with_noise() {
        assert!(SimulatedSensor::new(SensorType::Gyroscope)
            .with_noise(0.1)
            .is_ok());
        assert!(SimulatedSensor::new(SensorType::Gyroscope)
            .with_noise(-1.0)
            .is_err());
    }

    #[test]
    fn test_set_update_interval() {
        let sensor = SimulatedSensor::new(SensorType::Gyroscope);
        assert_eq!(sensor.update_interval(), UpdateInterval::default());
        sensor.set_update_interval(UpdateInterval::SLOW);
        assert_eq!(sensor.update_interval(), UpdateInterval::SLOW);
    }

    #[tokio::test]
    async fn test_start_delivers_until_aborted() {
        let sensor = Arc::new(SimulatedSensor::new(SensorType::Gyroscope));
        sensor.set_update_interval(UpdateInterval::try_from(10).unwrap());
        let received = Arc::new(Mutex::new(Vec::new()));
        let mut listener = counting_listener(received.clone());
        sensor.add_listener(&mut listener).unwrap();

        let abort_signal = Arc::new(Notify::new());
        let handle = tokio::spawn({
            let sensor = sensor.clone();
            let abort_signal = abort_signal.clone();
            async move { sensor.start(abort_signal).await }
        });

        tokio::time::sleep(Duration::from_millis(300)).await;
        while !handle.is_finished() {
            abort_signal.notify_waiters();
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert!(handle.await.unwrap().is_ok());

        let delivered = received.lock().unwrap().len();
        assert!(delivered > 5, "only {} samples delivered", delivered);
    }

    #[tokio::test]
    async fn test_latest_interval_governs_delivery() {
        let sensor = Arc::new(SimulatedSensor::new(SensorType::Gyroscope));
        sensor.set_update_interval(UpdateInterval::FAST);
        sensor.set_update_interval(UpdateInterval::SLOW);
        let received = Arc::new(Mutex::new(Vec::new()));
        let mut listener = counting_listener(received.clone());
        sensor.add_listener(&mut listener).unwrap();

        let abort_signal = Arc::new(Notify::new());
        let handle = tokio::spawn({
            let sensor = sensor.clone();
            let abort_signal = abort_signal.clone();
            async move { sensor.start(abort_signal).await }
        });

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(received.lock().unwrap().is_empty());

        // switching to a fast rate does not wait for the pending slow period
        sensor.set_update_interval(UpdateInterval::try_from(20).unwrap());
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(received.lock().unwrap().len() > 2);

        handle.abort();
    }

    #[tokio::test]
    async fn test_start_unavailable_sensor() {
        let sensor = SimulatedSensor::unavailable(SensorType::Gyroscope);
        let result = sensor.start(Arc::new(Notify::new())).await;
        assert_eq!(
            result,
            Err(SensorError::SensorUnavailable(SensorType::Gyroscope))
        );
    }
}
