use log::error;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Notify;

use crate::adapters::simulated::SimulatedSensor;
use crate::models::config::MonitorConfig;
use crate::models::errors::SensorError;
use crate::models::shutdown;
use crate::monitor::SensorMonitor;

const SENSOR_NOISE_STDEV: f64 = 0.01;

/// Initializes `env_logger` from `RUST_LOG`. Calling it more than once is harmless.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(cfg!(test)).try_init();
}

/// Starts a simulated sensor producing a synthetic waveform, and a monitor
/// subscribed to it.
///
/// The sensor delivers samples until Ctrl+C, or for `run_for_millis` if given.
/// The monitor is unmounted when delivery stops.
///
/// Returns a tuple containing:
/// - A `tokio::task::JoinHandle<()>` representing the spawned delivery task.
/// - An `Arc<SensorMonitor<SimulatedSensor>>` to read the window from and control the subscription.
pub fn run_mock_service(
    config: &MonitorConfig,
    add_sensor_noise: bool,
    run_for_millis: Option<u64>,
) -> Result<
    (
        tokio::task::JoinHandle<()>,
        Arc<SensorMonitor<SimulatedSensor>>,
    ),
    SensorError,
> {
    config.validate()?;
    let mut sensor = SimulatedSensor::new(config.sensor_type()?);
    if add_sensor_noise {
        sensor = sensor.with_noise(SENSOR_NOISE_STDEV)?;
    }
    run_with_sensor(Arc::new(sensor), config, run_for_millis)
}

/// Same as [`run_mock_service`], but the sensor replays the readings recorded in
/// the CSV file at `file_path`.
pub fn run_replay_service(
    config: &MonitorConfig,
    file_path: impl AsRef<Path>,
    run_for_millis: Option<u64>,
) -> Result<
    (
        tokio::task::JoinHandle<()>,
        Arc<SensorMonitor<SimulatedSensor>>,
    ),
    SensorError,
> {
    config.validate()?;
    let sensor = SimulatedSensor::from_csv(config.sensor_type()?, file_path)?;
    run_with_sensor(Arc::new(sensor), config, run_for_millis)
}

fn run_with_sensor(
    sensor: Arc<SimulatedSensor>,
    config: &MonitorConfig,
    run_for_millis: Option<u64>,
) -> Result<
    (
        tokio::task::JoinHandle<()>,
        Arc<SensorMonitor<SimulatedSensor>>,
    ),
    SensorError,
> {
    let monitor = Arc::new(SensorMonitor::new(Arc::clone(&sensor), config)?);
    let abort_signal = Arc::new(Notify::new());
    shutdown::listen_for_shutdown(Arc::clone(&abort_signal), run_for_millis);

    let handle = tokio::spawn({
        let monitor = Arc::clone(&monitor);
        async move {
            if let Err(e) = monitor.mount() {
                error!("Error mounting {} monitor: {}", monitor.sensor_type(), e);
                return;
            }
            if let Err(e) = sensor.start(abort_signal).await {
                error!("Error in {} sensor loop: {}", monitor.sensor_type(), e);
            }
            monitor.unmount();
        }
    });
    Ok((handle, monitor))
}
