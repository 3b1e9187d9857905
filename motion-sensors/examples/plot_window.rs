use common::types::SensorType;
use motion_sensors::{services, MonitorConfig};
use test_utils::sinks::Plot1D;
use tokio::time::Duration;

#[tokio::main]
async fn main() {
    services::init_logging();

    let config = MonitorConfig::for_sensor(&SensorType::Gyroscope);
    let plot_refresh_period_millis = 100.0;

    // Start mock service, runs until Ctrl+C
    let (handle, monitor) = services::run_mock_service(&config, true, None).unwrap();

    let plot_1d = Plot1D::new(&monitor.caption(), config.capacity);
    monitor.register_listener(&mut plot_1d.listener());
    plot_1d.start(plot_refresh_period_millis);

    let mut ticker = tokio::time::interval(Duration::from_secs(2));
    let _ = tokio::time::timeout(Duration::from_secs(200), async {
        tokio::pin!(handle);
        loop {
            tokio::select! {
                _ = &mut handle => break,
                _ = ticker.tick() => {
                    let readout = monitor.readout();
                    log::info!("{} {} [{}]", monitor.caption(), readout, readout.button_label());
                }
            }
        }
    })
    .await;
}
