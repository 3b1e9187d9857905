use common::types::{SensorType, WindowSnapshot, XYZ};
use motion_sensors::{
    services, MonitorConfig, SensorError, SensorMonitor, SensorPort, SimulatedSensor,
    SubscriptionState,
};
use std::sync::Arc;
use std::time::Duration;
use test_utils::sinks::SinkMock;

#[tokio::test]
async fn test_receive_window_snapshots() {
    let config = MonitorConfig {
        update_interval_millis: 20,
        ..MonitorConfig::default()
    };
    let add_sensor_noise = false;
    let run_for_millis = 500;

    // Start mock service
    let (handle, monitor) =
        services::run_mock_service(&config, add_sensor_noise, Some(run_for_millis)).unwrap();

    // install sink
    let sink = SinkMock::<WindowSnapshot<XYZ>>::new();
    let listener_id = monitor.register_listener(&mut sink.listener());

    handle.await.unwrap();

    // check that snapshots were received, each newer and never over capacity
    let snapshots = sink.received();
    assert!(!snapshots.is_empty());
    assert_eq!(sink.count_from(listener_id), snapshots.len());
    assert!(snapshots.iter().all(|s| s.len() <= config.capacity));
    assert!(snapshots.windows(2).all(|w| w[0].version() < w[1].version()));
    assert_eq!(monitor.state(), SubscriptionState::Unsubscribed);
}

#[tokio::test]
async fn test_no_snapshots_after_unsubscribe() {
    let sensor = Arc::new(SimulatedSensor::new(SensorType::Gyroscope));
    let monitor = SensorMonitor::new(sensor.clone(), &MonitorConfig::default()).unwrap();
    let sink = SinkMock::<WindowSnapshot<XYZ>>::new();
    monitor.register_listener(&mut sink.listener());

    let abort_signal = Arc::new(tokio::sync::Notify::new());
    sensor.set_update_interval(common::types::UpdateInterval::FAST);
    let delivery = tokio::spawn({
        let sensor = sensor.clone();
        let abort_signal = abort_signal.clone();
        async move { sensor.start(abort_signal).await }
    });

    monitor.mount().unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;
    monitor.unmount();
    let received = sink.len();
    let window = monitor.snapshot();
    assert!(received > 0);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(sink.len(), received);
    assert_eq!(monitor.snapshot().version(), window.version());

    while !delivery.is_finished() {
        abort_signal.notify_waiters();
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    delivery.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_latest_interval_governs_cadence() {
    let sensor = Arc::new(SimulatedSensor::new(SensorType::Accelerometer));
    let monitor = SensorMonitor::new(sensor.clone(), &MonitorConfig::default()).unwrap();
    let abort_signal = Arc::new(tokio::sync::Notify::new());
    let delivery = tokio::spawn({
        let sensor = sensor.clone();
        let abort_signal = abort_signal.clone();
        async move { sensor.start(abort_signal).await }
    });

    monitor.mount().unwrap();
    monitor.fast();
    monitor.slow();
    let version = monitor.snapshot().version();
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(monitor.snapshot().version(), version);

    monitor.fast();
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(monitor.snapshot().version() > version + 2);

    monitor.unmount();
    while !delivery.is_finished() {
        abort_signal.notify_waiters();
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    delivery.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_unavailable_sensor() {
    let sensor = Arc::new(SimulatedSensor::unavailable(SensorType::Gyroscope));
    let monitor = SensorMonitor::new(sensor.clone(), &MonitorConfig::default()).unwrap();

    assert_eq!(
        monitor.mount(),
        Err(SensorError::SensorUnavailable(SensorType::Gyroscope))
    );
    assert_eq!(monitor.readout().button_label(), "Off");
    assert_eq!(monitor.snapshot().to_vec(), vec![XYZ::default()]);

    let abort_signal = Arc::new(tokio::sync::Notify::new());
    assert!(sensor.start(abort_signal).await.is_err());
}

#[tokio::test]
async fn test_config_from_file() {
    let path = std::env::temp_dir().join(format!("monitor_config_{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"{"sensor": "accelerometer", "capacity": 4, "update_interval_millis": 1000}"#,
    )
    .unwrap();
    let config = MonitorConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let sensor = Arc::new(SimulatedSensor::new(config.sensor_type().unwrap()));
    let monitor = SensorMonitor::new(sensor.clone(), &config).unwrap();
    monitor.mount().unwrap();
    for i in 0..10 {
        sensor.emit(XYZ::new([i as f64, 0.0, 1.0]));
    }

    let series = monitor.chart_series();
    assert_eq!(series.x, vec![6.0, 7.0, 8.0, 9.0]);
    assert_eq!(sensor.update_interval().as_millis(), 1000);
}
