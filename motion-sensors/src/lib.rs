//! # Crate motion_sensors
//!
//! ## motion_sensors
//!
//! The `motion_sensors` crate reads live samples from a motion sensor (gyroscope,
//! accelerometer, magnetometer) and keeps a bounded rolling window of the latest
//! ones, ready to be charted.
//!
//! Features include:
//! - A [`SensorPort`] trait abstracting the platform sensor API, with a simulated
//!   implementation that generates a waveform or replays recorded readings.
//! - Subscription management: start, stop and change the update interval, with the
//!   platform registration released on every exit path.
//! - A [`SensorMonitor`] binding one subscription to one rolling window, exposing
//!   window snapshots, chart series and a rounded readout.
//! - Registration of listeners notified with every new window snapshot.
//!
//! ### Example
//!
//! ```
//! use std::sync::Arc;
//! use common::types::{SensorType, XYZ};
//! use motion_sensors::{MonitorConfig, SensorMonitor, SimulatedSensor};
//!
//! let sensor = Arc::new(SimulatedSensor::new(SensorType::Gyroscope));
//! let monitor = SensorMonitor::new(sensor.clone(), &MonitorConfig::default()).unwrap();
//!
//! monitor.mount().unwrap();
//! sensor.emit(XYZ::new([0.5, -0.25, 1.0]));
//!
//! assert_eq!(monitor.snapshot().len(), 2);
//! assert_eq!(monitor.readout().to_string(), "x: 0.5 y: -0.25 z: 1");
//! monitor.unmount();
//! ```

pub mod adapters;
pub mod models;
pub mod monitor;
pub mod ports;
pub mod services;
pub mod subscription;

pub use adapters::simulated::SimulatedSensor;
pub use models::config::MonitorConfig;
pub use models::errors::SensorError;
pub use monitor::{Readout, SensorMonitor};
pub use ports::SensorPort;
pub use subscription::{SensorSubscription, SubscriptionHandle, SubscriptionState};
