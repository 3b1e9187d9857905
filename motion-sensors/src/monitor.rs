use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use common::display::round;
use common::traits::Notifiable;
use common::types::{
    ChartSeries, RollingWindow, SensorType, UpdateInterval, WindowReader, WindowSnapshot, XYZ,
};
use publisher::{Publishable, Publisher};

use crate::models::config::MonitorConfig;
use crate::models::errors::SensorError;
use crate::ports::SensorPort;
use crate::subscription::{SensorSubscription, SubscriptionState};

/// Latest sample as shown next to the chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Readout {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub subscribed: bool,
}

impl Readout {
    fn new(latest: Option<&XYZ>, subscribed: bool) -> Self {
        let sample = latest.copied().unwrap_or_default();
        Self {
            x: round(sample.x()),
            y: round(sample.y()),
            z: round(sample.z()),
            subscribed,
        }
    }

    /// Label of the start/stop button.
    pub fn button_label(&self) -> &'static str {
        if self.subscribed {
            "On"
        } else {
            "Off"
        }
    }
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x: {} y: {} z: {}", self.x, self.y, self.z)
    }
}

/// Live view of one motion sensor: a rolling window of its latest samples fed by
/// one subscription.
///
/// Every accepted sample produces a new window snapshot, which is handed to the
/// registered listeners.
pub struct SensorMonitor<P: SensorPort + 'static> {
    sensor_type: SensorType,
    window: Arc<RollingWindow<XYZ>>,
    subscription: SensorSubscription<P>,
    publisher: Publisher<WindowSnapshot<XYZ>>,
}

impl<P: SensorPort + 'static> SensorMonitor<P> {
    pub fn new(port: Arc<P>, config: &MonitorConfig) -> Result<Self, SensorError> {
        let seed = config.seed_with_zero.then(XYZ::default);
        let window = Arc::new(
            RollingWindow::new(config.capacity, seed)
                .map_err(|_| SensorError::InvalidCapacity(config.capacity))?,
        );
        let publisher = Publisher::new();
        let sensor_type = port.sensor_type().clone();

        let subscription = SensorSubscription::new(port, {
            let window = Arc::clone(&window);
            let publisher = publisher.clone();
            let sensor_type = sensor_type.clone();
            move |_id, sample: Arc<XYZ>| {
                ingest(&sensor_type, &window, &publisher, *sample);
            }
        });
        subscription.set_interval(config.update_interval()?);

        Ok(Self {
            sensor_type,
            window,
            subscription,
            publisher,
        })
    }

    /// Starts a fresh window and subscribes to the sensor.
    pub fn mount(&self) -> Result<(), SensorError> {
        self.window.reset();
        self.subscription.subscribe().map(|_| ()).map_err(|e| {
            log::warn!("Could not start {} monitor: {}", self.sensor_type, e);
            e
        })
    }

    pub fn unmount(&self) {
        self.subscription.unsubscribe();
    }

    /// Flips between subscribed and unsubscribed. Returns the new state.
    pub fn toggle(&self) -> Result<SubscriptionState, SensorError> {
        match self.subscription.state() {
            SubscriptionState::Subscribed => self.subscription.unsubscribe(),
            SubscriptionState::Unsubscribed => {
                self.subscription.subscribe()?;
            }
        }
        Ok(self.subscription.state())
    }

    pub fn slow(&self) {
        self.subscription.set_interval(UpdateInterval::SLOW);
    }

    pub fn fast(&self) {
        self.subscription.set_interval(UpdateInterval::FAST);
    }

    pub fn set_update_interval(&self, millis: u64) -> Result<(), SensorError> {
        self.subscription.set_update_interval(millis)
    }

    pub fn update_interval(&self) -> UpdateInterval {
        self.subscription.update_interval()
    }

    pub fn snapshot(&self) -> WindowSnapshot<XYZ> {
        self.window.snapshot()
    }

    /// Read-only handle to the window, usable from any thread.
    pub fn reader(&self) -> WindowReader<XYZ> {
        self.window.reader()
    }

    pub fn chart_series(&self) -> ChartSeries {
        ChartSeries::from(&self.window.snapshot())
    }

    pub fn readout(&self) -> Readout {
        let snapshot = self.window.snapshot();
        Readout::new(snapshot.last(), self.is_subscribed())
    }

    pub fn caption(&self) -> String {
        self.sensor_type.caption()
    }

    pub fn sensor_type(&self) -> &SensorType {
        &self.sensor_type
    }

    pub fn state(&self) -> SubscriptionState {
        self.subscription.state()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_subscribed()
    }

    /// Registers a listener called with the new snapshot after every accepted sample.
    pub fn register_listener(&self, listener: &mut dyn Notifiable<WindowSnapshot<XYZ>>) -> Uuid {
        self.publisher.register_listener(listener)
    }

    pub fn unregister_listener(&self, listener_id: Uuid) -> Result<(), SensorError> {
        if self.publisher.unregister_listener(listener_id) {
            Ok(())
        } else {
            Err(SensorError::ListenerNotFound(listener_id))
        }
    }
}

fn ingest(
    sensor_type: &SensorType,
    window: &RollingWindow<XYZ>,
    publisher: &Publisher<WindowSnapshot<XYZ>>,
    sample: XYZ,
) {
    if !sample.is_finite() {
        log::debug!("Dropping malformed {} sample {:?}", sensor_type, sample);
        return;
    }
    window.push(sample);
    if !publisher.is_empty() {
        publisher.notify_listeners(Arc::new(window.snapshot()));
    }
}
