use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};
use std::thread;
use std::time::Duration;
use uuid::Uuid;

use common::traits::Notifiable;
use common::types::{SensorType, UpdateInterval, XYZ};
use publisher::{is_delivering, Listener};

use crate::models::errors::SensorError;
use crate::ports::SensorPort;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubscriptionState {
    Unsubscribed,
    Subscribed,
}

/// Live registration of one listener on one sensor port.
///
/// The registration is released exactly once: by [`release`](Self::release), or
/// when the handle is dropped.
pub struct SubscriptionHandle<P: SensorPort> {
    port: Arc<P>,
    id: Uuid,
    active: bool,
}

impl<P: SensorPort> SubscriptionHandle<P> {
    fn acquire(port: Arc<P>, listener: &mut dyn Notifiable<XYZ>) -> Result<Self, SensorError> {
        if !port.is_available() {
            return Err(SensorError::SensorUnavailable(port.sensor_type().clone()));
        }
        let id = port.add_listener(listener)?;
        Ok(Self {
            port,
            id,
            active: true,
        })
    }

    /// Id the listener was registered under.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Unregisters the listener from the port. Calling it again does nothing.
    pub fn release(&mut self) {
        if !std::mem::replace(&mut self.active, false) {
            return;
        }
        if !self.port.remove_listener(self.id) {
            log::warn!(
                "Listener {} was already gone from the {} sensor",
                self.id,
                self.port.sensor_type()
            );
        }
    }
}

impl<P: SensorPort> Drop for SubscriptionHandle<P> {
    fn drop(&mut self) {
        self.release();
    }
}

const BUSY_RETRIES: usize = 20;
const BUSY_RETRY_PERIOD_MS: u64 = 1;

/// Start/stop and rate control over one sensor port for one callback.
///
/// At most one subscription handle is alive at any time: subscribing while
/// subscribed and unsubscribing while unsubscribed are both no-ops. Dropping the
/// manager releases the live handle, if any.
///
/// Subscribe and unsubscribe are serialized, and the handle lock is held until
/// the port has finished releasing a listener.
pub struct SensorSubscription<P: SensorPort> {
    port: Arc<P>,
    listener: Listener<XYZ>,
    handle: Mutex<Option<SubscriptionHandle<P>>>,
    subscribed: AtomicBool,
}

impl<P: SensorPort> SensorSubscription<P> {
    /// Creates an unsubscribed manager that will call `callback` once per sample
    /// while subscribed.
    pub fn new<F>(port: Arc<P>, callback: F) -> Self
    where
        F: Fn(Uuid, Arc<XYZ>) + Send + Sync + 'static,
    {
        Self {
            port,
            listener: Listener::new(callback),
            handle: Mutex::new(None),
            subscribed: AtomicBool::new(false),
        }
    }

    /// Starts listening. Returns the id of the live handle; if already subscribed
    /// that is the existing handle's id and nothing else happens.
    pub fn subscribe(&self) -> Result<Uuid, SensorError> {
        let mut handle = self
            .lock_handle()
            .ok_or_else(|| SensorError::SubscriptionBusy(self.sensor_type().clone()))?;
        if let Some(live) = handle.as_ref().filter(|h| h.is_active()) {
            let id = live.id();
            log::debug!("Already subscribed to {} sensor", self.sensor_type());
            return Ok(id);
        }

        let mut listener = self.listener.clone();
        let new_handle = SubscriptionHandle::acquire(Arc::clone(&self.port), &mut listener)?;
        let id = new_handle.id();
        log::info!("Subscribed to {} sensor", self.sensor_type());
        *handle = Some(new_handle);
        self.subscribed.store(true, Ordering::SeqCst);
        Ok(id)
    }

    /// Stops delivery and releases the handle. Safe to call when not subscribed.
    ///
    /// Called from a sensor callback while another thread holds the subscription,
    /// it gives up after a short wait and logs a warning.
    pub fn unsubscribe(&self) {
        let Some(mut handle) = self.lock_handle() else {
            log::warn!(
                "Unsubscribe from {} sensor skipped: subscription busy",
                self.sensor_type()
            );
            return;
        };
        if let Some(mut live) = handle.take() {
            live.release();
            self.subscribed.store(false, Ordering::SeqCst);
            log::info!("Unsubscribed from {} sensor", self.sensor_type());
        }
    }

    /// Changes delivery cadence, subscribed or not. Zero is rejected before
    /// reaching the sensor.
    pub fn set_update_interval(&self, millis: u64) -> Result<(), SensorError> {
        let interval =
            UpdateInterval::try_from(millis).map_err(|_| SensorError::InvalidInterval(millis))?;
        self.set_interval(interval);
        Ok(())
    }

    pub(crate) fn set_interval(&self, interval: UpdateInterval) {
        log::debug!(
            "Setting {} update interval to {} ms",
            self.sensor_type(),
            interval.as_millis()
        );
        self.port.set_update_interval(interval);
    }

    pub fn update_interval(&self) -> UpdateInterval {
        self.port.update_interval()
    }

    pub fn state(&self) -> SubscriptionState {
        if self.is_subscribed() {
            SubscriptionState::Subscribed
        } else {
            SubscriptionState::Unsubscribed
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed.load(Ordering::SeqCst)
    }

    pub fn sensor_type(&self) -> &SensorType {
        self.port.sensor_type()
    }

    /// Locks the handle. Inside a sensor callback the lock is only tried for a
    /// short while, since its holder may be waiting for that callback to return.
    fn lock_handle(&self) -> Option<MutexGuard<'_, Option<SubscriptionHandle<P>>>> {
        if !is_delivering() {
            return Some(self.handle.lock().unwrap_or_else(PoisonError::into_inner));
        }
        for _ in 0..BUSY_RETRIES {
            match self.handle.try_lock() {
                Ok(guard) => return Some(guard),
                Err(TryLockError::Poisoned(poisoned)) => return Some(poisoned.into_inner()),
                Err(TryLockError::WouldBlock) => {
                    thread::sleep(Duration::from_millis(BUSY_RETRY_PERIOD_MS))
                }
            }
        }
        None
    }
}
