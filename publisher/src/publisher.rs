use dashmap::DashMap;
use rayon::prelude::*;
use std::cell::Cell;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use common::traits::Notifiable;
use common::types::Callback;

thread_local! {
    static DELIVERY_DEPTH: Cell<usize> = Cell::new(0);
}

/// Returns true while the current thread is running a listener callback.
pub fn is_delivering() -> bool {
    DELIVERY_DEPTH.with(|depth| depth.get() > 0)
}

pub trait Publishable<T> {
    fn register_listener(&self, listener: &mut dyn Notifiable<T>) -> Uuid;
    /// Returns false if no listener was registered under `listener_id`.
    fn unregister_listener(&self, listener_id: Uuid) -> bool;
    fn unregister_all(&self);
    fn notify_listeners(&self, data: Arc<T>);
}

#[derive(Default)]
struct Gate {
    closed: bool,
    in_flight: usize,
}

/// A registered callback and the gate that stops it once it is unregistered.
struct Slot<T> {
    callback: Callback<T>,
    gate: Mutex<Gate>,
    idle: Condvar,
}

struct InFlight<'a, T> {
    slot: &'a Slot<T>,
}

impl<T> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        DELIVERY_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
        let mut gate = self.slot.lock_gate();
        gate.in_flight -= 1;
        if gate.in_flight == 0 {
            self.slot.idle.notify_all();
        }
    }
}

impl<T> Slot<T> {
    fn new(callback: Callback<T>) -> Self {
        Self {
            callback,
            gate: Mutex::new(Gate::default()),
            idle: Condvar::new(),
        }
    }

    fn lock_gate(&self) -> MutexGuard<'_, Gate> {
        self.gate.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn deliver(&self, listener_id: Uuid, data: Arc<T>) {
        {
            let mut gate = self.lock_gate();
            if gate.closed {
                return;
            }
            gate.in_flight += 1;
        }
        DELIVERY_DEPTH.with(|depth| depth.set(depth.get() + 1));
        let _in_flight = InFlight { slot: self };
        (self.callback)(listener_id, data);
    }

    /// Stops new deliveries and waits for the running ones to return.
    ///
    /// A thread that is itself inside a callback does not wait: the delivery it
    /// would wait for may be the one that is calling it.
    fn close(&self) {
        let mut gate = self.lock_gate();
        gate.closed = true;
        if is_delivering() {
            return;
        }
        while gate.in_flight > 0 {
            gate = self.idle.wait(gate).unwrap_or_else(PoisonError::into_inner);
        }
    }
}

/// Record of registered listeners that will be notified of updates.
///
/// Callbacks run outside the registry lock, so a callback may register or
/// unregister listeners, including itself. Once `unregister_listener` returns,
/// the listener is never called again, and any call that was already running
/// on another thread has finished. When `unregister_listener` is called from
/// inside a callback it does not wait for running calls.
pub struct Publisher<T> {
    listeners: Arc<DashMap<Uuid, Arc<Slot<T>>>>,
}

impl<T> Clone for Publisher<T> {
    fn clone(&self) -> Self {
        Self {
            listeners: Arc::clone(&self.listeners),
        }
    }
}

impl<T> Default for Publisher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Publisher<T> {
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(DashMap::new()),
        }
    }

    // Returns true if no listeners registered
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    // Returns number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }
}

impl<T> Publishable<T> for Publisher<T>
where
    T: Send + Sync + 'static,
{
    fn register_listener(&self, listener: &mut dyn Notifiable<T>) -> Uuid {
        let callback = listener.get_callback();
        let listener_id = Uuid::new_v4();
        listener.set_id(listener_id);
        self.listeners
            .insert(listener_id, Arc::new(Slot::new(callback)));
        log::debug!("Registered listener {}", listener_id);
        listener_id
    }

    fn unregister_all(&self) {
        let mut removed = Vec::new();
        self.listeners.retain(|_, slot| {
            removed.push(Arc::clone(slot));
            false
        });
        removed.iter().for_each(|slot| slot.close());
    }

    fn unregister_listener(&self, listener_id: Uuid) -> bool {
        match self.listeners.remove(&listener_id) {
            Some((_, slot)) => {
                slot.close();
                log::debug!("Unregistered listener {}", listener_id);
                true
            }
            None => false,
        }
    }

    fn notify_listeners(&self, data: Arc<T>) {
        let slots: Vec<(Uuid, Arc<Slot<T>>)> = self
            .listeners
            .iter()
            .map(|entry| (*entry.key(), Arc::clone(entry.value())))
            .collect();

        slots.into_par_iter().for_each(|(listener_id, slot)| {
            slot.deliver(listener_id, Arc::clone(&data));
        });
    }
}
