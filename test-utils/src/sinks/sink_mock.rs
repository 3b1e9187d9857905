use std::sync::{Arc, Mutex, PoisonError};
use uuid::Uuid;

use publisher::{listener, Listener};

type MockCallback<T> = Option<Arc<dyn Fn(Uuid, &T) + Send + Sync>>;

/// Listener probe: records every value it is notified with, and optionally
/// forwards it to a callback.
pub struct SinkMock<T> {
    received: Arc<Mutex<Vec<(Uuid, Arc<T>)>>>,
    callback: MockCallback<T>,
}

impl<T> Clone for SinkMock<T> {
    fn clone(&self) -> Self {
        Self {
            received: Arc::clone(&self.received),
            callback: self.callback.clone(),
        }
    }
}

impl<T> Default for SinkMock<T> {
    fn default() -> Self {
        Self {
            received: Arc::new(Mutex::new(Vec::new())),
            callback: None,
        }
    }
}

impl<T> SinkMock<T>
where
    T: Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_callback<F>(&mut self, callback: F)
    where
        F: Fn(Uuid, &T) + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
    }

    /// Listener that feeds this sink. Every listener built here shares the same record.
    pub fn listener(&self) -> Listener<T> {
        listener!(self.process)
    }

    pub fn process(&self, id: Uuid, value: Arc<T>) {
        if let Some(cb) = self.callback.as_ref() {
            cb(id, &value);
        }
        self.lock().push((id, value));
    }

    /// Values received so far, oldest first.
    pub fn received(&self) -> Vec<Arc<T>> {
        self.lock().iter().map(|(_, value)| Arc::clone(value)).collect()
    }

    pub fn last(&self) -> Option<Arc<T>> {
        self.lock().last().map(|(_, value)| Arc::clone(value))
    }

    /// Number of values received from the listener registered under `id`.
    pub fn count_from(&self, id: Uuid) -> usize {
        self.lock().iter().filter(|(from, _)| *from == id).count()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(Uuid, Arc<T>)>> {
        self.received.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> std::fmt::Debug for SinkMock<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let received = self.received.lock().map(|r| r.len()).unwrap_or_default();
        f.debug_struct("SinkMock")
            .field("received", &received)
            .field("callback", &"<callback_fn>")
            .finish()
    }
}
