use std::sync::Arc;
use uuid::Uuid;

use common::traits::Notifiable;
use common::types::Callback;

#[derive(Clone)]
pub struct Listener<T> {
    callback: Callback<T>,
    id: Option<Uuid>,
}

impl<T> Listener<T>
where
    T: Send + Sync + 'static,
{
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(Uuid, Arc<T>) + Send + Sync + 'static,
    {
        Listener {
            callback: Arc::new(callback),
            id: None,
        }
    }

    /// Id assigned by the last publisher this listener was registered on.
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }
}

impl<T> Notifiable<T> for Listener<T>
where
    T: Send + Sync,
{
    fn get_callback(&self) -> Callback<T> {
        self.callback.clone()
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener;
    use std::sync::Mutex;

    struct TestHandler {
        data: Mutex<Vec<i32>>,
    }

    impl TestHandler {
        fn new() -> Self {
            Self {
                data: Mutex::new(Vec::new()),
            }
        }

        fn handle(&self, _id: Uuid, value: Arc<Vec<i32>>) {
            let mut data = self.data.lock().unwrap();
            *data = (*value).clone();
        }
    }

    #[test]
    fn test_new_listener() {
        let listener = Listener::new(move |_id: Uuid, value: Arc<i32>| {
            assert_eq!(*value, 42);
        });

        assert!(listener.id().is_none());
        let callback = listener.get_callback();
        callback(Uuid::new_v4(), Arc::new(42));
    }

    #[test]
    fn test_set_id() {
        let mut listener = Listener::new(|_id: Uuid, _value: Arc<i32>| {});
        let id = Uuid::new_v4();
        listener.set_id(id);
        assert_eq!(listener.id(), Some(id));
    }

    #[test]
    fn test_listener_with_macro() {
        let handler = Arc::new(TestHandler::new());

        let listener = listener!(handler.handle);

        let callback = listener.get_callback();
        callback(Uuid::new_v4(), Arc::new(vec![400]));
        assert_eq!(*handler.data.lock().unwrap(), vec![400]);
    }
}
