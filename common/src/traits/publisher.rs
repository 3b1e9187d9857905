use crate::types::Callback;
use uuid::Uuid;

/// Anything that can be registered on a publisher and called back with values of type `T`.
pub trait Notifiable<T>: Sync + Send {
    fn get_callback(&self) -> Callback<T>;
    fn set_id(&mut self, id: Uuid);
}
