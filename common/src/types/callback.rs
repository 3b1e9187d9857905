use std::sync::Arc;
use uuid::Uuid;

/// Callback invoked with the id of the listener it was registered under and the notified value.
pub type Callback<T> = Arc<dyn Fn(Uuid, Arc<T>) + Send + Sync>;
