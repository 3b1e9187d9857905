//! # Crate publisher
//!
//! ## publisher
//!
//! The `publisher` crate provides a mechanism for registering and notifying listeners
//! of new values of type `T`. It is used twice in the workspace: sensors deliver raw
//! samples to their listeners through it, and sensor monitors announce every new
//! window snapshot through it.
//!
//! ### Example
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use publisher::{Listener, Publishable, Publisher};
//!
//! let publisher = Publisher::<String>::new();
//! let received = Arc::new(Mutex::new(Vec::new()));
//!
//! // Register a listener
//! let mut listener = Listener::new({
//!     let received = received.clone();
//!     move |_id, data: Arc<String>| received.lock().unwrap().push((*data).clone())
//! });
//! let listener_id = publisher.register_listener(&mut listener);
//!
//! // Notify all listeners
//! publisher.notify_listeners(Arc::new("Hello, World!".to_string()));
//!
//! // Unregister the listener
//! assert!(publisher.unregister_listener(listener_id));
//! assert!(publisher.is_empty());
//! assert_eq!(received.lock().unwrap().len(), 1);
//! ```

pub mod listener;
pub mod macros;
pub mod publisher;

pub use listener::Listener;
pub use publisher::{is_delivering, Publishable, Publisher};
