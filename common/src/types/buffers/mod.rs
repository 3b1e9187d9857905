pub mod circular_reader;
pub mod rolling_window;

pub use crate::types::buffers::circular_reader::CircularReader;
pub use crate::types::buffers::rolling_window::{RollingWindow, WindowReader, WindowSnapshot};
