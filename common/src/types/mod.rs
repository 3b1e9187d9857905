pub mod buffers;
pub mod callback;
pub mod chart;
pub mod sensors;
pub mod untimed;
pub mod update_interval;

pub use buffers::{RollingWindow, WindowReader, WindowSnapshot};
pub use callback::Callback;
pub use chart::ChartSeries;
pub use sensors::SensorType;
pub use untimed::XYZ;
pub use update_interval::UpdateInterval;
