//! General functionality for the `motion-chart` workspace: sample and sensor types,
//! the rolling sample window, chart series and display rounding.

pub mod display;

#[doc(hidden)]
pub mod traits;
#[doc(hidden)]
pub mod types;

// Re-export traits
#[doc(inline)]
pub use traits::Notifiable;

// Re-export types
#[doc(inline)]
pub use types::{
    buffers, ChartSeries, RollingWindow, SensorType, UpdateInterval, WindowReader,
    WindowSnapshot, XYZ,
};
