//! Formatting helpers for values shown next to the chart.

/// Truncates `n` to two decimal places for display.
///
/// Missing, zero and NaN values all display as `0`. Everything else is
/// floored at the second decimal, so negative values move away from zero:
///
/// ```
/// use common::display::round;
///
/// assert_eq!(round(1.2399), 1.23);
/// assert_eq!(round(-1.005), -1.01);
/// assert_eq!(round(None), 0.0);
/// ```
pub fn round(n: impl Into<Option<f64>>) -> f64 {
    match n.into() {
        Some(value) if value != 0.0 && !value.is_nan() => (value * 100.0).floor() / 100.0,
        _ => 0.0,
    }
}
