use gnuplot::PlotOption::LineWidth;
use gnuplot::{AxesCommon, Caption, Color, Figure};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use common::types::{ChartSeries, WindowSnapshot, XYZ};
use publisher::{listener, Listener};
use uuid::Uuid;

pub struct PlotManager {
    figure: Figure,
    series: ChartSeries,
    title: String,
    capacity: usize,
}

impl PlotManager {
    fn new(title: &str, capacity: usize) -> Self {
        Self {
            figure: Figure::new(),
            series: ChartSeries::default(),
            title: title.to_string(),
            capacity,
        }
    }

    fn set_series(&mut self, series: ChartSeries) {
        self.series = series;
    }

    pub fn update(&mut self) -> Result<(), String> {
        let sample_index: Vec<usize> = (0..self.series.len()).collect();

        self.figure.clear_axes();
        let axes = self.figure.axes2d();
        axes.set_title(&self.title, &[]);
        axes.set_x_label("Sample", &[]);
        axes.set_y_label("Measurements", &[]);
        axes.set_x_range(
            gnuplot::AutoOption::Fix(0.0),
            gnuplot::AutoOption::Fix(self.capacity.saturating_sub(1) as f64),
        );

        axes.lines(
            &sample_index,
            &self.series.x,
            &[Color("blue"), LineWidth(2.0), Caption("X")],
        );
        axes.lines(
            &sample_index,
            &self.series.y,
            &[Color("green"), LineWidth(2.0), Caption("Y")],
        );
        axes.lines(
            &sample_index,
            &self.series.z,
            &[Color("red"), LineWidth(2.0), Caption("Z")],
        );

        self.figure
            .show_and_keep_running()
            .map(|_| ())
            .map_err(|e| format!("{:?}", e))
    }
}

/// Line chart of a rolling window: one line per axis, oldest sample on the left.
#[derive(Clone)]
pub struct Plot1D(Arc<Mutex<PlotManager>>);

impl Plot1D {
    pub fn new(title: &str, capacity: usize) -> Self {
        Self(Arc::new(Mutex::new(PlotManager::new(title, capacity))))
    }

    /// Listener that keeps the chart data in step with the window it is registered on.
    pub fn listener(&self) -> Listener<WindowSnapshot<XYZ>> {
        listener!(self.process_snapshot)
    }

    pub fn process_snapshot(&self, _listener_id: Uuid, snapshot: Arc<WindowSnapshot<XYZ>>) {
        self.lock().set_series(ChartSeries::from(&*snapshot));
    }

    /// Redraws the chart every `refresh_period_millis` on a background thread.
    pub fn start(&self, refresh_period_millis: f64) {
        let plot = self.clone();
        thread::spawn(move || {
            let period = Duration::from_secs_f64(refresh_period_millis / 1000.0);
            loop {
                let start_time = Instant::now();
                if let Err(e) = plot.lock().update() {
                    log::error!("Error drawing plot: {}", e);
                    break;
                }

                let elapsed_time = start_time.elapsed();
                thread::sleep(period.saturating_sub(elapsed_time));
            }
        });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PlotManager> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::types::RollingWindow;

    #[test]
    fn test_plot_follows_snapshots() {
        let window = RollingWindow::new(3, Some(XYZ::default())).unwrap();
        let plot = Plot1D::new("Gyroscope:", 3);

        for i in 1..=4 {
            window.push(XYZ::new([i as f64, 0.0, -(i as f64)]));
            plot.process_snapshot(Uuid::new_v4(), Arc::new(window.snapshot()));
        }

        let manager = plot.lock();
        assert_eq!(manager.series.x, vec![2.0, 3.0, 4.0]);
        assert_eq!(manager.series.z, vec![-2.0, -3.0, -4.0]);
    }
}
