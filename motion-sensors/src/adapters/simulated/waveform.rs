use std::f64::consts::TAU;

use common::types::{SensorType, XYZ};

// samples per full period of the slowest axis
const BASE_PERIOD_SAMPLES: f64 = 40.0;

/// Synthetic readings: one sinusoid per axis, each with its own frequency, on
/// top of a constant offset.
#[derive(Clone, Debug)]
pub(crate) struct Waveform {
    tick: u64,
    amplitude: [f64; 3],
    offset: [f64; 3],
    cycles_per_sample: [f64; 3],
}

impl Waveform {
    pub(crate) fn for_sensor(sensor_type: &SensorType) -> Self {
        let (amplitude, offset) = match sensor_type {
            // rad/s
            SensorType::Gyroscope => ([1.5, 1.0, 0.5], [0.0, 0.0, 0.0]),
            // Gs, device lying flat
            SensorType::Accelerometer => ([0.2, 0.2, 0.1], [0.0, 0.0, 1.0]),
            // uT
            SensorType::Magnetometer => ([5.0, 5.0, 5.0], [20.0, 0.0, -40.0]),
            SensorType::Other(_) => ([1.0, 1.0, 1.0], [0.0, 0.0, 0.0]),
        };
        Self {
            tick: 0,
            amplitude,
            offset,
            cycles_per_sample: [
                1.0 / BASE_PERIOD_SAMPLES,
                2.0 / BASE_PERIOD_SAMPLES,
                3.0 / BASE_PERIOD_SAMPLES,
            ],
        }
    }

    pub(crate) fn next_sample(&mut self) -> XYZ {
        let t = self.tick as f64;
        self.tick += 1;
        let axis = |i: usize| {
            self.offset[i] + self.amplitude[i] * (TAU * self.cycles_per_sample[i] * t).sin()
        };
        XYZ::new([axis(0), axis(1), axis(2)])
    }
}
