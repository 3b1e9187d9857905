use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use common::types::XYZ;

/// Functionality to add some Gaussian noise.
#[derive(Clone, Debug)]
pub(super) struct GaussianNoise {
    normal: Normal<f64>,
}

impl GaussianNoise {
    /// Creates new distribution from mean and stdev
    pub(super) fn new(mean: f64, stdev: f64) -> Result<Self, String> {
        let normal = Normal::new(mean, stdev).map_err(|e| e.to_string())?;
        Ok(Self { normal })
    }

    /// Adds independent noise to every axis of `sample`
    pub(super) fn add_noise(&self, rng: &mut StdRng, sample: XYZ) -> XYZ {
        let [x, y, z] = sample.inner();
        XYZ::new([
            x + self.normal.sample(rng),
            y + self.normal.sample(rng),
            z + self.normal.sample(rng),
        ])
    }
}
