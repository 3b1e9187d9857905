use crate::types::{WindowSnapshot, XYZ};

/// Three parallel series, one per axis, ready to be drawn as one line each.
/// All series have the same length and are ordered oldest first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

impl<'a> FromIterator<&'a XYZ> for ChartSeries {
    fn from_iter<It: IntoIterator<Item = &'a XYZ>>(iter: It) -> Self {
        let mut series = ChartSeries::default();
        for sample in iter {
            series.x.push(sample.x());
            series.y.push(sample.y());
            series.z.push(sample.z());
        }
        series
    }
}

impl From<&WindowSnapshot<XYZ>> for ChartSeries {
    fn from(snapshot: &WindowSnapshot<XYZ>) -> Self {
        snapshot.iter().collect()
    }
}
