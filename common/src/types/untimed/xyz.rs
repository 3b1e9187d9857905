use nalgebra::Vector3;

pub const N_XYZ_COORDINATES: usize = 3;

/// One `(x, y, z)` reading from a motion sensor. Samples carry no timestamp:
/// their position in a window is their only notion of time.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct XYZ(Vector3<f64>);

impl XYZ {
    pub fn new(data: [f64; N_XYZ_COORDINATES]) -> Self {
        Self(Vector3::from(data))
    }

    pub fn from_vector(data: Vector3<f64>) -> Self {
        Self(data)
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn z(&self) -> f64 {
        self.0.z
    }

    pub fn inner(&self) -> [f64; N_XYZ_COORDINATES] {
        [self.0.x, self.0.y, self.0.z]
    }

    /// Returns false if any axis is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

impl From<XYZ> for [f64; N_XYZ_COORDINATES] {
    fn from(value: XYZ) -> Self {
        value.inner()
    }
}

impl From<[f64; N_XYZ_COORDINATES]> for XYZ {
    fn from(value: [f64; N_XYZ_COORDINATES]) -> Self {
        Self(Vector3::from(value))
    }
}

impl From<XYZ> for Vec<f64> {
    fn from(value: XYZ) -> Self {
        value.inner().to_vec()
    }
}

impl TryFrom<Vec<f64>> for XYZ {
    type Error = &'static str;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        if value.len() != N_XYZ_COORDINATES {
            return Err("Can't convert to XYZ");
        }
        Ok(Self(Vector3::from_vec(value)))
    }
}
