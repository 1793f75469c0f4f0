use std::fmt;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons, in millimeters.
pub const TOLERANCE: f64 = 1e-9;

/// One of the three coordinate axes of a volume's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All three axes, in order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the component of `v` along this axis.
    #[must_use]
    pub fn component(self, v: &Vector3) -> f64 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    /// Returns the unit vector along this axis.
    #[must_use]
    pub fn unit(self) -> Vector3 {
        match self {
            Axis::X => Vector3::x(),
            Axis::Y => Vector3::y(),
            Axis::Z => Vector3::z(),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
            Axis::Z => write!(f, "Z"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_picks_axis() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert!((Axis::X.component(&v) - 1.0).abs() < TOLERANCE);
        assert!((Axis::Y.component(&v) - 2.0).abs() < TOLERANCE);
        assert!((Axis::Z.component(&v) - 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn unit_vectors() {
        assert!((Axis::Z.unit() - Vector3::z()).norm() < TOLERANCE);
    }
}
