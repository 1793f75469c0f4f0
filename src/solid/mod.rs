pub mod cuboid;
pub mod tube;

pub use cuboid::Cuboid;
pub use tube::Tube;

use crate::math::Axis;

/// An immutable geometric primitive, named for lookup and diagnostics.
///
/// Consumers only ever query half-extents; the placement calculus in
/// [`crate::placement`] is written entirely in terms of them.
#[derive(Debug, Clone)]
pub enum Solid {
    Tube(Tube),
    Cuboid(Cuboid),
}

impl Solid {
    /// Returns the solid's name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Solid::Tube(t) => t.name(),
            Solid::Cuboid(c) => c.name(),
        }
    }

    /// Returns the half-extent along `axis`.
    ///
    /// For a tube the X and Y half-extents are its outer radius.
    #[must_use]
    pub fn half_extent(&self, axis: Axis) -> f64 {
        match self {
            Solid::Tube(t) => match axis {
                Axis::X | Axis::Y => t.outer_radius(),
                Axis::Z => t.half_height(),
            },
            Solid::Cuboid(c) => match axis {
                Axis::X => c.half_x(),
                Axis::Y => c.half_y(),
                Axis::Z => c.half_z(),
            },
        }
    }

    /// Returns the tube variant, if this solid is one.
    #[must_use]
    pub fn as_tube(&self) -> Option<&Tube> {
        match self {
            Solid::Tube(t) => Some(t),
            Solid::Cuboid(_) => None,
        }
    }
}

impl From<Tube> for Solid {
    fn from(t: Tube) -> Self {
        Solid::Tube(t)
    }
}

impl From<Cuboid> for Solid {
    fn from(c: Cuboid) -> Self {
        Solid::Cuboid(c)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;
    use crate::units::{CM, DEG};

    #[test]
    fn tube_half_extents_by_axis() {
        let s: Solid = Tube::new("t", 0.0, 2.5 * CM, 4.0 * CM, 360.0 * DEG)
            .unwrap()
            .into();
        assert!((s.half_extent(Axis::X) - 2.5 * CM).abs() < TOLERANCE);
        assert!((s.half_extent(Axis::Y) - 2.5 * CM).abs() < TOLERANCE);
        assert!((s.half_extent(Axis::Z) - 4.0 * CM).abs() < TOLERANCE);
    }

    #[test]
    fn cuboid_half_extents_by_axis() {
        let s: Solid = Cuboid::new("b", 1.0, 2.0, 3.0).unwrap().into();
        assert!((s.half_extent(Axis::X) - 1.0).abs() < TOLERANCE);
        assert!((s.half_extent(Axis::Y) - 2.0).abs() < TOLERANCE);
        assert!((s.half_extent(Axis::Z) - 3.0).abs() < TOLERANCE);
    }
}
