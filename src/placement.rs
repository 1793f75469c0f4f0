//! Positioning-strategy library for relative placement.
//!
//! Every placement in a volume tree is expressed as
//! `reference_point + offset(reference_solid, new_solid)`, where the offset
//! is a formula over the two solids' half-extents. Changing one volume's
//! dimensions therefore re-derives every downstream position that references
//! it; no placement ever hard-codes a global coordinate.

use crate::math::{Axis, Vector3};
use crate::solid::Solid;

/// Which side of the reference volume the new volume lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Negative,
    Positive,
}

impl Side {
    /// Returns the sign of this side as a factor.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Side::Negative => -1.0,
            Side::Positive => 1.0,
        }
    }
}

/// Offset rule along a single axis, as a formula over the reference
/// volume's half-extent `r` and the new volume's half-extent `n`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisRule {
    /// Zero offset; concentric with the reference along this axis.
    Centered,
    /// `±(r + n)`: flush abutment, the two faces touch with no gap.
    Flush(Side),
    /// `±(r - n)`: the faces on the given side are coplanar, the new
    /// volume overlapping the reference's span along this axis.
    Aligned(Side),
    /// A caller-supplied offset, for prescribed gaps or insets that the
    /// caller has already derived from half-extents.
    Fixed(f64),
}

impl AxisRule {
    /// Evaluates the rule for the given half-extents.
    #[must_use]
    pub fn offset(self, reference_half: f64, new_half: f64) -> f64 {
        match self {
            AxisRule::Centered => 0.0,
            AxisRule::Flush(side) => side.sign() * (reference_half + new_half),
            AxisRule::Aligned(side) => side.sign() * (reference_half - new_half),
            AxisRule::Fixed(value) => value,
        }
    }
}

/// A full 3D offset rule: one [`AxisRule`] per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offset {
    pub x: AxisRule,
    pub y: AxisRule,
    pub z: AxisRule,
}

impl Offset {
    /// Concentric placement: zero offset on all axes.
    #[must_use]
    pub fn centered() -> Self {
        Self {
            x: AxisRule::Centered,
            y: AxisRule::Centered,
            z: AxisRule::Centered,
        }
    }

    /// Flush abutment along one axis, centered on the others.
    #[must_use]
    pub fn flush(axis: Axis, side: Side) -> Self {
        Self::centered().with(axis, AxisRule::Flush(side))
    }

    /// Replaces the rule along one axis.
    #[must_use]
    pub fn with(mut self, axis: Axis, rule: AxisRule) -> Self {
        match axis {
            Axis::X => self.x = rule,
            Axis::Y => self.y = rule,
            Axis::Z => self.z = rule,
        }
        self
    }

    /// Returns the rule along the given axis.
    #[must_use]
    pub fn rule(&self, axis: Axis) -> AxisRule {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Evaluates the offset vector for a concrete pair of solids.
    #[must_use]
    pub fn vector(&self, reference: &Solid, new: &Solid) -> Vector3 {
        let mut v = Vector3::zeros();
        for axis in Axis::ALL {
            let value = self
                .rule(axis)
                .offset(reference.half_extent(axis), new.half_extent(axis));
            v += value * axis.unit();
        }
        v
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::math::TOLERANCE;
    use crate::solid::{Cuboid, Tube};
    use crate::units::{CM, DEG};

    fn tube() -> Solid {
        Tube::new("t", 0.0, 2.5 * CM, 2.5 * CM, 360.0 * DEG)
            .unwrap()
            .into()
    }

    fn box5() -> Solid {
        Cuboid::new("b", 5.0 * CM, 2.5 * CM, 5.0 * CM).unwrap().into()
    }

    #[test]
    fn centered_is_zero() {
        let v = Offset::centered().vector(&tube(), &box5());
        assert!(v.norm() < TOLERANCE);
    }

    #[test]
    fn flush_sums_half_extents() {
        let v = Offset::flush(Axis::Y, Side::Positive).vector(&tube(), &box5());
        assert_relative_eq!(v.y, 5.0 * CM, epsilon = TOLERANCE);
        assert_relative_eq!(v.x, 0.0, epsilon = TOLERANCE);
        assert_relative_eq!(v.z, 0.0, epsilon = TOLERANCE);
    }

    #[test]
    fn flush_negative_side() {
        let v = Offset::flush(Axis::Z, Side::Negative).vector(&tube(), &box5());
        assert_relative_eq!(v.z, -7.5 * CM, epsilon = TOLERANCE);
    }

    #[test]
    fn aligned_subtracts_half_extents() {
        // Tube radius 2.5 cm, box half-width 5 cm: coplanar +X faces put the
        // box center 2.5 cm on the negative side of the tube center.
        let v = Offset::centered()
            .with(Axis::X, AxisRule::Aligned(Side::Positive))
            .vector(&tube(), &box5());
        assert_relative_eq!(v.x, -2.5 * CM, epsilon = TOLERANCE);
    }

    #[test]
    fn fixed_passes_through() {
        let v = Offset::centered()
            .with(Axis::Z, AxisRule::Fixed(1.25 * CM))
            .vector(&tube(), &box5());
        assert_relative_eq!(v.z, 1.25 * CM, epsilon = TOLERANCE);
    }

    #[test]
    fn combined_rules_match_hand_arithmetic() {
        // The veto-box pattern: aligned on X and Z, flush on Y.
        let v = Offset::centered()
            .with(Axis::X, AxisRule::Aligned(Side::Positive))
            .with(Axis::Y, AxisRule::Flush(Side::Positive))
            .with(Axis::Z, AxisRule::Aligned(Side::Positive))
            .vector(&tube(), &box5());
        assert_relative_eq!(v.x, (2.5 - 5.0) * CM, epsilon = TOLERANCE);
        assert_relative_eq!(v.y, (2.5 + 2.5) * CM, epsilon = TOLERANCE);
        assert_relative_eq!(v.z, (2.5 - 5.0) * CM, epsilon = TOLERANCE);
    }
}
