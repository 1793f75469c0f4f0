use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::TOLERANCE;

/// A right circular tube (or full cylinder when the inner radius is zero),
/// coaxial with the local Z axis and centered on the local origin.
///
/// A partial revolution is expressed by a sweep angle below a full turn;
/// the half-extent queries ignore the sweep and report the bounding
/// cylinder, which is what the placement calculus works with.
#[derive(Debug, Clone)]
pub struct Tube {
    name: String,
    inner_radius: f64,
    outer_radius: f64,
    half_height: f64,
    sweep: f64,
}

impl Tube {
    /// Creates a new tube.
    ///
    /// # Arguments
    ///
    /// * `inner_radius` - Bore radius, `>= 0` and strictly below `outer_radius`
    /// * `outer_radius` - Outer radius (must be positive)
    /// * `half_height` - Half the axial length (must be positive)
    /// * `sweep` - Revolution angle in radians, in `(0, 2*pi]`
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidSolid`] or
    /// [`GeometryError::ParameterOutOfRange`] if any constraint is violated.
    pub fn new(
        name: &str,
        inner_radius: f64,
        outer_radius: f64,
        half_height: f64,
        sweep: f64,
    ) -> Result<Self> {
        if outer_radius < TOLERANCE {
            return Err(GeometryError::InvalidSolid {
                solid: name.into(),
                reason: "outer radius must be positive".into(),
            }
            .into());
        }
        if inner_radius < 0.0 {
            return Err(GeometryError::InvalidSolid {
                solid: name.into(),
                reason: "inner radius must not be negative".into(),
            }
            .into());
        }
        if inner_radius >= outer_radius {
            return Err(GeometryError::InvalidSolid {
                solid: name.into(),
                reason: "inner radius must be strictly below outer radius".into(),
            }
            .into());
        }
        if half_height < TOLERANCE {
            return Err(GeometryError::InvalidSolid {
                solid: name.into(),
                reason: "half-height must be positive".into(),
            }
            .into());
        }
        if sweep <= 0.0 || sweep > TAU + TOLERANCE {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "sweep",
                value: sweep,
                min: 0.0,
                max: TAU,
            }
            .into());
        }

        Ok(Self {
            name: name.into(),
            inner_radius,
            outer_radius,
            half_height,
            sweep,
        })
    }

    /// Returns the tube's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the bore radius.
    #[must_use]
    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    /// Returns the outer radius.
    #[must_use]
    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    /// Returns half the axial length.
    #[must_use]
    pub fn half_height(&self) -> f64 {
        self.half_height
    }

    /// Returns the revolution angle in radians.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    /// Returns true if the tube has a bore.
    #[must_use]
    pub fn has_bore(&self) -> bool {
        self.inner_radius > TOLERANCE
    }
}
