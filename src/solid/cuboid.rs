use crate::error::{GeometryError, Result};
use crate::math::TOLERANCE;

/// An axis-aligned rectangular box centered on the local origin,
/// defined by its three half-widths.
#[derive(Debug, Clone)]
pub struct Cuboid {
    name: String,
    half_x: f64,
    half_y: f64,
    half_z: f64,
}

impl Cuboid {
    /// Creates a new cuboid from three half-widths, all of which must be
    /// positive.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidSolid`] if any half-width is not
    /// positive.
    pub fn new(name: &str, half_x: f64, half_y: f64, half_z: f64) -> Result<Self> {
        for (label, value) in [("x", half_x), ("y", half_y), ("z", half_z)] {
            if value < TOLERANCE {
                return Err(GeometryError::InvalidSolid {
                    solid: name.into(),
                    reason: format!("half-width along {label} must be positive"),
                }
                .into());
            }
        }

        Ok(Self {
            name: name.into(),
            half_x,
            half_y,
            half_z,
        })
    }

    /// Creates a cube from a single full side length.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidSolid`] if the side is not positive.
    pub fn cube(name: &str, side: f64) -> Result<Self> {
        Self::new(name, 0.5 * side, 0.5 * side, 0.5 * side)
    }

    /// Returns the cuboid's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the half-width along X.
    #[must_use]
    pub fn half_x(&self) -> f64 {
        self.half_x
    }

    /// Returns the half-width along Y.
    #[must_use]
    pub fn half_y(&self) -> f64 {
        self.half_y
    }

    /// Returns the half-width along Z.
    #[must_use]
    pub fn half_z(&self) -> f64 {
        self.half_z
    }
}
