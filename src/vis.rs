use crate::error::{GeometryError, Result};

/// How a volume is drawn by a viewer. Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Wireframe,
    Solid,
}

/// An RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const WHITE: Color = Color::opaque(1.0, 1.0, 1.0);
    pub const GRAY: Color = Color::opaque(0.5, 0.5, 0.5);
    pub const CYAN: Color = Color::opaque(0.0, 1.0, 1.0);
    pub const RED: Color = Color::opaque(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::opaque(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::opaque(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::opaque(1.0, 1.0, 0.0);

    /// Creates a fully opaque color.
    #[must_use]
    pub const fn opaque(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Returns the same color with a different opacity.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] if the opacity is
    /// outside `[0, 1]`.
    pub fn with_alpha(self, alpha: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "alpha",
                value: alpha,
                min: 0.0,
                max: 1.0,
            }
            .into());
        }
        Ok(Self { a: alpha, ..self })
    }
}

/// Display style attached to a logical volume. No physical effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisAttributes {
    mode: DisplayMode,
    color: Color,
}

impl VisAttributes {
    /// Creates a new style.
    #[must_use]
    pub fn new(mode: DisplayMode, color: Color) -> Self {
        Self { mode, color }
    }

    /// Wireframe rendering in the given color.
    #[must_use]
    pub fn wireframe(color: Color) -> Self {
        Self::new(DisplayMode::Wireframe, color)
    }

    /// Solid rendering in the given color.
    #[must_use]
    pub fn solid(color: Color) -> Self {
        Self::new(DisplayMode::Solid, color)
    }

    /// Returns the display mode.
    #[must_use]
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Returns the color.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    #[test]
    fn alpha_in_range() {
        let c = Color::GRAY.with_alpha(0.5).unwrap();
        assert!((c.a - 0.5).abs() < TOLERANCE);
        assert!((c.r - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn alpha_out_of_range_fails() {
        assert!(Color::GRAY.with_alpha(-0.1).is_err());
        assert!(Color::GRAY.with_alpha(1.1).is_err());
    }

    #[test]
    fn constructors_set_mode() {
        assert_eq!(VisAttributes::wireframe(Color::WHITE).mode(), DisplayMode::Wireframe);
        assert_eq!(VisAttributes::solid(Color::CYAN).mode(), DisplayMode::Solid);
    }
}
