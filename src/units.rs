//! Unit constants for expressing detector dimensions and energies.
//!
//! Lengths are stored in millimeters and energies in MeV; multiply a
//! literal by the matching constant when building geometry
//! (`5.0 * CM`, `1.0 * M`, `661.7 * KEV`).

use std::f64::consts::PI;

/// Millimeter, the base length unit.
pub const MM: f64 = 1.0;

/// Centimeter.
pub const CM: f64 = 10.0 * MM;

/// Meter.
pub const M: f64 = 1000.0 * MM;

/// Degree, in radians.
pub const DEG: f64 = PI / 180.0;

/// Mega-electronvolt, the base energy unit.
pub const MEV: f64 = 1.0;

/// Kilo-electronvolt.
pub const KEV: f64 = 1e-3 * MEV;
