use thiserror::Error;

use crate::math::Axis;

/// Top-level error type for the detgeo geometry kernel.
#[derive(Debug, Error)]
pub enum DetGeoError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Material(#[from] MaterialError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

/// Errors related to solid parameters and placement geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("invalid solid {solid}: {reason}")]
    InvalidSolid { solid: String, reason: String },

    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error(
        "flush placement of {volume} against {reference} violated along {axis}: \
         separation {separation} < required {required}"
    )]
    FlushViolation {
        volume: String,
        reference: String,
        axis: Axis,
        separation: f64,
        required: f64,
    },

    #[error("sibling volumes {first} and {second} interpenetrate")]
    Overlap { first: String, second: String },

    #[error("volume {child} extends outside its parent {parent}")]
    NotContained { child: String, parent: String },
}

/// Errors related to material resolution.
#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("unknown material: {0}")]
    Unknown(String),

    #[error("material id not found in table")]
    NotFound,
}

/// Errors related to the volume tree.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("entity not found: {0}")]
    EntityNotFound(&'static str),

    #[error("logical volume name already in use: {0}")]
    DuplicateVolume(String),

    #[error("a world volume has already been placed")]
    WorldAlreadyPlaced,

    #[error("no world volume has been placed")]
    NoWorld,

    #[error("placement reference for {0} is neither the parent nor a sibling")]
    InvalidReference(String),
}

/// Errors related to sensitive-region binding and scoring.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("cannot bind sensitive region: volume {0} does not exist in the tree")]
    UnknownVolume(String),

    #[error("detector already bound: {0}")]
    DuplicateDetector(String),
}

/// Convenience type alias for results using [`DetGeoError`].
pub type Result<T> = std::result::Result<T, DetGeoError>;
