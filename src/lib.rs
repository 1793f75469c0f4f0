pub mod detector;
pub mod error;
pub mod material;
pub mod math;
pub mod placement;
pub mod run;
pub mod sensitive;
pub mod solid;
pub mod tree;
pub mod units;
pub mod vis;

pub use error::{DetGeoError, Result};
