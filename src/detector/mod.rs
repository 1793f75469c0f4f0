//! The detector-geometry revisions.
//!
//! Three revisions of the same apparatus, in increasing mechanical detail:
//! [`Simple`] (stand-in shapes), [`Cryostat`] (a realistic cylindrical
//! cryostat) and [`FullCryostat`] (the multi-layer cryostat/crystal-holder
//! assembly). All three are datasets driving the one placement engine in
//! [`crate::tree`]; every build validates the non-overlap invariant and
//! binds the germanium crystal for energy scoring before returning.

pub mod cryostat;
pub mod full;
pub mod simple;

pub use cryostat::Cryostat;
pub use full::FullCryostat;
pub use simple::Simple;

use tracing::info;

use crate::error::Result;
use crate::material::MaterialTable;
use crate::sensitive::ScoringRegistry;
use crate::tree::{PhysicalId, VolumeTree};

/// Name under which the primary detector's scoring is registered.
pub const PRIMARY_DETECTOR: &str = "Detector";

/// A fully built detector: the volume tree, the materials it references,
/// the scoring bindings, and the world placement handed to the engine.
#[derive(Debug)]
pub struct Assembly {
    pub tree: VolumeTree,
    pub materials: MaterialTable,
    pub scoring: ScoringRegistry,
    pub world: PhysicalId,
}

/// One revision of the detector geometry.
///
/// `build` is the engine's two-phase initialization rolled into one
/// explicit call: construct the tree, validate it, attach scoring, and
/// hand everything back to the caller. Nothing is registered in global
/// state.
pub trait DetectorModel {
    /// Returns the revision's name, for logging and diagnostics.
    fn name(&self) -> &'static str;

    /// Name of the logical volume instrumented as the primary detector.
    fn sensitive_volume(&self) -> &'static str;

    /// Constructs the volume tree, rooted at the world volume.
    ///
    /// # Errors
    ///
    /// Returns an error on invalid solid parameters, unresolvable
    /// materials, or misuse of the tree builder.
    fn construct(&self, materials: &mut MaterialTable, tree: &mut VolumeTree) -> Result<PhysicalId>;

    /// Builds, validates and instruments the geometry.
    ///
    /// # Errors
    ///
    /// Propagates construction errors, a violated non-overlap invariant,
    /// or a failed sensitive binding. These are unrecoverable
    /// configuration errors; nothing is partially constructed on failure.
    fn build(&self) -> Result<Assembly> {
        let mut materials = MaterialTable::new();
        let mut tree = VolumeTree::new();
        let world = self.construct(&mut materials, &mut tree)?;
        tree.validate_overlaps()?;

        let mut scoring = ScoringRegistry::new();
        scoring.bind(PRIMARY_DETECTOR, [self.sensitive_volume()], &tree)?;

        info!(
            revision = self.name(),
            placements = tree.placement_count(),
            "detector geometry built"
        );
        Ok(Assembly {
            tree,
            materials,
            scoring,
            world,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;
    use crate::units::MEV;

    #[test]
    fn all_revisions_build_and_validate() {
        let models: [&dyn DetectorModel; 3] = [&Simple, &Cryostat, &FullCryostat];
        for model in models {
            let assembly = model.build().unwrap();
            assert_eq!(assembly.tree.world().unwrap(), assembly.world);
            assert!(assembly.tree.contains_logical(model.sensitive_volume()));
        }
    }

    #[test]
    fn deposit_read_out_per_event() {
        let mut assembly = Simple.build().unwrap();
        assembly
            .scoring
            .add_deposit(Simple.sensitive_volume(), 1.0 * MEV);
        let readout = assembly.scoring.end_of_event();
        assert_eq!(readout[0].detector, PRIMARY_DETECTOR);
        assert!((readout[0].energy - 1.0 * MEV).abs() < TOLERANCE);
        // Reset for the next event.
        assert!(assembly.scoring.current(PRIMARY_DETECTOR).unwrap().abs() < TOLERANCE);
    }
}
