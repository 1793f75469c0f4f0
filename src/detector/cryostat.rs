//! Second revision: a realistic cylindrical cryostat. The crystal sits in
//! a vacuum cavity behind an aluminum end cap, with a defined standoff to
//! the entrance window; an annular NaI shield surrounds the end cap with a
//! radial clearance, closed by a plug flush against its back face.

use super::DetectorModel;
use crate::error::Result;
use crate::material::MaterialTable;
use crate::math::Axis;
use crate::placement::{AxisRule, Offset, Side};
use crate::solid::{Cuboid, Tube};
use crate::tree::{PhysicalId, VolumeTree};
use crate::units::{CM, DEG, M, MM};
use crate::vis::{Color, VisAttributes};

/// The cylindrical-cryostat revision.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cryostat;

/// End-cap outer radius.
const ENDCAP_RADIUS: f64 = 4.0 * CM;
/// End-cap half-height.
const ENDCAP_HALF_HEIGHT: f64 = 6.0 * CM;
/// Aluminum side-wall thickness.
const WALL: f64 = 3.0 * MM;
/// Entrance-window thickness.
const WINDOW: f64 = 3.0 * MM;
/// Standoff between crystal face and the inside of the window.
const STANDOFF: f64 = 5.0 * MM;
/// Crystal radius and half-height.
const CRYSTAL_RADIUS: f64 = 3.0 * CM;
const CRYSTAL_HALF_HEIGHT: f64 = 3.0 * CM;
/// Annular shield: radial clearance to the end cap, and thickness.
const SHIELD_CLEARANCE: f64 = 5.0 * MM;
const SHIELD_THICKNESS: f64 = 5.0 * CM;
/// Back-plug half-height.
const PLUG_HALF_HEIGHT: f64 = 2.5 * CM;

impl DetectorModel for Cryostat {
    fn name(&self) -> &'static str {
        "cryostat"
    }

    fn sensitive_volume(&self) -> &'static str {
        "Crystal"
    }

    fn construct(
        &self,
        materials: &mut MaterialTable,
        tree: &mut VolumeTree,
    ) -> Result<PhysicalId> {
        let air = materials.resolve("air")?;
        let vacuum = materials.resolve("vacuum")?;
        let al = materials.resolve("aluminum")?;
        let ge = materials.resolve("germanium")?;
        let nai = materials.resolve("sodium_iodide")?;

        let world_lv = tree.add_logical(
            "World",
            Cuboid::cube("World", 1.0 * M)?.into(),
            air,
            VisAttributes::wireframe(Color::WHITE),
        )?;
        let world = tree.place_root(world_lv)?;

        // Aluminum end cap with its evacuated interior.
        let endcap = Tube::new(
            "Endcap",
            0.0,
            ENDCAP_RADIUS,
            ENDCAP_HALF_HEIGHT,
            360.0 * DEG,
        )?;
        let endcap_lv = tree.add_logical(
            "Endcap",
            endcap.into(),
            al,
            VisAttributes::solid(Color::GRAY.with_alpha(0.3)?),
        )?;
        let endcap_pv = tree.place_child(endcap_lv, world, world, Offset::centered(), 0)?;

        let cavity = Tube::new(
            "Cavity",
            0.0,
            ENDCAP_RADIUS - WALL,
            ENDCAP_HALF_HEIGHT - WINDOW,
            360.0 * DEG,
        )?;
        let cavity_half_height = cavity.half_height();
        let cavity_lv = tree.add_logical(
            "Cavity",
            cavity.into(),
            vacuum,
            VisAttributes::wireframe(Color::WHITE),
        )?;
        let cavity_pv = tree.place_child(cavity_lv, endcap_pv, endcap_pv, Offset::centered(), 0)?;

        // The crystal floats in the cavity, its front face a fixed standoff
        // behind the window (the +Z end of the cavity).
        let crystal = Tube::new(
            "Crystal",
            0.0,
            CRYSTAL_RADIUS,
            CRYSTAL_HALF_HEIGHT,
            360.0 * DEG,
        )?;
        let crystal_z = cavity_half_height - crystal.half_height() - STANDOFF;
        let crystal_lv = tree.add_logical(
            "Crystal",
            crystal.into(),
            ge,
            VisAttributes::solid(Color::CYAN),
        )?;
        tree.place_child(
            crystal_lv,
            cavity_pv,
            cavity_pv,
            Offset::centered().with(Axis::Z, AxisRule::Fixed(crystal_z)),
            0,
        )?;

        // Annular NaI shield around the end cap, clear of it radially.
        let shield_inner = ENDCAP_RADIUS + SHIELD_CLEARANCE;
        let shield = Tube::new(
            "Shield",
            shield_inner,
            shield_inner + SHIELD_THICKNESS,
            ENDCAP_HALF_HEIGHT,
            360.0 * DEG,
        )?;
        let shield_lv = tree.add_logical(
            "Shield",
            shield.into(),
            nai,
            VisAttributes::solid(Color::GRAY.with_alpha(0.5)?),
        )?;
        let shield_pv = tree.place_child(shield_lv, world, world, Offset::centered(), 0)?;

        // Back plug closing the shield, flush against its -Z face.
        let plug = Tube::new(
            "ShieldPlug",
            0.0,
            shield_inner + SHIELD_THICKNESS,
            PLUG_HALF_HEIGHT,
            360.0 * DEG,
        )?;
        let plug_lv = tree.add_logical(
            "ShieldPlug",
            plug.into(),
            nai,
            VisAttributes::solid(Color::GRAY.with_alpha(0.5)?),
        )?;
        tree.place_child(
            plug_lv,
            world,
            shield_pv,
            Offset::flush(Axis::Z, Side::Negative),
            1,
        )?;

        Ok(world)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::math::TOLERANCE;

    #[test]
    fn crystal_standoff_behind_window() {
        let assembly = Cryostat.build().unwrap();
        let pv = assembly.tree.find_placement("Crystal", 0).unwrap();
        let pos = assembly.tree.physical(pv).unwrap().translation();
        let cavity_half_height = ENDCAP_HALF_HEIGHT - WINDOW;
        let gap = cavity_half_height - (pos.z + CRYSTAL_HALF_HEIGHT);
        assert_relative_eq!(gap, STANDOFF, epsilon = TOLERANCE);
    }

    #[test]
    fn nested_shells_are_concentric() {
        let assembly = Cryostat.build().unwrap();
        let endcap = assembly.tree.find_placement("Endcap", 0).unwrap();
        let cavity = assembly.tree.find_placement("Cavity", 0).unwrap();
        // Centered placement: identical global positions.
        let a = assembly.tree.global_position(endcap).unwrap();
        let b = assembly.tree.global_position(cavity).unwrap();
        assert!((a - b).norm() < TOLERANCE);
    }

    #[test]
    fn plug_flush_against_shield() {
        let assembly = Cryostat.build().unwrap();
        let shield = assembly.tree.find_placement("Shield", 0).unwrap();
        let plug = assembly.tree.find_placement("ShieldPlug", 1).unwrap();
        let shield_pos = assembly.tree.physical(shield).unwrap().translation();
        let plug_pos = assembly.tree.physical(plug).unwrap().translation();
        let separation = (shield_pos.z - plug_pos.z).abs();
        assert_relative_eq!(
            separation,
            ENDCAP_HALF_HEIGHT + PLUG_HALF_HEIGHT,
            epsilon = TOLERANCE
        );
    }

    #[test]
    fn shield_clears_endcap_radially() {
        let assembly = Cryostat.build().unwrap();
        let shield = assembly.tree.find_logical("Shield").unwrap();
        let lv = assembly.tree.logical(shield).unwrap();
        let tube = lv.solid().as_tube().unwrap();
        assert!(tube.inner_radius() - ENDCAP_RADIUS >= SHIELD_CLEARANCE - TOLERANCE);
    }
}
