//! Third revision: the detailed cryostat/crystal-holder assembly. Inside
//! the evacuated end cap, the crystal carries a thin outer dead layer and
//! hangs in a copper holder cup, gripped by two identical retaining rings
//! placed from a single logical volume at the dead layer's two ends.

use super::DetectorModel;
use crate::error::Result;
use crate::material::MaterialTable;
use crate::math::Axis;
use crate::placement::{AxisRule, Offset, Side};
use crate::solid::{Cuboid, Tube};
use crate::tree::{PhysicalId, VolumeTree};
use crate::units::{CM, DEG, M, MM};
use crate::vis::{Color, VisAttributes};

/// The detailed cryostat/holder revision.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullCryostat;

const ENDCAP_RADIUS: f64 = 4.5 * CM;
const ENDCAP_HALF_HEIGHT: f64 = 7.0 * CM;
const WALL: f64 = 3.0 * MM;
/// Standoff between dead-layer face and the inside of the window.
const STANDOFF: f64 = 5.0 * MM;
/// Active crystal dimensions.
const CRYSTAL_RADIUS: f64 = 3.2 * CM;
const CRYSTAL_HALF_HEIGHT: f64 = 3.5 * CM;
/// Dead-layer thickness on the outer surface.
const DEAD_LAYER: f64 = 0.5 * MM;
/// Retaining rings: radial clearance to the dead layer, thickness, height.
const RING_CLEARANCE: f64 = 0.5 * MM;
const RING_THICKNESS: f64 = 2.0 * MM;
const RING_HALF_HEIGHT: f64 = 0.5 * CM;
/// Holder cup: radial clearance to the rings, wall thickness, half-height.
const CUP_CLEARANCE: f64 = 0.5 * MM;
const CUP_WALL: f64 = 2.0 * MM;
const CUP_HALF_HEIGHT: f64 = 3.9 * CM;
/// Annular NaI shield around the end cap.
const SHIELD_CLEARANCE: f64 = 5.0 * MM;
const SHIELD_THICKNESS: f64 = 5.0 * CM;

impl DetectorModel for FullCryostat {
    fn name(&self) -> &'static str {
        "full-cryostat"
    }

    fn sensitive_volume(&self) -> &'static str {
        "Crystal"
    }

    #[allow(clippy::too_many_lines)]
    fn construct(
        &self,
        materials: &mut MaterialTable,
        tree: &mut VolumeTree,
    ) -> Result<PhysicalId> {
        let air = materials.resolve("air")?;
        let vacuum = materials.resolve("vacuum")?;
        let al = materials.resolve("aluminum")?;
        let cu = materials.resolve("copper")?;
        let ge = materials.resolve("germanium")?;
        let nai = materials.resolve("sodium_iodide")?;

        let world_lv = tree.add_logical(
            "World",
            Cuboid::cube("World", 1.0 * M)?.into(),
            air,
            VisAttributes::wireframe(Color::WHITE),
        )?;
        let world = tree.place_root(world_lv)?;

        let endcap_lv = tree.add_logical(
            "Endcap",
            Tube::new(
                "Endcap",
                0.0,
                ENDCAP_RADIUS,
                ENDCAP_HALF_HEIGHT,
                360.0 * DEG,
            )?
            .into(),
            al,
            VisAttributes::solid(Color::GRAY.with_alpha(0.3)?),
        )?;
        let endcap_pv = tree.place_child(endcap_lv, world, world, Offset::centered(), 0)?;

        let cavity = Tube::new(
            "Cavity",
            0.0,
            ENDCAP_RADIUS - WALL,
            ENDCAP_HALF_HEIGHT - WALL,
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

        // Crystal with its dead layer: the dead layer is the outer shell,
        // the active volume a centered nesting inside it.
        let dead_layer = Tube::new(
            "DeadLayer",
            0.0,
            CRYSTAL_RADIUS + DEAD_LAYER,
            CRYSTAL_HALF_HEIGHT + DEAD_LAYER,
            360.0 * DEG,
        )?;
        let dead_layer_radius = dead_layer.outer_radius();
        let dead_layer_half_height = dead_layer.half_height();
        let dead_layer_z = cavity_half_height - dead_layer_half_height - STANDOFF;
        let dead_layer_lv = tree.add_logical(
            "DeadLayer",
            dead_layer.into(),
            ge,
            VisAttributes::solid(Color::BLUE),
        )?;
        let dead_layer_pv = tree.place_child(
            dead_layer_lv,
            cavity_pv,
            cavity_pv,
            Offset::centered().with(Axis::Z, AxisRule::Fixed(dead_layer_z)),
            0,
        )?;

        let crystal_lv = tree.add_logical(
            "Crystal",
            Tube::new(
                "Crystal",
                0.0,
                CRYSTAL_RADIUS,
                CRYSTAL_HALF_HEIGHT,
                360.0 * DEG,
            )?
            .into(),
            ge,
            VisAttributes::solid(Color::CYAN),
        )?;
        tree.place_child(
            crystal_lv,
            dead_layer_pv,
            dead_layer_pv,
            Offset::centered(),
            0,
        )?;

        // Two identical retaining rings from one logical volume, their
        // outer faces coplanar with the dead layer's two end faces.
        let ring_inner = dead_layer_radius + RING_CLEARANCE;
        let ring_lv = tree.add_logical(
            "HolderRing",
            Tube::new(
                "HolderRing",
                ring_inner,
                ring_inner + RING_THICKNESS,
                RING_HALF_HEIGHT,
                360.0 * DEG,
            )?
            .into(),
            cu,
            VisAttributes::solid(Color::YELLOW),
        )?;
        tree.place_child(
            ring_lv,
            cavity_pv,
            dead_layer_pv,
            Offset::centered().with(Axis::Z, AxisRule::Aligned(Side::Positive)),
            1,
        )?;
        tree.place_child(
            ring_lv,
            cavity_pv,
            dead_layer_pv,
            Offset::centered().with(Axis::Z, AxisRule::Aligned(Side::Negative)),
            2,
        )?;

        // Copper holder cup around the rings, concentric with the crystal
        // stack.
        let cup_inner = ring_inner + RING_THICKNESS + CUP_CLEARANCE;
        let cup_lv = tree.add_logical(
            "HolderCup",
            Tube::new(
                "HolderCup",
                cup_inner,
                cup_inner + CUP_WALL,
                CUP_HALF_HEIGHT,
                360.0 * DEG,
            )?
            .into(),
            cu,
            VisAttributes::solid(Color::YELLOW.with_alpha(0.6)?),
        )?;
        tree.place_child(cup_lv, cavity_pv, dead_layer_pv, Offset::centered(), 0)?;

        let shield_inner = ENDCAP_RADIUS + SHIELD_CLEARANCE;
        let shield_lv = tree.add_logical(
            "Shield",
            Tube::new(
                "Shield",
                shield_inner,
                shield_inner + SHIELD_THICKNESS,
                ENDCAP_HALF_HEIGHT,
                360.0 * DEG,
            )?
            .into(),
            nai,
            VisAttributes::solid(Color::GRAY.with_alpha(0.5)?),
        )?;
        tree.place_child(shield_lv, world, world, Offset::centered(), 0)?;

        Ok(world)
    }
}
