//! First revision: stand-in shapes. A bare germanium cylinder in air,
//! boxed in on four sides by sodium-iodide veto slabs.

use super::DetectorModel;
use crate::error::Result;
use crate::material::MaterialTable;
use crate::math::Axis;
use crate::placement::{AxisRule, Offset, Side};
use crate::solid::{Cuboid, Tube};
use crate::tree::{PhysicalId, VolumeTree};
use crate::units::{CM, DEG, M};
use crate::vis::{Color, VisAttributes};

/// The stand-in-shape revision.
#[derive(Debug, Clone, Copy, Default)]
pub struct Simple;

impl DetectorModel for Simple {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn sensitive_volume(&self) -> &'static str {
        "MainDet"
    }

    fn construct(
        &self,
        materials: &mut MaterialTable,
        tree: &mut VolumeTree,
    ) -> Result<PhysicalId> {
        let air = materials.resolve("air")?;
        let ge = materials.resolve("germanium")?;
        let nai = materials.resolve("sodium_iodide")?;

        let vis_world = VisAttributes::wireframe(Color::WHITE);
        let vis_crystal = VisAttributes::solid(Color::CYAN);
        let vis_veto = VisAttributes::solid(Color::GRAY.with_alpha(0.5)?);

        let world_lv = tree.add_logical(
            "World",
            Cuboid::cube("World", 1.0 * M)?.into(),
            air,
            vis_world,
        )?;
        let world = tree.place_root(world_lv)?;

        // HPGe main detector, shifted off-center so the veto slabs wrap
        // around three of its sides.
        let crystal = Tube::new("MainDet", 0.0, 2.5 * CM, 2.5 * CM, 360.0 * DEG)?;
        let crystal_radius = crystal.outer_radius();
        let crystal_half_height = crystal.half_height();
        let crystal_lv = tree.add_logical("MainDet", crystal.into(), ge, vis_crystal)?;
        let crystal_pv = tree.place_child(
            crystal_lv,
            world,
            world,
            Offset::centered().with(Axis::X, AxisRule::Fixed(-crystal_radius)),
            0,
        )?;

        // NaI(Tl) veto slabs. Spans start from the crystal's own extents
        // plus a 5 cm margin, so resizing the crystal resizes the box.
        let span_x = 2.0 * crystal_radius;
        let span_y = 2.0 * crystal_radius;
        let span_z = 2.0 * crystal_half_height;
        let margin = 5.0 * CM;

        let veto_top = tree.add_logical(
            "SubDet1",
            Cuboid::new(
                "SubDet1",
                0.5 * (span_x + margin),
                0.5 * margin,
                0.5 * (span_z + margin),
            )?
            .into(),
            nai,
            vis_veto,
        )?;
        tree.place_child(
            veto_top,
            world,
            crystal_pv,
            Offset::centered()
                .with(Axis::X, AxisRule::Aligned(Side::Positive))
                .with(Axis::Y, AxisRule::Flush(Side::Positive))
                .with(Axis::Z, AxisRule::Aligned(Side::Positive)),
            1,
        )?;

        let veto_side = tree.add_logical(
            "SubDet2",
            Cuboid::new(
                "SubDet2",
                0.5 * margin,
                0.5 * span_y,
                0.5 * (span_z + margin),
            )?
            .into(),
            nai,
            vis_veto,
        )?;
        tree.place_child(
            veto_side,
            world,
            crystal_pv,
            Offset::centered()
                .with(Axis::X, AxisRule::Flush(Side::Negative))
                .with(Axis::Z, AxisRule::Aligned(Side::Positive)),
            2,
        )?;

        let veto_back = tree.add_logical(
            "SubDet3",
            Cuboid::new("SubDet3", 0.5 * span_x, 0.5 * span_y, 0.5 * margin)?.into(),
            nai,
            vis_veto,
        )?;
        tree.place_child(
            veto_back,
            world,
            crystal_pv,
            Offset::flush(Axis::Z, Side::Negative),
            3,
        )?;

        let veto_bottom = tree.add_logical(
            "SubDet4",
            Cuboid::new(
                "SubDet4",
                0.5 * (span_x + margin),
                0.5 * margin,
                0.5 * (span_z + margin),
            )?
            .into(),
            nai,
            vis_veto,
        )?;
        tree.place_child(
            veto_bottom,
            world,
            crystal_pv,
            Offset::centered()
                .with(Axis::X, AxisRule::Aligned(Side::Positive))
                .with(Axis::Y, AxisRule::Flush(Side::Negative))
                .with(Axis::Z, AxisRule::Aligned(Side::Positive)),
            4,
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
    fn crystal_offset_by_its_own_radius() {
        let assembly = Simple.build().unwrap();
        let pv = assembly.tree.find_placement("MainDet", 0).unwrap();
        let pos = assembly.tree.physical(pv).unwrap().translation();
        assert_relative_eq!(pos.x, -2.5 * CM, epsilon = TOLERANCE);
        assert_relative_eq!(pos.y, 0.0, epsilon = TOLERANCE);
        assert_relative_eq!(pos.z, 0.0, epsilon = TOLERANCE);
    }

    #[test]
    fn top_veto_flush_on_crystal_radius() {
        let assembly = Simple.build().unwrap();
        let pv = assembly.tree.find_placement("SubDet1", 1).unwrap();
        let pos = assembly.tree.physical(pv).unwrap().translation();
        // x: crystal at -r, aligned +X faces: -r + (r - 5 cm) = -5 cm.
        assert_relative_eq!(pos.x, -5.0 * CM, epsilon = TOLERANCE);
        // y: flush above the bounding radius: r + 2.5 cm = 5 cm.
        assert_relative_eq!(pos.y, 5.0 * CM, epsilon = TOLERANCE);
        // z: aligned +Z faces: 2.5 cm - 5 cm = -2.5 cm.
        assert_relative_eq!(pos.z, -2.5 * CM, epsilon = TOLERANCE);
    }

    #[test]
    fn back_veto_flush_below_crystal() {
        let assembly = Simple.build().unwrap();
        let crystal = assembly.tree.find_placement("MainDet", 0).unwrap();
        let veto = assembly.tree.find_placement("SubDet3", 3).unwrap();
        let crystal_pos = assembly.tree.physical(crystal).unwrap().translation();
        let veto_pos = assembly.tree.physical(veto).unwrap().translation();
        // Flush-adjacency invariant along Z: separation equals the sum of
        // the half-extents.
        let separation = (crystal_pos.z - veto_pos.z).abs();
        assert_relative_eq!(separation, (2.5 + 2.5) * CM, epsilon = TOLERANCE);
        // Other axes track the crystal exactly.
        assert_relative_eq!(veto_pos.x, crystal_pos.x, epsilon = TOLERANCE);
        assert_relative_eq!(veto_pos.y, crystal_pos.y, epsilon = TOLERANCE);
    }

    #[test]
    fn four_vetoes_with_distinct_copy_numbers() {
        let assembly = Simple.build().unwrap();
        for (name, copy_no) in [("SubDet1", 1), ("SubDet2", 2), ("SubDet3", 3), ("SubDet4", 4)] {
            assert!(assembly.tree.find_placement(name, copy_no).is_some(), "{name}");
        }
        assert_eq!(assembly.tree.placement_count(), 6);
    }
}
