//! The volume tree: logical volumes in an arena, physical volumes placed
//! relative to already-placed neighbors.

use std::collections::HashMap;

use slotmap::{new_key_type, SlotMap};
use tracing::debug;

use crate::error::{GeometryError, Result, TreeError};
use crate::material::MaterialId;
use crate::math::{Axis, Vector3, TOLERANCE};
use crate::placement::{AxisRule, Offset};
use crate::solid::Solid;
use crate::vis::VisAttributes;

new_key_type! {
    /// Identifier of a logical volume in a [`VolumeTree`].
    pub struct LogicalId;

    /// Identifier of a physical volume in a [`VolumeTree`].
    pub struct PhysicalId;
}

/// A solid bound to a material and a display style.
///
/// Logical volumes are shared and immutable after construction; placing
/// one several times yields several physical volumes referencing it.
#[derive(Debug)]
pub struct LogicalVolume {
    name: String,
    solid: Solid,
    material: MaterialId,
    vis: VisAttributes,
}

impl LogicalVolume {
    /// Returns the logical volume's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the bound solid.
    #[must_use]
    pub fn solid(&self) -> &Solid {
        &self.solid
    }

    /// Returns the bound material id.
    #[must_use]
    pub fn material(&self) -> MaterialId {
        self.material
    }

    /// Returns the display style.
    #[must_use]
    pub fn vis(&self) -> VisAttributes {
        self.vis
    }
}

/// How a physical volume was positioned: against which already-placed
/// volume, and under which offset rule. Kept so the validation pass can
/// re-check the adjacency invariant instead of trusting the arithmetic.
#[derive(Debug, Clone, Copy)]
struct PlacementRecord {
    reference: PhysicalId,
    offset: Offset,
}

/// A logical volume placed inside a parent's local frame.
///
/// Rotation is unused in this system; the transform is a pure translation.
#[derive(Debug)]
pub struct PhysicalVolume {
    logical: LogicalId,
    parent: Option<PhysicalId>,
    translation: Vector3,
    copy_no: u32,
    record: Option<PlacementRecord>,
}

impl PhysicalVolume {
    /// Returns the logical volume this placement instantiates.
    #[must_use]
    pub fn logical(&self) -> LogicalId {
        self.logical
    }

    /// Returns the parent placement, or `None` for the world volume.
    #[must_use]
    pub fn parent(&self) -> Option<PhysicalId> {
        self.parent
    }

    /// Returns the translation in the parent's local frame.
    #[must_use]
    pub fn translation(&self) -> Vector3 {
        self.translation
    }

    /// Returns the copy number disambiguating siblings that share a
    /// logical volume.
    #[must_use]
    pub fn copy_no(&self) -> u32 {
        self.copy_no
    }
}

/// Arena-backed tree of placed volumes, rooted at a single world volume.
#[derive(Debug, Default)]
pub struct VolumeTree {
    logicals: SlotMap<LogicalId, LogicalVolume>,
    physicals: SlotMap<PhysicalId, PhysicalVolume>,
    logical_by_name: HashMap<String, LogicalId>,
    world: Option<PhysicalId>,
}

impl VolumeTree {
    /// Creates a new, empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a logical volume under a unique name.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::DuplicateVolume`] if the name is taken.
    pub fn add_logical(
        &mut self,
        name: &str,
        solid: Solid,
        material: MaterialId,
        vis: VisAttributes,
    ) -> Result<LogicalId> {
        if self.logical_by_name.contains_key(name) {
            return Err(TreeError::DuplicateVolume(name.into()).into());
        }
        let id = self.logicals.insert(LogicalVolume {
            name: name.into(),
            solid,
            material,
            vis,
        });
        self.logical_by_name.insert(name.into(), id);
        Ok(id)
    }

    /// Returns a reference to a logical volume.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is stale.
    pub fn logical(&self, id: LogicalId) -> Result<&LogicalVolume> {
        Ok(self
            .logicals
            .get(id)
            .ok_or(TreeError::EntityNotFound("logical volume"))?)
    }

    /// Returns a reference to a physical volume.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is stale.
    pub fn physical(&self, id: PhysicalId) -> Result<&PhysicalVolume> {
        Ok(self
            .physicals
            .get(id)
            .ok_or(TreeError::EntityNotFound("physical volume"))?)
    }

    /// Looks up a logical volume by name.
    #[must_use]
    pub fn find_logical(&self, name: &str) -> Option<LogicalId> {
        self.logical_by_name.get(name).copied()
    }

    /// Returns true if a logical volume of that name exists.
    #[must_use]
    pub fn contains_logical(&self, name: &str) -> bool {
        self.logical_by_name.contains_key(name)
    }

    /// Returns the world placement.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NoWorld`] if no root has been placed yet.
    pub fn world(&self) -> Result<PhysicalId> {
        Ok(self.world.ok_or(TreeError::NoWorld)?)
    }

    /// Places the single unparented world volume at the global origin.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::WorldAlreadyPlaced`] on a second call, or an
    /// error if the logical id is stale.
    pub fn place_root(&mut self, logical: LogicalId) -> Result<PhysicalId> {
        if self.world.is_some() {
            return Err(TreeError::WorldAlreadyPlaced.into());
        }
        let name = self.logical(logical)?.name.clone();
        let id = self.physicals.insert(PhysicalVolume {
            logical,
            parent: None,
            translation: Vector3::zeros(),
            copy_no: 0,
            record: None,
        });
        self.world = Some(id);
        debug!(volume = %name, "placed world volume");
        Ok(id)
    }

    /// Places a logical volume inside `parent`, positioned relative to
    /// `reference` (the parent itself, or an already-placed sibling).
    ///
    /// The translation is `reference_point + offset(reference_solid,
    /// new_solid)`, where the reference point is the reference sibling's
    /// translation, or the parent's local origin when the reference is the
    /// parent. A logical volume may be placed any number of times with
    /// distinct copy numbers.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidReference`] if `reference` is neither
    /// `parent` nor one of its children, or an error if any id is stale.
    pub fn place_child(
        &mut self,
        logical: LogicalId,
        parent: PhysicalId,
        reference: PhysicalId,
        offset: Offset,
        copy_no: u32,
    ) -> Result<PhysicalId> {
        let name = self.logical(logical)?.name.clone();
        let (reference_point, reference_logical) = if reference == parent {
            (Vector3::zeros(), self.physical(parent)?.logical)
        } else {
            let reference_pv = self.physical(reference)?;
            if reference_pv.parent != Some(parent) {
                return Err(TreeError::InvalidReference(name).into());
            }
            (reference_pv.translation, reference_pv.logical)
        };
        let reference_solid = &self.logical(reference_logical)?.solid;
        let new_solid = &self.logical(logical)?.solid;
        let translation = reference_point + offset.vector(reference_solid, new_solid);

        debug!(
            volume = %name,
            copy_no,
            x = translation.x,
            y = translation.y,
            z = translation.z,
            "placed volume"
        );
        Ok(self.physicals.insert(PhysicalVolume {
            logical,
            parent: Some(parent),
            translation,
            copy_no,
            record: Some(PlacementRecord { reference, offset }),
        }))
    }

    /// Finds a placement by logical-volume name and copy number.
    #[must_use]
    pub fn find_placement(&self, name: &str, copy_no: u32) -> Option<PhysicalId> {
        let logical = self.find_logical(name)?;
        self.physicals
            .iter()
            .find(|(_, pv)| pv.logical == logical && pv.copy_no == copy_no)
            .map(|(id, _)| id)
    }

    /// Iterates over all placements of one logical volume.
    pub fn placements_of(&self, logical: LogicalId) -> impl Iterator<Item = PhysicalId> + '_ {
        self.physicals
            .iter()
            .filter(move |(_, pv)| pv.logical == logical)
            .map(|(id, _)| id)
    }

    /// Returns the number of physical volumes in the tree.
    #[must_use]
    pub fn placement_count(&self) -> usize {
        self.physicals.len()
    }

    /// Returns a placement's position in global coordinates, walking up
    /// the parent chain.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is stale.
    pub fn global_position(&self, id: PhysicalId) -> Result<Vector3> {
        let mut position = Vector3::zeros();
        let mut current = Some(id);
        while let Some(pv_id) = current {
            let pv = self.physical(pv_id)?;
            position += pv.translation;
            current = pv.parent;
        }
        Ok(position)
    }

    /// Checks the non-overlap/adjacency invariant for the whole tree.
    ///
    /// Three passes: every recorded flush placement must separate the two
    /// volumes by at least the sum of their half-extents along the flush
    /// axis; siblings must not interpenetrate; every child must lie inside
    /// its parent's extent, including the radial bound when the parent is
    /// a tube. Touching contact is allowed everywhere.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::FlushViolation`], [`GeometryError::Overlap`]
    /// or [`GeometryError::NotContained`] on the first violation found.
    pub fn validate_overlaps(&self) -> Result<()> {
        self.check_flush_invariants()?;
        self.check_sibling_overlaps()?;
        self.check_containment()
    }

    fn check_flush_invariants(&self) -> Result<()> {
        for (_, pv) in &self.physicals {
            let (Some(record), Some(parent)) = (pv.record, pv.parent) else {
                continue;
            };
            let reference_point = if record.reference == parent {
                Vector3::zeros()
            } else {
                self.physical(record.reference)?.translation
            };
            let reference_lv = self.logical(self.physical(record.reference)?.logical)?;
            let new_lv = self.logical(pv.logical)?;
            for axis in Axis::ALL {
                let AxisRule::Flush(_) = record.offset.rule(axis) else {
                    continue;
                };
                let separation =
                    (axis.component(&pv.translation) - axis.component(&reference_point)).abs();
                let required =
                    reference_lv.solid.half_extent(axis) + new_lv.solid.half_extent(axis);
                if separation + TOLERANCE < required {
                    return Err(GeometryError::FlushViolation {
                        volume: new_lv.name.clone(),
                        reference: reference_lv.name.clone(),
                        axis,
                        separation,
                        required,
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    fn check_sibling_overlaps(&self) -> Result<()> {
        let mut by_parent: HashMap<PhysicalId, Vec<PhysicalId>> = HashMap::new();
        for (id, pv) in &self.physicals {
            if let Some(parent) = pv.parent {
                by_parent.entry(parent).or_default().push(id);
            }
        }
        for siblings in by_parent.values() {
            for (i, &a) in siblings.iter().enumerate() {
                for &b in &siblings[i + 1..] {
                    let pa = self.physical(a)?;
                    let pb = self.physical(b)?;
                    let la = self.logical(pa.logical)?;
                    let lb = self.logical(pb.logical)?;
                    if !solids_disjoint(&la.solid, &pa.translation, &lb.solid, &pb.translation) {
                        return Err(GeometryError::Overlap {
                            first: la.name.clone(),
                            second: lb.name.clone(),
                        }
                        .into());
                    }
                }
            }
        }
        Ok(())
    }

    fn check_containment(&self) -> Result<()> {
        for (_, pv) in &self.physicals {
            let Some(parent) = pv.parent else { continue };
            let child = self.logical(pv.logical)?;
            let parent_lv = self.logical(self.physical(parent)?.logical)?;
            for axis in Axis::ALL {
                let center = axis.component(&pv.translation);
                let child_half = child.solid.half_extent(axis);
                let parent_half = parent_lv.solid.half_extent(axis);
                if center.abs() + child_half > parent_half + TOLERANCE {
                    return Err(GeometryError::NotContained {
                        child: child.name.clone(),
                        parent: parent_lv.name.clone(),
                    }
                    .into());
                }
            }
            // A tube parent also bounds its children radially; the per-axis
            // intervals alone would let a box corner poke past the radius.
            if let Some(parent_tube) = parent_lv.solid.as_tube() {
                let reach =
                    max_radial_extent(&child.solid, &pv.translation, &Vector3::zeros());
                if reach > parent_tube.outer_radius() + TOLERANCE {
                    return Err(GeometryError::NotContained {
                        child: child.name.clone(),
                        parent: parent_lv.name.clone(),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }
}

/// Conservative disjointness test for two sibling solids in a common
/// parent frame.
///
/// Starts from the axis-aligned bounds; when those overlap, a tube with a
/// bore may still clear a sibling sitting radially inside the bore, and a
/// sibling may sit entirely outside a tube's outer radius.
fn solids_disjoint(a: &Solid, pa: &Vector3, b: &Solid, pb: &Vector3) -> bool {
    for axis in Axis::ALL {
        let (a_lo, a_hi) = interval(a, pa, axis);
        let (b_lo, b_hi) = interval(b, pb, axis);
        if a_hi.min(b_hi) - a_lo.max(b_lo) <= TOLERANCE {
            return true;
        }
    }
    clears_bore(a, pa, b, pb)
        || clears_bore(b, pb, a, pa)
        || radially_outside(a, pa, b, pb)
        || radially_outside(b, pb, a, pa)
}

fn interval(solid: &Solid, center: &Vector3, axis: Axis) -> (f64, f64) {
    let c = axis.component(center);
    let h = solid.half_extent(axis);
    (c - h, c + h)
}

/// True if `other` fits radially inside the bore of `tube`.
fn clears_bore(tube: &Solid, tube_center: &Vector3, other: &Solid, other_center: &Vector3) -> bool {
    let Some(t) = tube.as_tube() else { return false };
    if !t.has_bore() {
        return false;
    }
    max_radial_extent(other, other_center, tube_center) <= t.inner_radius() + TOLERANCE
}

/// True if `other` sits entirely outside the outer radius of `tube`.
fn radially_outside(
    tube: &Solid,
    tube_center: &Vector3,
    other: &Solid,
    other_center: &Vector3,
) -> bool {
    let Some(t) = tube.as_tube() else { return false };
    min_radial_extent(other, other_center, tube_center) >= t.outer_radius() - TOLERANCE
}

/// Largest distance from the tube axis to any point of `other`'s footprint
/// in the XY plane. Exact for coaxial tubes, conservative otherwise.
fn max_radial_extent(other: &Solid, other_center: &Vector3, axis_center: &Vector3) -> f64 {
    let dx = other_center.x - axis_center.x;
    let dy = other_center.y - axis_center.y;
    if let Some(t) = other.as_tube() {
        if dx.abs() < TOLERANCE && dy.abs() < TOLERANCE {
            return t.outer_radius();
        }
    }
    let hx = other.half_extent(Axis::X);
    let hy = other.half_extent(Axis::Y);
    let far_x = dx.abs() + hx;
    let far_y = dy.abs() + hy;
    far_x.hypot(far_y)
}

/// Smallest distance from the tube axis to `other`'s footprint in the XY
/// plane. Exact for coaxial tubes; for other shapes uses the bounding
/// rectangle, which underestimates and therefore stays conservative.
fn min_radial_extent(other: &Solid, other_center: &Vector3, axis_center: &Vector3) -> f64 {
    let dx = other_center.x - axis_center.x;
    let dy = other_center.y - axis_center.y;
    if let Some(t) = other.as_tube() {
        if dx.abs() < TOLERANCE && dy.abs() < TOLERANCE {
            return t.inner_radius();
        }
    }
    let hx = other.half_extent(Axis::X);
    let hy = other.half_extent(Axis::Y);
    let near_x = (dx.abs() - hx).max(0.0);
    let near_y = (dy.abs() - hy).max(0.0);
    near_x.hypot(near_y)
}
