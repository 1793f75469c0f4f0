use std::collections::HashMap;

use slotmap::{new_key_type, SlotMap};
use tracing::debug;

use crate::error::{MaterialError, Result};

new_key_type! {
    /// Identifier of a resolved material in a [`MaterialTable`].
    pub struct MaterialId;
}

/// One element of a material's composition, by mass fraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    /// Chemical symbol.
    pub symbol: &'static str,
    /// Mass fraction in `[0, 1]`.
    pub mass_fraction: f64,
}

/// A resolved physical substance: density plus elemental composition.
///
/// Materials are immutable once resolved; logical volumes hold a
/// [`MaterialId`] into the table rather than owning the descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    name: String,
    density: f64,
    composition: Vec<Element>,
}

impl Material {
    /// Returns the symbolic name the material was resolved from.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the density in g/cm³.
    #[must_use]
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Returns the elemental composition by mass fraction.
    #[must_use]
    pub fn composition(&self) -> &[Element] {
        &self.composition
    }
}

/// Cached resolver from symbolic material names to [`Material`] descriptors.
///
/// The first resolution of a name loads the entry from the built-in
/// standard-materials database; repeated resolutions return the same id.
#[derive(Debug, Default)]
pub struct MaterialTable {
    materials: SlotMap<MaterialId, Material>,
    by_name: HashMap<String, MaterialId>,
}

impl MaterialTable {
    /// Creates a new, empty material table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a symbolic name to a material id, caching the result.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::Unknown`] if the name is not in the
    /// supported set.
    pub fn resolve(&mut self, name: &str) -> Result<MaterialId> {
        if let Some(&id) = self.by_name.get(name) {
            return Ok(id);
        }
        let material =
            standard_material(name).ok_or_else(|| MaterialError::Unknown(name.into()))?;
        debug!(material = name, density = material.density, "resolved material");
        let id = self.materials.insert(material);
        self.by_name.insert(name.into(), id);
        Ok(id)
    }

    /// Returns a reference to a resolved material.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::NotFound`] if the id is stale.
    pub fn get(&self, id: MaterialId) -> Result<&Material> {
        Ok(self.materials.get(id).ok_or(MaterialError::NotFound)?)
    }

    /// Returns the number of distinct materials resolved so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Returns true if nothing has been resolved yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

/// Looks up a name in the built-in standard-materials database.
///
/// Densities in g/cm³; compositions by mass fraction.
fn standard_material(name: &str) -> Option<Material> {
    let (density, composition): (f64, Vec<Element>) = match name {
        "vacuum" => (1.0e-25, vec![element("H", 1.0)]),
        "air" => (
            1.205e-3,
            vec![
                element("C", 0.000_124),
                element("N", 0.755_268),
                element("O", 0.231_781),
                element("Ar", 0.012_827),
            ],
        ),
        "aluminum" => (2.699, vec![element("Al", 1.0)]),
        "copper" => (8.96, vec![element("Cu", 1.0)]),
        "germanium" => (5.323, vec![element("Ge", 1.0)]),
        "sodium_iodide" => (
            3.667,
            vec![element("Na", 0.153_373), element("I", 0.846_627)],
        ),
        _ => return None,
    };
    Some(Material {
        name: name.into(),
        density,
        composition,
    })
}

fn element(symbol: &'static str, mass_fraction: f64) -> Element {
    Element {
        symbol,
        mass_fraction,
    }
}
