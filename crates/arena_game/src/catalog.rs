//! Model catalog
//!
//! Maps model names to reusable prototypes: an ordered list of sub-mesh
//! descriptors plus one local-space collision shape. Archetype construction
//! clones a prototype into freshly created sub-entities; the prototype's own
//! data is never attached to a live entity, which keeps per-instance
//! ownership intact.

use std::collections::HashMap;

use arena_engine::prelude::*;

use crate::components::{GeometryData, MaterialData};

/// One sub-mesh of a model prototype
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshPrototype {
    /// Buffer ranges for the sub-mesh geometry
    pub geometry: GeometryData,
    /// Material parameters
    pub material: MaterialData,
    /// Placement of the sub-mesh (doubles as the archetype's spawn placement
    /// for the first mesh)
    pub transform: Mat4,
}

/// A reusable model: sub-meshes plus a collision shape
#[derive(Debug, Clone)]
pub struct ModelPrototype {
    /// Sub-meshes in draw order
    pub meshes: Vec<MeshPrototype>,
    /// Collision shape in the model's local space
    pub collider: Obb,
}

impl ModelPrototype {
    /// Build a single-mesh box model with a matching box collider
    #[must_use]
    pub fn box_model(half_extents: Vec3, diffuse: [f32; 4]) -> Self {
        Self {
            meshes: vec![MeshPrototype {
                geometry: GeometryData {
                    vertex_start: 0,
                    index_start: 0,
                    index_count: 36,
                },
                material: MaterialData { diffuse },
                transform: Mat4::identity(),
            }],
            collider: Obb::axis_aligned(Vec3::zeros(), half_extents),
        }
    }

    /// Return a copy of this prototype with every sub-mesh placed under the
    /// given matrix (spawn placement for instances cloned from it)
    #[must_use]
    pub fn placed(mut self, placement: Mat4) -> Self {
        for mesh in &mut self.meshes {
            mesh.transform = placement * mesh.transform;
        }
        self
    }
}

/// Name-keyed catalog of model prototypes
///
/// Context singleton; populated once at session start by whatever loaded the
/// level and model files (out of scope here). A missing name is degenerate
/// but not fatal: lookups return `None` and construction falls back to an
/// empty mesh collection.
#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    models: HashMap<String, ModelPrototype>,
}

impl ModelCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a prototype under a name, replacing any previous entry
    pub fn insert(&mut self, name: impl Into<String>, prototype: ModelPrototype) {
        self.models.insert(name.into(), prototype);
    }

    /// Look up a prototype by name
    #[must_use]
    pub fn model(&self, name: &str) -> Option<&ModelPrototype> {
        self.models.get(name)
    }

    /// Number of registered models
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Is the catalog empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
