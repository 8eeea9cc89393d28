use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Real};
use crate::shape::PolyMesh;
use crate::utils::hashmap::HashMap;

/// A piece of a fractured object.
#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    /// The name of the fragment, derived from the name of its source.
    pub name: String,
    /// The mesh of the fragment, in the frame given by `position`.
    pub mesh: PolyMesh,
    /// The world-space placement of the fragment.
    pub position: Isometry<Real>,
    /// The recursion level this fragment was produced at.
    pub level: usize,
    /// Named scalar properties, such as the mass written by the
    /// [`MassAssigner`](super::MassAssigner).
    pub properties: HashMap<String, Real>,
}

impl Fragment {
    /// A fragment without any property.
    pub fn new(name: String, mesh: PolyMesh, position: Isometry<Real>, level: usize) -> Self {
        Self {
            name,
            mesh,
            position,
            level,
            properties: HashMap::default(),
        }
    }

    /// The value of the property `name`, if set.
    #[inline]
    pub fn property(&self, name: &str) -> Option<Real> {
        self.properties.get(name).copied()
    }

    /// The world-space AABB of this fragment.
    #[inline]
    pub fn world_aabb(&self) -> Aabb {
        self.mesh.aabb(&self.position)
    }
}
