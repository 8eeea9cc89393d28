use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Point, Real};
use crate::shape::PolyMesh;

/// An object to fracture, as seen from the host scene.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceObject {
    /// The name of the object. Fragments are named after it.
    pub name: String,
    /// The mesh of the object, in its local frame.
    pub mesh: PolyMesh,
    /// The world-space placement of the object.
    pub position: Isometry<Real>,
    /// World-space particle positions attached to the object.
    pub particles: Vec<Point<Real>>,
    /// The children of the object. Their placement is expressed in world-space too.
    pub children: Vec<SourceObject>,
}

impl SourceObject {
    /// Creates a source object without particle nor child.
    pub fn new(name: impl Into<String>, mesh: PolyMesh, position: Isometry<Real>) -> Self {
        Self {
            name: name.into(),
            mesh,
            position,
            particles: Vec::new(),
            children: Vec::new(),
        }
    }

    /// The vertices of the mesh, in world-space.
    pub fn world_vertices(&self) -> Vec<Point<Real>> {
        self.mesh
            .vertices()
            .iter()
            .map(|v| self.position * v)
            .collect()
    }

    /// The mesh transformed into world-space.
    pub fn world_mesh(&self) -> PolyMesh {
        self.mesh.clone().transformed(&self.position)
    }

    /// The world-space AABB of the mesh.
    #[inline]
    pub fn world_aabb(&self) -> Aabb {
        self.mesh.aabb(&self.position)
    }
}

/// Scene-level inputs shared by every fractured object.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneContext {
    /// The reference point used by [`RecursionSelect::CursorMin`](super::RecursionSelect) and
    /// [`RecursionSelect::CursorMax`](super::RecursionSelect).
    pub cursor: Point<Real>,
    /// World-space polylines drawn by the user.
    pub strokes: Vec<Vec<Point<Real>>>,
}

impl Default for SceneContext {
    fn default() -> Self {
        Self {
            cursor: Point::origin(),
            strokes: Vec::new(),
        }
    }
}
