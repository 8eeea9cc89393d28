//! The geometric primitives the fracture is built upon.
//!
//! The fracture only reaches mesh processing through the [`GeometryKernel`] trait, so that a
//! host application can route these operations to its own modeling backend. The
//! [`DefaultKernel`] implements every primitive with the algorithms of this module.

use crate::math::{Point, Real};
use crate::shape::{Plane, PolyMesh};
use crate::transformation::{ConvexHullError, MeshIntersectionError};
use crate::utils::hashset::HashSet;
use crate::utils::SortedPair;

/// Mesh processing operations required by the fracture.
pub trait GeometryKernel {
    /// Computes the convex hull of `points`, welds its vertices closer than `weld_distance` and
    /// merges its adjacent faces whose normals differ by less than `dissolve_angle` radians.
    fn convex_hull_and_clean(
        &self,
        points: &[Point<Real>],
        weld_distance: Real,
        dissolve_angle: Real,
    ) -> Result<PolyMesh, ConvexHullError>;

    /// Computes the vertices of the intersection of half-spaces, and the indices of the planes
    /// actually supporting a vertex.
    fn intersect_planes(&self, planes: &[Plane]) -> (Vec<Point<Real>>, Vec<usize>);

    /// Computes the intersection of the convex mesh `cutter` with `mesh`.
    fn boolean_intersect(
        &self,
        cutter: &PolyMesh,
        mesh: &PolyMesh,
    ) -> Result<PolyMesh, MeshIntersectionError>;

    /// Merges the adjacent faces of `mesh` whose normals differ by less than `angle` radians,
    /// as long as the merged polygons are flat and convex.
    fn dissolve_coplanar_faces(&self, mesh: &PolyMesh, angle: Real) -> PolyMesh;

    /// Splits `mesh` into its connected components.
    fn split_disconnected_islands(&self, mesh: &PolyMesh) -> Vec<PolyMesh>;

    /// Duplicates the vertices of `mesh` so that faces are disconnected along `edges`.
    fn split_edges(&self, mesh: &PolyMesh, edges: &HashSet<SortedPair<u32>>) -> PolyMesh;
}

/// The geometry kernel implemented by this crate.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultKernel;

impl GeometryKernel for DefaultKernel {
    fn convex_hull_and_clean(
        &self,
        points: &[Point<Real>],
        weld_distance: Real,
        dissolve_angle: Real,
    ) -> Result<PolyMesh, ConvexHullError> {
        super::convex_hull_and_clean(points, weld_distance, dissolve_angle)
    }

    fn intersect_planes(&self, planes: &[Plane]) -> (Vec<Point<Real>>, Vec<usize>) {
        super::intersect_planes(planes)
    }

    fn boolean_intersect(
        &self,
        cutter: &PolyMesh,
        mesh: &PolyMesh,
    ) -> Result<PolyMesh, MeshIntersectionError> {
        super::intersect_meshes(cutter, mesh)
    }

    fn dissolve_coplanar_faces(&self, mesh: &PolyMesh, angle: Real) -> PolyMesh {
        super::dissolve_coplanar_faces(mesh, angle)
    }

    fn split_disconnected_islands(&self, mesh: &PolyMesh) -> Vec<PolyMesh> {
        super::split_disconnected_islands(mesh)
    }

    fn split_edges(&self, mesh: &PolyMesh, edges: &HashSet<SortedPair<u32>>) -> PolyMesh {
        super::split_edges(mesh, edges)
    }
}
