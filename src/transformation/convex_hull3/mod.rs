pub use self::convex_hull::try_convex_hull;
pub use self::error::ConvexHullError;
use self::initial_mesh::try_get_initial_mesh;
use self::triangle_facet::TriangleFacet;
pub use self::validation::check_convex_hull;

use crate::math::{Point, Real};
use crate::shape::{Face, PolyMesh};
use crate::transformation::dissolve_coplanar_faces;
use crate::utils;

mod convex_hull;
mod error;
mod initial_mesh;
mod triangle_facet;
mod validation;

/// Computes the convex hull of `points` as a polygonal mesh.
///
/// Points closer than `weld_distance` are merged first, then adjacent hull triangles whose
/// normals differ by less than `dissolve_angle` (in radians) are merged into polygons.
pub fn convex_hull_and_clean(
    points: &[Point<Real>],
    weld_distance: Real,
    dissolve_angle: Real,
) -> Result<PolyMesh, ConvexHullError> {
    let (welded, _) = utils::weld_points(points, weld_distance);
    let (vertices, triangles) = try_convex_hull(&welded)?;
    let hull = PolyMesh::new(vertices, triangles.into_iter().map(Face::new).collect());
    Ok(dissolve_coplanar_faces(&hull, dissolve_angle))
}
