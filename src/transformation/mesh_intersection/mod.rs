pub use self::mesh_intersection::intersect_meshes;
pub use self::mesh_intersection_error::MeshIntersectionError;

use crate::math::Real;

mod cap;
mod mesh_intersection;
mod mesh_intersection_error;

/// Distance to a cutting plane below which a vertex is considered lying on it.
const EPS: Real = 1.0e-6;
/// Relative distance a cutter vertex may lie outside of the plane of one of its faces.
const CONVEXITY_EPS: Real = 1.0e-4;
