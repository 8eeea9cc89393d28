//! Transformation, cleanup and decomposition of polygonal meshes.

pub use self::convex_hull3::{
    check_convex_hull, convex_hull_and_clean, try_convex_hull, ConvexHullError,
};
pub use self::dissolve::dissolve_coplanar_faces;
pub use self::geometry_kernel::{DefaultKernel, GeometryKernel};
pub use self::islands::split_disconnected_islands;
pub use self::mesh_intersection::{intersect_meshes, MeshIntersectionError};
pub use self::plane_intersection::intersect_planes;
pub use self::split_edges::split_edges;

mod convex_hull3;
mod dissolve;
pub(crate) mod ear_clipping;
mod geometry_kernel;
mod islands;
mod mesh_intersection;
mod plane_intersection;
mod split_edges;

#[cfg(feature = "wavefront")]
pub mod wavefront;
