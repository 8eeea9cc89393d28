use crate::math::Real;

/// Tolerance of the half-space membership tests done while enumerating cell vertices.
pub(crate) const PLANE_EPSILON: Real = 1.0e-6;
/// Below this squared distance, two seeds are considered coincident.
pub(crate) const COINCIDENT_SEED_SQ_EPSILON: Real = 1.0e-12;
/// A large value standing for an unbounded cell radius.
pub(crate) const UNBOUNDED_DISTANCE: Real = 1.0e10;
/// Number of decimals seed coordinates are rounded to.
pub(crate) const SEED_DECIMALS: i32 = 4;
/// Vertices of a cell hull closer than this are welded together.
pub(crate) const HULL_WELD_DISTANCE: Real = 0.005;
/// Adjacent hull triangles whose normals differ by less than this angle (radians) are merged.
pub(crate) const HULL_DISSOLVE_ANGLE: Real = 0.001;
/// Vertices of a clipped fragment closer than this are welded together.
pub(crate) const FRAGMENT_WELD_DISTANCE: Real = 0.005;
/// Adjacent faces of a clipped fragment whose normals differ by less than this angle (radians)
/// are merged.
pub(crate) const FRAGMENT_DISSOLVE_ANGLE: Real = 0.001;
