/// Errors that can occur when computing the boolean intersection of two meshes.
///
/// The first operand of [`intersect_meshes`](crate::transformation::intersect_meshes) must be
/// a closed convex polyhedron (such as a Voronoi cell hull). The second operand may be any
/// oriented polygonal mesh, but the cut it leaves on each plane of the first operand must form
/// closed loops for the cut to be capped.
#[derive(thiserror::Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum MeshIntersectionError {
    /// The first operand is not convex.
    #[error("the cutting mesh is not convex")]
    NonConvexOperand,

    /// A face of the first operand has no well-defined normal.
    #[error("the cutting mesh has a degenerate face: {0}")]
    DegenerateFace(usize),

    /// The cut left by a plane does not form closed loops, usually because the mesh is open.
    #[error("the section along face {0} of the cutting mesh is not closed")]
    UnclosedSection(usize),

    /// A cap polygon could not be triangulated.
    #[error("internal failure while triangulating an intersection face")]
    TriangulationError,
}
