/// Errors that can occur during convex hull computation.
///
/// The hull is built incrementally from an initial tetrahedron, so it fails when the input is
/// degenerate (too few points, all points collinear or coplanar) or contains invalid data.
///
/// ```
/// use shatter3d::math::Point;
/// use shatter3d::transformation::{try_convex_hull, ConvexHullError};
///
/// let flat = vec![
///     Point::origin(),
///     Point::new(1.0, 0.0, 0.0),
///     Point::new(0.0, 1.0, 0.0),
///     Point::new(1.0, 1.0, 0.0),
/// ];
///
/// assert_eq!(try_convex_hull(&flat), Err(ConvexHullError::MissingSupportPoint));
/// ```
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConvexHullError {
    /// An internal error occurred during convex hull computation.
    #[error("Internal error: {0}")]
    InternalError(&'static str),

    /// The algorithm could not find a valid support point.
    ///
    /// The input contains NaN or infinite coordinates, or all the points are nearly collinear or
    /// coplanar.
    #[error("Input points are either invalid (NaN) or are almost coplanar.")]
    MissingSupportPoint,

    /// Less than four distinct points were provided.
    #[error("Less than 4 points were given to the convex-hull algorithm.")]
    IncompleteInput,

    /// An edge of the hull is not shared by exactly two faces.
    ///
    /// Reports the face where the problem was detected and the edge.
    #[error("Detected t-junction for face {0}, edge: ({1}, {2})")]
    TJunction(usize, u32, u32),

    /// A vertex lies outside of one of the hull faces.
    #[error("Vertex {0} lies outside of face {1}")]
    NotConvex(usize, usize),
}
