use crate::math::{Point, Real, Vector};

/// Computes the geometric center (centroid) of a set of points.
///
/// All points are weighted equally. Fragments are re-centered on this point.
///
/// # Panics
///
/// Panics if the input slice is empty.
#[inline]
pub fn center(pts: &[Point<Real>]) -> Point<Real> {
    assert!(
        !pts.is_empty(),
        "Cannot compute the center of less than 1 point."
    );

    let sum = pts.iter().fold(Vector::zeros(), |acc, pt| acc + pt.coords);
    Point::from(sum / pts.len() as Real)
}
