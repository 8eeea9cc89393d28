//! Half-space delimited by an oriented plane.

use crate::math::{Point, Real, UnitVector, Vector};
use na::Unit;

/// A half-space delimited by an infinite plane.
///
/// The half-space contains every point `x` such that `normal · x + offset <= 0`: the normal
/// points toward the outside.
#[derive(PartialEq, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Plane {
    /// The outward unit normal of the planar boundary.
    pub normal: UnitVector<Real>,
    /// The signed offset of the plane.
    pub offset: Real,
}

impl Plane {
    /// Builds a new half-space from a (not necessarily normalized) normal and an offset.
    ///
    /// The offset is taken as-is, it is *not* rescaled by the normal's length.
    ///
    /// # Panics
    ///
    /// Panics if `normal` has a zero length. See [`Plane::try_new`] for a non-panicking version.
    #[inline]
    pub fn new(normal: Vector<Real>, offset: Real) -> Plane {
        Self::try_new(normal, offset).expect("The plane normal must not be zero.")
    }

    /// Builds a new half-space, returning `None` if `normal` is too small to be normalized.
    #[inline]
    pub fn try_new(normal: Vector<Real>, offset: Real) -> Option<Plane> {
        Unit::try_new(normal, Real::EPSILON).map(|normal| Plane { normal, offset })
    }

    /// Builds the half-space whose boundary passes through `point` with the given outward normal.
    #[inline]
    pub fn from_point_and_normal(point: &Point<Real>, normal: UnitVector<Real>) -> Plane {
        Plane {
            normal,
            offset: -normal.dot(&point.coords),
        }
    }

    /// The signed distance from `point` to the boundary, positive outside.
    #[inline]
    pub fn signed_distance(&self, point: &Point<Real>) -> Real {
        self.normal.dot(&point.coords) + self.offset
    }

    /// Tests if `point` is inside of this half-space, up to `epsilon`.
    #[inline]
    pub fn contains_point(&self, point: &Point<Real>, epsilon: Real) -> bool {
        self.signed_distance(point) <= epsilon
    }

    /// Expresses this half-space in a frame whose origin is at `origin`.
    ///
    /// If `x` is inside of `self` then `x - origin` is inside of the result.
    #[inline]
    #[must_use]
    pub fn relative_to(&self, origin: &Point<Real>) -> Plane {
        Plane {
            normal: self.normal,
            offset: self.offset + self.normal.dot(&origin.coords),
        }
    }

    /// Computes the point where the segment `a, b` crosses the boundary of this half-space.
    ///
    /// Returns `None` if the segment is parallel to the boundary.
    pub fn segment_intersection(&self, a: &Point<Real>, b: &Point<Real>) -> Option<Point<Real>> {
        let da = self.signed_distance(a);
        let db = self.signed_distance(b);
        let denom = da - db;

        if denom.abs() <= Real::EPSILON {
            None
        } else {
            let t = da / denom;
            Some(a + (b - a) * t)
        }
    }
}
