//! Orientation, containment and crossing tests on planar (projected) polygons.

use crate::math::{Point2, Real};

#[derive(Eq, PartialEq, Debug, Copy, Clone)]
/// The orientation or winding direction of a corner or polygon.
pub enum Orientation {
    /// Counter-clockwise
    Ccw,
    /// Clockwise
    Cw,
    /// Neither (a straight line)
    None,
}

/// Returns the direction of the corner `p1 -> p2 -> p3`.
///
/// Returns `None` if one of the points contains a NaN.
pub fn corner_direction(
    p1: &Point2<Real>,
    p2: &Point2<Real>,
    p3: &Point2<Real>,
) -> Option<Orientation> {
    let v1 = p1 - p2;
    let v2 = p3 - p2;
    let cross: Real = v1.perp(&v2);

    match cross.partial_cmp(&0.0)? {
        core::cmp::Ordering::Less => Some(Orientation::Ccw),
        core::cmp::Ordering::Equal => Some(Orientation::None),
        core::cmp::Ordering::Greater => Some(Orientation::Cw),
    }
}

/// Returns `true` if point `p` is in triangle with corners `v1`, `v2` and `v3`.
/// Returns `None` if the triangle is invalid i.e. all points are the same or on a straight line.
pub fn is_point_in_triangle(
    p: &Point2<Real>,
    v1: &Point2<Real>,
    v2: &Point2<Real>,
    v3: &Point2<Real>,
) -> Option<bool> {
    let d1 = corner_direction(p, v1, v2)?;
    let d2 = corner_direction(p, v2, v3)?;
    let d3 = corner_direction(p, v3, v1)?;

    let has_cw = d1 == Orientation::Cw || d2 == Orientation::Cw || d3 == Orientation::Cw;
    let has_ccw = d1 == Orientation::Ccw || d2 == Orientation::Ccw || d3 == Orientation::Ccw;

    if d1 == Orientation::None && d2 == Orientation::None && d3 == Orientation::None {
        None
    } else {
        Some(!(has_cw && has_ccw))
    }
}

/// Twice the signed area of a planar polygon (positive for counter-clockwise polygons).
pub fn signed_area2(polygon: &[Point2<Real>]) -> Real {
    let mut area = 0.0;
    for (i, a) in polygon.iter().enumerate() {
        let b = polygon[(i + 1) % polygon.len()];
        area += a.coords.perp(&b.coords);
    }
    area
}

/// Even-odd test of `pt` against the closed polygon `poly`.
pub fn point_in_polygon(pt: &Point2<Real>, poly: &[Point2<Real>]) -> bool {
    let mut inside = false;

    for (i, a) in poly.iter().enumerate() {
        let b = poly[(i + 1) % poly.len()];
        if (a.y > pt.y) != (b.y > pt.y) {
            let x = a.x + (pt.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if pt.x < x {
                inside = !inside;
            }
        }
    }

    inside
}

/// Tests if the segments `a1, a2` and `b1, b2` cross at a point interior to both.
pub fn segments_cross(
    a1: &Point2<Real>,
    a2: &Point2<Real>,
    b1: &Point2<Real>,
    b2: &Point2<Real>,
) -> bool {
    let side = |p: &Point2<Real>, q: &Point2<Real>, r: &Point2<Real>| (q - p).perp(&(r - p));
    let d1 = side(b1, b2, a1);
    let d2 = side(b1, b2, a2);
    let d3 = side(a1, a2, b1);
    let d4 = side(a1, a2, b2);

    d1 * d2 < 0.0 && d3 * d4 < 0.0
}
