use super::{ConvexHullError, TriangleFacet};
use crate::math::{Point, Real};

/// Picks four extreme, non-coplanar points and builds the outward-oriented tetrahedron they span.
pub fn try_get_initial_mesh(
    points: &[Point<Real>],
    epsilon: Real,
) -> Result<(Vec<TriangleFacet>, [usize; 4]), ConvexHullError> {
    let argmax = |key: &dyn Fn(&Point<Real>) -> Real| {
        points
            .iter()
            .enumerate()
            .map(|(i, pt)| (i, key(pt)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or(ConvexHullError::IncompleteInput)
    };

    let (i0, _) = argmax(&|pt| -pt.x)?;
    let p0 = points[i0];

    let (i1, dist1) = argmax(&|pt| na::distance_squared(pt, &p0))?;
    if dist1.sqrt() <= epsilon {
        return Err(ConvexHullError::MissingSupportPoint);
    }

    let dir = (points[i1] - p0).normalize();
    let (i2, dist2) = argmax(&|pt| {
        let dpt = pt - p0;
        (dpt - dir * dpt.dot(&dir)).norm()
    })?;
    if dist2 <= epsilon {
        return Err(ConvexHullError::MissingSupportPoint);
    }

    let normal = (points[i1] - p0).cross(&(points[i2] - p0)).normalize();
    let (i3, dist3) = argmax(&|pt| normal.dot(&(pt - p0)).abs())?;
    if dist3 <= epsilon {
        return Err(ConvexHullError::MissingSupportPoint);
    }

    let oriented = |a: usize, b: usize, c: usize, opposite: usize| {
        let facet = TriangleFacet::new(a, b, c, points);
        if facet.distance_to_point(opposite, points) > 0.0 {
            TriangleFacet::new(a, c, b, points)
        } else {
            facet
        }
    };

    let facets = vec![
        oriented(i0, i1, i2, i3),
        oriented(i0, i1, i3, i2),
        oriented(i0, i2, i3, i1),
        oriented(i1, i2, i3, i0),
    ];

    Ok((facets, [i0, i1, i2, i3]))
}
