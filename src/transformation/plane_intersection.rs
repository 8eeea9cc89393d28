use crate::math::{Point, Real};
use crate::shape::Plane;
use crate::utils::{self, PLANE_EPSILON};

/// Computes the vertices of the convex polyhedron bounded by a set of half-spaces.
///
/// Every triple of planes with linearly independent normals is intersected, and the resulting
/// point is kept if it lies inside of every half-space (up to a small tolerance). Returns the
/// deduplicated vertices and the sorted indices of the planes supporting at least one of them.
///
/// An empty vertex set means the half-spaces have no bounded intersection.
pub fn intersect_planes(planes: &[Plane]) -> (Vec<Point<Real>>, Vec<usize>) {
    let n = planes.len();
    let mut points = Vec::new();
    let mut used = vec![false; n];

    for i in 0..n {
        let ni = planes[i].normal;
        for j in i + 1..n {
            let nj = planes[j].normal;
            let nij = ni.cross(&nj);

            if nij.norm_squared() <= PLANE_EPSILON * PLANE_EPSILON {
                continue;
            }

            for k in j + 1..n {
                let nk = planes[k].normal;
                let det = nij.dot(&nk);

                if det.abs() <= PLANE_EPSILON {
                    continue;
                }

                let pt = (nj.cross(&nk) * -planes[i].offset
                    + nk.cross(&ni) * -planes[j].offset
                    + nij * -planes[k].offset)
                    / det;
                let pt = Point::from(pt);

                if planes.iter().all(|p| p.contains_point(&pt, PLANE_EPSILON)) {
                    used[i] = true;
                    used[j] = true;
                    used[k] = true;
                    points.push(pt);
                }
            }
        }
    }

    let (vertices, _) = utils::weld_points(&points, PLANE_EPSILON);
    let used = (0..n).filter(|i| used[*i]).collect();

    (vertices, used)
}
