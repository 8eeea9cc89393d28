use super::{try_get_initial_mesh, ConvexHullError, TriangleFacet};
use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::utils::hashset::HashSet;

/// Relative tolerance (scaled by the input diagonal) below which a point is considered to lie on
/// a hull face.
const RELATIVE_EPSILON: Real = 1.0e-9;

/// Computes the convex hull of a set of 3d points.
///
/// Returns the hull vertices (in input order, unused points removed) and its outward-oriented
/// triangles.
pub fn try_convex_hull(
    points: &[Point<Real>],
) -> Result<(Vec<Point<Real>>, Vec<[u32; 3]>), ConvexHullError> {
    if points.len() < 4 {
        return Err(ConvexHullError::IncompleteInput);
    }

    if points
        .iter()
        .any(|pt| pt.coords.iter().any(|x| !x.is_finite()))
    {
        return Err(ConvexHullError::MissingSupportPoint);
    }

    let diagonal = Aabb::from_points_ref(points)
        .diagonal_length_squared()
        .sqrt();
    let epsilon = diagonal * RELATIVE_EPSILON;
    let (mut triangles, initial) = try_get_initial_mesh(points, epsilon)?;

    let mut visible = Vec::new();
    let mut visible_edges = HashSet::default();

    for point in 0..points.len() {
        if initial.contains(&point) {
            continue;
        }

        visible.clear();
        visible.extend(
            triangles
                .iter()
                .enumerate()
                .filter(|(_, t)| t.valid && t.can_see_point(point, points, epsilon))
                .map(|(i, _)| i),
        );

        if visible.is_empty() {
            // The point is inside of the current hull.
            continue;
        }

        visible_edges.clear();
        for i in &visible {
            triangles[*i].valid = false;
            visible_edges.extend(triangles[*i].edges());
        }

        // The horizon is made of the edges of the visible region whose twin is not visible.
        let horizon: Vec<_> = visible
            .iter()
            .flat_map(|i| triangles[*i].edges())
            .filter(|(a, b)| !visible_edges.contains(&(*b, *a)))
            .collect();

        if horizon.len() < 3 {
            return Err(ConvexHullError::InternalError(
                "the horizon of a visible region has less than three edges",
            ));
        }

        for (a, b) in horizon {
            triangles.push(TriangleFacet::new(a, b, point, points));
        }
    }

    let mut remap = vec![u32::MAX; points.len()];
    for t in triangles.iter().filter(|t| t.valid) {
        for pt in t.pts {
            remap[pt] = 0;
        }
    }

    let mut vertices = Vec::new();
    for (i, id) in remap.iter_mut().enumerate() {
        if *id != u32::MAX {
            *id = vertices.len() as u32;
            vertices.push(points[i]);
        }
    }

    let indices = triangles
        .iter()
        .filter(|t| t.valid)
        .map(|t| t.pts.map(|i| remap[i]))
        .collect();

    Ok((vertices, indices))
}
