//! Ear-clipping triangulation of the planar cap polygons produced by the mesh intersection.
//! Based on <https://github.com/ivanfratric/polypartition>.

use crate::{
    math::{Point2, Real},
    utils::planar::{corner_direction, is_point_in_triangle, Orientation},
};

/// The information stored for each vertex in the ear clipping algorithm.
#[derive(Clone, Default)]
struct VertexInfo {
    /// Whether the vertex is still active i.e. it has not been clipped yet.
    is_active: bool,
    /// Whether the vertex is the tip of an ear and should be clipped.
    is_ear: bool,
    /// How small the angle of the ear is. Ears with a smaller angle are clipped first.
    pointiness: Real,
    p_prev: usize,
    p_next: usize,
}

/// Updates the fields `pointiness` and `is_ear` for a given vertex index.
///
/// Polygons with bridged holes visit the bridge endpoints twice, so vertices sharing a position
/// with one of the ear corners never block that ear.
fn update_vertex(
    idx: usize,
    vertex_info: &mut VertexInfo,
    active: &[bool],
    points: &[Point2<Real>],
) -> bool {
    let p = points[idx];
    let p1 = points[vertex_info.p_prev];
    let p3 = points[vertex_info.p_next];

    let vec1 = (p1 - p).normalize();
    let vec3 = (p3 - p).normalize();
    vertex_info.pointiness = vec1.dot(&vec3);
    if vertex_info.pointiness.is_nan() {
        return false;
    }

    vertex_info.is_ear = corner_direction(&p1, &p, &p3) == Some(Orientation::Ccw)
        && (0..points.len())
            .filter(|&i| {
                active[i] && i != vertex_info.p_prev && i != idx && i != vertex_info.p_next
            })
            .filter(|&i| points[i] != p && points[i] != p1 && points[i] != p3)
            .all(|i| is_point_in_triangle(&points[i], &p1, &p, &p3) != Some(true));
    true
}

/// Triangulates a simple counter-clockwise polygon.
///
/// Returns `None` if the polygon is not counter-clockwise, has less than three vertices, or
/// contains NaN coordinates.
pub(crate) fn triangulate_ear_clipping(vertices: &[Point2<Real>]) -> Option<Vec<[u32; 3]>> {
    let n_vertices = vertices.len();

    if n_vertices < 3 {
        return None;
    }

    let mut active = vec![true; n_vertices];
    let mut vertex_info = vec![VertexInfo::default(); n_vertices];

    for i in 0..n_vertices {
        let info = &mut vertex_info[i];
        info.is_active = true;
        info.p_prev = if i == 0 { n_vertices - 1 } else { i - 1 };
        info.p_next = if i == n_vertices - 1 { 0 } else { i + 1 };

        if !update_vertex(i, info, &active, vertices) {
            return None;
        }
    }

    let mut output_indices = Vec::with_capacity(n_vertices - 2);

    for i in 0..n_vertices - 3 {
        // Search through all active ears and pick out the pointiest.
        let (ear_i, _) = vertex_info
            .iter()
            .enumerate()
            .filter(|(_, info)| info.is_active && info.is_ear)
            .max_by(|(_, info1), (_, info2)| info1.pointiness.total_cmp(&info2.pointiness))?;

        vertex_info[ear_i].is_active = false;
        active[ear_i] = false;

        let VertexInfo { p_prev, p_next, .. } = vertex_info[ear_i];
        output_indices.push([p_prev as u32, ear_i as u32, p_next as u32]);

        vertex_info[p_prev].p_next = p_next;
        vertex_info[p_next].p_prev = p_prev;

        // The three remaining vertices form the last triangle.
        if i == n_vertices - 4 {
            break;
        }

        if !update_vertex(p_prev, &mut vertex_info[p_prev], &active, vertices)
            || !update_vertex(p_next, &mut vertex_info[p_next], &active, vertices)
        {
            return None;
        }
    }

    if let Some((i, info)) = vertex_info
        .iter()
        .enumerate()
        .find(|(_, info)| info.is_active)
    {
        output_indices.push([info.p_prev as u32, i as u32, info.p_next as u32]);
    }

    Some(output_indices)
}
